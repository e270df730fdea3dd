use std::sync::Arc;
use std::time::Duration;

use log::{info, warn};
use russh::client::{self, Handle};
use russh::keys::PublicKey;
use russh::keys::ssh_key::HashAlg;

use crate::error::TransportError;
use crate::transport::ConnectionParams;

/// Lato client della connessione SSH che trasporta il sottosistema SFTP
pub struct SshSession {
    host: String,
    expected_fingerprint: Option<String>,
}

impl SshSession {
    pub fn new(params: &ConnectionParams) -> Self {
        Self {
            host: params.host.clone(),
            expected_fingerprint: params.host_key_fingerprint.clone(),
        }
    }

    /// Handshake, host key check and password authentication.
    pub async fn connect(
        params: &ConnectionParams,
        port: u16,
        timeout: Duration,
    ) -> Result<Handle<SshSession>, TransportError> {
        let addr = format!("{}:{}", params.host, port);
        let config = Arc::new(client::Config {
            inactivity_timeout: Some(timeout),
            ..Default::default()
        });

        let mut handle = tokio::time::timeout(
            timeout,
            client::connect(config, (params.host.as_str(), port), Self::new(params)),
        )
        .await
        .map_err(|_| TransportError::Timeout("connect"))?
        .map_err(|e| match e {
            russh::Error::UnknownKey => TransportError::HostKeyRejected(addr.clone()),
            e => TransportError::Connect {
                addr: addr.clone(),
                reason: e.to_string(),
            },
        })?;

        let auth = tokio::time::timeout(
            timeout,
            handle.authenticate_password(params.user.clone(), params.password.clone()),
        )
        .await
        .map_err(|_| TransportError::Timeout("authentication"))??;

        if !auth.success() {
            warn!("Password rejected for {} on {}", params.user, addr);
            return Err(TransportError::AuthRejected(params.user.clone()));
        }

        info!("Authenticated as {} on {}", params.user, addr);
        Ok(handle)
    }
}

impl client::Handler for SshSession {
    type Error = russh::Error;

    async fn check_server_key(&mut self, server_public_key: &PublicKey) -> Result<bool, Self::Error> {
        let fingerprint = server_public_key.fingerprint(HashAlg::Sha256).to_string();

        match &self.expected_fingerprint {
            Some(expected) if *expected == fingerprint => Ok(true),
            Some(expected) => {
                warn!(
                    "Host key for {} is {}, expected {}",
                    self.host, fingerprint, expected
                );
                Ok(false)
            }
            None => {
                info!("Accepting host key {} for {}", fingerprint, self.host);
                Ok(true)
            }
        }
    }
}
