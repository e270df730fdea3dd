use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::error::TransportError;
use crate::sftp::SftpSession;
use crate::ssh_session::SshSession;
use crate::transport::{ConnectionParams, Connector};

#[derive(Clone)]
pub struct SftpConnector {
    pub config: Arc<ConnectorConfig>,
}

#[derive(Debug)]
pub struct ConnectorConfig {
    pub default_port: u16,
    pub timeout: Duration,
}

impl Connector for SftpConnector {
    type Session = SftpSession;

    async fn connect(&self, params: &ConnectionParams) -> Result<SftpSession, TransportError> {
        let port = params.port.unwrap_or(self.config.default_port);
        info!("Connecting to {}@{}:{}", params.user, params.host, port);

        let ssh = SshSession::connect(params, port, self.config.timeout).await?;
        SftpSession::open(ssh, self.config.timeout).await
    }
}
