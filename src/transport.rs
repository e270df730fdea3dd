//! Seam between the traversal controller and the remote file server.
//!
//! A [`Connector`] opens one short-lived [`RemoteSession`] per request. The
//! controller only ever drives these traits, the SFTP implementation lives in
//! [`crate::sftp`].

use serde::Deserialize;
use tokio::io::AsyncRead;

use crate::error::TransportError;
use crate::file_info::FileInfo;

/// Parametri di connessione, passati così come arrivano dalla richiesta
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionParams {
    pub host: String,
    #[serde(default)]
    pub port: Option<u16>,
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub host_key_fingerprint: Option<String>,
}

#[allow(async_fn_in_trait)]
pub trait RemoteSession {
    type Reader: AsyncRead + Unpin;

    /// Moves the working directory; relative paths resolve against the current one.
    async fn change_dir(&mut self, path: &str) -> Result<(), TransportError>;

    /// Immediate entries of the working directory.
    async fn list(&mut self) -> Result<Vec<FileInfo>, TransportError>;

    /// Opens `file_name` inside the working directory for reading.
    async fn retrieve(&mut self, file_name: &str) -> Result<Self::Reader, TransportError>;

    async fn close(self) -> Result<(), TransportError>;
}

#[allow(async_fn_in_trait)]
pub trait Connector {
    type Session: RemoteSession;

    async fn connect(&self, params: &ConnectionParams) -> Result<Self::Session, TransportError>;
}
