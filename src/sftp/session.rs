use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use log::{info, warn};
use russh::Disconnect;
use russh::client::Handle;
use russh_sftp::client::SftpSession as RusshSftpSession;
use russh_sftp::client::fs::File;

use crate::error::TransportError;
use crate::file_info::FileInfo;
use crate::ssh_session::SshSession;
use crate::transport::RemoteSession;

use super::{handlers, utils::path_resolver::PathResolver};

pub struct SftpSession {
    pub(crate) ssh: Handle<SshSession>,
    pub(crate) sftp: RusshSftpSession,
    pub(crate) path_resolver: PathResolver,
    pub(crate) timeout: Duration,
}

impl SftpSession {
    /// Opens the `sftp` subsystem on an authenticated SSH connection.
    pub async fn open(ssh: Handle<SshSession>, timeout: Duration) -> Result<Self, TransportError> {
        let channel = with_timeout(timeout, "open channel", "-", ssh.channel_open_session()).await?;
        with_timeout(
            timeout,
            "subsystem request",
            "-",
            channel.request_subsystem(true, "sftp"),
        )
        .await?;

        let sftp = with_timeout(
            timeout,
            "sftp init",
            "-",
            RusshSftpSession::new(channel.into_stream()),
        )
        .await?;

        // directory di lavoro al momento della connessione
        let cwd = with_timeout(timeout, "canonicalize", ".", sftp.canonicalize(".")).await?;
        info!("SFTP session ready, working directory {}", cwd);

        Ok(Self {
            ssh,
            sftp,
            path_resolver: PathResolver::new(cwd),
            timeout,
        })
    }
}

/// Bounds a remote operation by `timeout` and folds its error into
/// [`TransportError::Protocol`].
pub(crate) async fn with_timeout<T, E, F>(
    timeout: Duration,
    op: &'static str,
    path: &str,
    fut: F,
) -> Result<T, TransportError>
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(TransportError::Protocol {
            path: path.to_string(),
            reason: format!("{}: {}", op, e),
        }),
        Err(_) => Err(TransportError::Timeout(op)),
    }
}

impl RemoteSession for SftpSession {
    type Reader = File;

    async fn change_dir(&mut self, path: &str) -> Result<(), TransportError> {
        handlers::dir_ops::handle_change_dir(self, path).await
    }

    async fn list(&mut self) -> Result<Vec<FileInfo>, TransportError> {
        handlers::dir_ops::handle_list(self).await
    }

    async fn retrieve(&mut self, file_name: &str) -> Result<File, TransportError> {
        handlers::file_ops::handle_open(self, file_name).await
    }

    async fn close(self) -> Result<(), TransportError> {
        info!("close session in {}", self.path_resolver.cwd());

        // il canale SFTP si chiude insieme alla connessione SSH
        drop(self.sftp);
        if let Err(e) = self
            .ssh
            .disconnect(Disconnect::ByApplication, "", "en")
            .await
        {
            warn!("Disconnect failed: {}", e);
            return Err(e.into());
        }
        Ok(())
    }
}
