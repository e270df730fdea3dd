use log::info;
use russh_sftp::client::fs::File;

use crate::error::TransportError;
use crate::sftp::{SftpSession, session::with_timeout};

/// Opens `file_name` for reading inside the working directory.
pub async fn handle_open(session: &mut SftpSession, file_name: &str) -> Result<File, TransportError> {
    let path = session.path_resolver.resolve(file_name);
    info!("open file: {}", path);

    with_timeout(session.timeout, "open", &path, session.sftp.open(path.as_str())).await
}
