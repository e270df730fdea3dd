use log::{debug, info};

use crate::error::TransportError;
use crate::file_info::FileInfo;
use crate::sftp::{SftpSession, session::with_timeout, utils::metadata::MetadataConverter};

pub async fn handle_change_dir(session: &mut SftpSession, path: &str) -> Result<(), TransportError> {
    let target = session.path_resolver.resolve(path);
    info!("cwd: {} -> {}", path, target);

    let canonical = with_timeout(
        session.timeout,
        "canonicalize",
        &target,
        session.sftp.canonicalize(target.as_str()),
    )
    .await?;

    let attrs = with_timeout(
        session.timeout,
        "stat",
        &canonical,
        session.sftp.metadata(canonical.as_str()),
    )
    .await?;

    if !attrs.is_dir() {
        return Err(TransportError::NotADirectory(canonical));
    }

    session.path_resolver.set_cwd(canonical);
    Ok(())
}

pub async fn handle_list(session: &mut SftpSession) -> Result<Vec<FileInfo>, TransportError> {
    let cwd = session.path_resolver.cwd().to_string();
    info!("readdir: {}", cwd);

    let read_dir = with_timeout(
        session.timeout,
        "readdir",
        &cwd,
        session.sftp.read_dir(cwd.as_str()),
    )
    .await?;

    let files: Vec<FileInfo> = read_dir
        .map(|entry| MetadataConverter::to_file_info(&entry))
        .collect();

    debug!("{} entries in {}", files.len(), cwd);
    Ok(files)
}
