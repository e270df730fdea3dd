use russh_sftp::client::fs::DirEntry;
use russh_sftp::protocol::{FileAttributes, FileType};

use crate::file_info::{FileInfo, FileKind};

pub struct MetadataConverter;

impl MetadataConverter {
    pub fn to_file_kind(attrs: &FileAttributes) -> FileKind {
        match attrs.file_type() {
            FileType::Dir => FileKind::Directory,
            FileType::File => FileKind::File,
            // symlink, socket, device...
            _ => FileKind::Other,
        }
    }

    pub fn to_file_info(entry: &DirEntry) -> FileInfo {
        FileInfo {
            name: entry.file_name(),
            kind: Self::to_file_kind(&entry.metadata()),
        }
    }
}
