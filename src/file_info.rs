use serde::{Deserialize, Serialize};

/// Tipo di una voce restituita dal listing remoto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Directory,
    Other,
}

/// Voce grezza del listing, prima di qualsiasi filtro
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub kind: FileKind,
}

impl FileInfo {
    #[cfg(test)]
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FileKind::File,
        }
    }

    #[cfg(test)]
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: FileKind::Directory,
        }
    }

    /// `.` and `..` pseudo-entries.
    pub fn is_dot_entry(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// Discovered entry, `id` starts at 1 and follows discovery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexedName {
    pub id: usize,
    pub name: String,
}

impl IndexedName {
    /// Appends `name` with the next sequential id.
    pub fn push(list: &mut Vec<IndexedName>, name: &str) {
        let id = list.len() + 1;
        list.push(IndexedName {
            id,
            name: name.to_string(),
        });
    }
}
