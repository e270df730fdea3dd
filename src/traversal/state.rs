use crate::file_info::IndexedName;
use crate::notification::EncodedImage;

/// Stato condiviso tra le richieste, posseduto dal solo controller
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TraversalState {
    /// 0 = radice, n > 0 = `subdirectories[n - 1]`, -1 dopo un ciclo completo
    pub cursor: i64,
    pub visited: Vec<String>,
    pub subdirectories: Vec<IndexedName>,
    pub files: Vec<IndexedName>,
    pub last_image: Option<EncodedImage>,
    pub authorized_directory_names: Option<Vec<String>>,
}

impl TraversalState {
    /// Restores the initial values. The directory whitelist is supplied again
    /// by the next listing request, so it is left untouched.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.visited.clear();
        self.subdirectories.clear();
        self.files.clear();
        self.last_image = None;
    }

    /// Subdirectory selected by a positive cursor.
    pub fn current_subdirectory(&self) -> Option<&IndexedName> {
        usize::try_from(self.cursor)
            .ok()
            .and_then(|cursor| cursor.checked_sub(1))
            .and_then(|index| self.subdirectories.get(index))
    }

    /// Empty or missing whitelist lets every directory through.
    pub fn is_directory_authorized(&self, name: &str) -> bool {
        match &self.authorized_directory_names {
            Some(names) if !names.is_empty() => names.iter().any(|n| n == name),
            _ => true,
        }
    }
}
