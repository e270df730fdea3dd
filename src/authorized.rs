//! Static allow-lists for image files and the extension to mime type mapping.

/// Estensioni accettate durante il listing, in ordine di priorità
pub const EXTENSION_AUTHORIZED: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "webp", "svg", "tif", "tiff", "ico",
];

/// Mime type per estensione. L'ordine conta: vince la prima chiave che corrisponde.
pub const MIME_TYPES_AUTHORIZED: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("ico", "image/x-icon"),
];

#[derive(Debug, Clone)]
pub struct AuthorizationTable {
    extensions: Vec<String>,
    mime_types: Vec<(String, String)>,
}

impl Default for AuthorizationTable {
    fn default() -> Self {
        Self::new(
            EXTENSION_AUTHORIZED.iter().copied(),
            MIME_TYPES_AUTHORIZED.iter().copied(),
        )
    }
}

impl AuthorizationTable {
    pub fn new<'a>(
        extensions: impl IntoIterator<Item = &'a str>,
        mime_types: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Self {
        Self {
            extensions: extensions
                .into_iter()
                .map(|e| e.to_ascii_lowercase())
                .collect(),
            mime_types: mime_types
                .into_iter()
                .map(|(k, v)| (k.to_ascii_lowercase(), v.to_string()))
                .collect(),
        }
    }

    /// Case-insensitive `.ext` suffix match against the allowed extensions.
    pub fn is_authorized_image(&self, name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        self.extensions.iter().any(|ext| {
            name.len() > ext.len() + 1
                && name.ends_with(ext.as_str())
                && name.as_bytes()[name.len() - ext.len() - 1] == b'.'
        })
    }

    /// First entry, in table order, whose key is a prefix of the file
    /// extension. Returns an empty string when nothing matches.
    pub fn mime_type_for(&self, file_name: &str) -> &str {
        let Some((_, extension)) = file_name.rsplit_once('.') else {
            return "";
        };
        let extension = extension.to_ascii_lowercase();

        self.mime_types
            .iter()
            .find(|(key, _)| extension.starts_with(key.as_str()))
            .map(|(_, mime)| mime.as_str())
            .unwrap_or("")
    }
}
