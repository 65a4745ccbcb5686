/// Configuration for photo resolution and upload
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Absolute max size allowed for a single photo (safety guard)
    pub max_photo_bytes: u64,

    /// File extensions accepted for upload, lowercase, without the dot.
    /// Matches the backend's accepted set so bad files fail before any
    /// network call.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_photo_bytes: 10 * 1024 * 1024, // 10MB
            allowed_extensions: ["png", "jpg", "jpeg", "gif"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl UploadConfig {
    /// Create a new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max photo size
    pub fn with_max_photo_bytes(mut self, bytes: u64) -> Self {
        self.max_photo_bytes = bytes;
        self
    }

    /// Replace the accepted extension set
    pub fn with_allowed_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_extensions = extensions
            .into_iter()
            .map(|e| e.into().to_lowercase())
            .collect();
        self
    }

    /// Accept one more extension
    pub fn allow_extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.allowed_extensions.push(extension.into().to_lowercase());
        self
    }

    /// Whether an extension (any case) is accepted
    pub fn extension_allowed(&self, extension: &str) -> bool {
        let extension = extension.to_lowercase();
        self.allowed_extensions.iter().any(|e| *e == extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_extensions_match_backend() {
        let config = UploadConfig::default();
        for ext in ["png", "jpg", "jpeg", "gif"] {
            assert!(config.extension_allowed(ext));
        }
        assert!(config.extension_allowed("JPG"));
        assert!(!config.extension_allowed("webp"));
    }

    #[test]
    fn builder_extends_and_replaces() {
        let config = UploadConfig::new().allow_extension("WebP");
        assert!(config.extension_allowed("webp"));

        let config = UploadConfig::new().with_allowed_extensions(["PNG"]);
        assert!(config.extension_allowed("png"));
        assert!(!config.extension_allowed("jpg"));
    }
}
