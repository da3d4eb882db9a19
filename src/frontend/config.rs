//! Module discovery configuration

/// What a module file looks like on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// File extension of module files, without the dot
    pub extension: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            extension: "arf".to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the file extension (a leading dot is ignored)
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }
}
