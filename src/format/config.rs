//! Rendering configuration for arf source
//!
//! Indentation is not configurable: the lexer accepts nothing but its own width.

/// Rendering configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatConfig {
    /// Number of blank lines between sections
    pub blank_lines_between_sections: usize,
}

impl FormatConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of blank lines written between sections
    pub fn with_blank_lines_between_sections(mut self, count: usize) -> Self {
        self.blank_lines_between_sections = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_compact() {
        assert_eq!(FormatConfig::default().blank_lines_between_sections, 0);
        assert_eq!(FormatConfig::default(), FormatConfig::new());
    }

    #[test]
    fn test_builder() {
        let config = FormatConfig::new().with_blank_lines_between_sections(1);
        assert_eq!(config.blank_lines_between_sections, 1);
    }
}
