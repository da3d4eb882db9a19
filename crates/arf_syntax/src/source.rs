//! Source text and source positions.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The text of one source file, split into lines.
///
/// A `SourceText` is shared (`Arc`) by every [`Position`] that points into it so diagnostics can
/// print the offending line long after lexing is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    path: PathBuf,
    module: String,
    lines: Vec<String>,
}

impl SourceText {
    pub fn new(path: impl Into<PathBuf>, module: impl Into<String>, text: &str) -> Self {
        Self {
            path: path.into(),
            module: module.into(),
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    /// Build a source that belongs to no file, for snippets and tests.
    pub fn anonymous(text: &str) -> Self {
        Self::new("<input>", "", text)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the module the file was opened for.
    pub fn module_name(&self) -> &str {
        &self.module
    }

    /// Return the line at `row` (0-based), without its line terminator.
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A place in a source file: 0-based row and character column.
///
/// Positions are attached to every AST node for diagnostics only. They never take part in
/// equality: any two positions compare equal, so AST values compare by structure.
#[derive(Clone, Default)]
pub struct Position {
    pub row: usize,
    pub column: usize,
    pub source: Option<Arc<SourceText>>,
}

impl Position {
    pub fn new(source: &Arc<SourceText>, row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            source: Some(Arc::clone(source)),
        }
    }

    /// A position that is not attached to any file.
    pub fn detached(row: usize, column: usize) -> Self {
        Self {
            row,
            column,
            source: None,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.source.as_deref().map(SourceText::path)
    }

    /// Text of the line this position points into.
    pub fn line_text(&self) -> Option<&str> {
        self.source.as_deref().and_then(|source| source.line(self.row))
    }
}

impl PartialEq for Position {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path() {
            Some(path) => write!(f, "{}:{}:{}", path.display(), self.row + 1, self.column + 1),
            None => write!(f, "{}:{}", self.row + 1, self.column + 1),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_drop_terminators() {
        let source = SourceText::new("a.arf", "alpha", ":arf\r\nmodule alpha\n---\n");
        assert_eq!(source.len(), 3);
        assert_eq!(source.line(1), Some("module alpha"));
        assert_eq!(source.line(3), None);
    }

    #[test]
    fn test_positions_never_distinguish_nodes() {
        let source = Arc::new(SourceText::anonymous("x"));
        assert_eq!(Position::new(&source, 0, 0), Position::detached(40, 2));
    }

    #[test]
    fn test_position_renders_one_based() {
        let source = Arc::new(SourceText::new("dir/a.arf", "alpha", "one\ntwo"));
        let position = Position::new(&source, 1, 2);
        assert_eq!(position.to_string(), "dir/a.arf:2:3");
        assert_eq!(position.line_text(), Some("two"));
    }
}
