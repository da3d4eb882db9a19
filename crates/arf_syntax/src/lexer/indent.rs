//! Indentation handling for the arf lexer
//!
//! Indentation is measured once per line, before any token is scanned. Only spaces indent; the
//! width of one level is fixed.

use arf_core::lang::punctuation::INDENT_WIDTH;

use super::Lexer;
use crate::diagnostics::Diagnostic;

/// Indentation of a line that carries code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Indent {
    pub level: usize,
    /// Number of leading spaces, which is also the column of the first token.
    pub column: usize,
}

impl Lexer<'_> {
    /// Measure the indentation of the line at `row`.
    ///
    /// Returns `None` for lines that produce no tokens: blank lines, comments and lines with
    /// malformed indentation (which are reported).
    pub(super) fn measure_indent(&mut self, row: usize, text: &str) -> Option<Indent> {
        let trimmed = text.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let spaces = text.bytes().take_while(|b| *b == b' ').count();
        if text[spaces..].starts_with(char::is_whitespace) {
            let diagnostic = Diagnostic::error(
                "malformed indentation, tabs cannot be used to indent",
                self.position_at(row, spaces),
            )
            .with_hint(format!("indent with multiples of {INDENT_WIDTH} spaces"));
            self.diagnostics.push(diagnostic);
            return None;
        }
        if spaces % INDENT_WIDTH != 0 {
            self.error_at(row, 0, format!("malformed indentation, use indentation size of {INDENT_WIDTH} spaces"));
            return None;
        }

        Some(Indent {
            level: spaces / INDENT_WIDTH,
            column: spaces,
        })
    }
}
