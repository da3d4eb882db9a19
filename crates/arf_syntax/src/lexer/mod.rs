//! Lexer for the arf programming language
//!
//! Works one physical line at a time and handles:
//! - Indentation levels (8 spaces per level), comments and blank lines
//! - Names and permissions (`rw`, `nn`, ...)
//! - Numeric, string and rune literals
//! - Punctuation runs, including the `---` separator and the `->` direction
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token, Line)
//! - `indent` - Indentation measurement
//! - `numbers` - Numeric literal scanning
//! - `strings` - String/rune scanning and escape sequences

mod indent;
mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Line, Token, TokenKind};

use std::sync::Arc;

use arf_core::lang::punctuation;
use arf_core::validate;

use crate::ast::Literal;
use crate::diagnostics::Diagnostics;
use crate::source::{Position, SourceText};

// ============================================================================
// LEXER STATE
// ----------------------------------------------------------------------------
// [Next row] → measure indent → comment/blank/bad indent? → skip
//                                   ↓
//                              magic line? → skip
//                                   ↓
//                         scan tokens until end of line → keep line if any token
// ============================================================================

/// Lexer for arf source files.
///
/// Produces one [`Line`] per source line that carries code. Lines with errors in their indentation
/// are reported and dropped; errors inside a line are reported and scanning continues.
pub struct Lexer<'a> {
    source: &'a Arc<SourceText>,
    row: usize,
    /// Characters of the current line after its indentation.
    chars: Vec<char>,
    index: usize,
    /// Column of `chars[0]` in the physical line.
    offset: usize,
    tokens: Vec<Token>,
    lines: Vec<Line>,
    diagnostics: Diagnostics,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source.
    pub fn new(source: &'a Arc<SourceText>) -> Self {
        Self {
            source,
            row: 0,
            chars: Vec::new(),
            index: 0,
            offset: 0,
            tokens: Vec::new(),
            lines: Vec::new(),
            diagnostics: Diagnostics::new(),
        }
    }

    /// Tokenize the whole source.
    pub fn tokenize(mut self) -> (Vec<Line>, Diagnostics) {
        for row in 0..self.source.len() {
            self.tokenize_line(row);
        }
        (self.lines, self.diagnostics)
    }

    fn tokenize_line(&mut self, row: usize) {
        let source = self.source;
        let Some(text) = source.line(row) else {
            return;
        };
        let Some(indent) = self.measure_indent(row, text) else {
            return;
        };

        let body = text[indent.column..].trim_end();
        if indent.level == 0 && body == punctuation::MAGIC {
            return;
        }

        self.row = row;
        self.chars = body.chars().collect();
        self.index = 0;
        self.offset = indent.column;

        while let Some(c) = self.peek() {
            self.scan_token(c);
        }

        if !self.tokens.is_empty() {
            self.lines.push(Line {
                tokens: std::mem::take(&mut self.tokens),
                indent: indent.level,
                row,
                column: indent.column,
                end_column: indent.column + self.chars.len(),
            });
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.chars.get(self.index).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.index + ahead).copied()
    }

    fn text_from(&self, start: usize) -> String {
        self.chars[start..self.index].iter().collect()
    }

    fn position_at(&self, row: usize, column: usize) -> Position {
        Position::new(self.source, row, column)
    }

    /// Report an error at character `index` of the current line.
    fn error(&mut self, index: usize, message: impl Into<String>) {
        let position = self.position_at(self.row, self.offset + index);
        self.diagnostics.error(message, position);
    }

    fn error_at(&mut self, row: usize, column: usize, message: impl Into<String>) {
        let position = self.position_at(row, column);
        self.diagnostics.error(message, position);
    }

    fn add_token(&mut self, kind: TokenKind, start: usize, literal: Option<Literal>) {
        let token = Token {
            kind,
            text: self.text_from(start),
            literal,
            column: self.offset + start,
        };
        self.tokens.push(token);
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self, c: char) {
        match c {
            '0'..='9' => self.scan_number(self.index, false),
            'a'..='z' | 'A'..='Z' => self.scan_word(),
            '"' | '\'' => self.scan_quoted(c),
            ':' => self.single(TokenKind::Colon),
            '.' => self.single(TokenKind::Dot),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ' ' | '\t' => self.index += 1,
            _ => self.scan_symbol(),
        }
    }

    fn single(&mut self, kind: TokenKind) {
        let start = self.index;
        self.index += 1;
        self.add_token(kind, start, None);
    }

    /// Scan a run of letters and digits: a permission if it spells one, otherwise a name.
    fn scan_word(&mut self) {
        let start = self.index;
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.index += 1;
        }

        let text = self.text_from(start);
        let kind = if validate::is_valid_permission(&text) {
            TokenKind::Permission
        } else {
            TokenKind::Name
        };
        self.add_token(kind, start, None);
    }

    /// Scan a run of punctuation characters.
    ///
    /// A run that is exactly `-` followed by a digit is a negative number.
    fn scan_symbol(&mut self) {
        let start = self.index;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() && self.index == start + 1 && self.chars[start] == '-' {
                self.scan_number(start, true);
                return;
            }
            if ends_symbol(c) {
                break;
            }
            self.index += 1;
        }

        let kind = match self.text_from(start).as_str() {
            punctuation::SEPARATOR => TokenKind::Separator,
            punctuation::DIRECTION => TokenKind::Direction,
            _ => TokenKind::Symbol,
        };
        self.add_token(kind, start, None);
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Characters that end a symbol run.
fn ends_symbol(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ' ' | '\t' | '"' | '\'' | ':' | '.' | '[' | ']' | '{' | '}')
}

/// Tokenize a source file.
#[tracing::instrument(skip_all, fields(path = %source.path().display(), module = source.module_name(), lines = source.len()))]
pub fn tokenize(source: &Arc<SourceText>) -> (Vec<Line>, Diagnostics) {
    Lexer::new(source).tokenize()
}

/// Convenience function to lex a snippet that belongs to no file.
pub fn lex(text: &str) -> (Vec<Line>, Diagnostics) {
    tokenize(&Arc::new(SourceText::anonymous(text)))
}

// ============================================================================
// TESTS
// ============================================================================
