//! Token types for the arf lexer

use std::fmt;

use arf_core::lang::punctuation::INDENT_WIDTH;

use crate::ast::Literal;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Token kinds for arf.
///
/// `None` never appears in a [`Line`]; the parser uses it for "end of line" when describing what it
/// found or expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    None,
    Separator,     // ---
    Direction,     // ->
    Permission,    // rw, nn, ...
    Integer,       // 42, 0x2A, 0b101, 052
    SignedInteger, // -42
    Float,         // 4.2, -0.5
    String,        // "text"
    Rune,          // 'c'
    Name,
    Symbol, // any other run of punctuation
    Colon,
    Dot,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

impl TokenKind {
    /// Human-readable description used in parser diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::None => "end of line",
            TokenKind::Separator => "separator",
            TokenKind::Direction => "direction",
            TokenKind::Permission => "permission",
            TokenKind::Integer => "integer literal",
            TokenKind::SignedInteger => "signed integer literal",
            TokenKind::Float => "float literal",
            TokenKind::String => "string literal",
            TokenKind::Rune => "rune literal",
            TokenKind::Name => "name",
            TokenKind::Symbol => "symbol",
            TokenKind::Colon => "colon",
            TokenKind::Dot => "dot",
            TokenKind::LBracket => "left bracket",
            TokenKind::RBracket => "right bracket",
            TokenKind::LBrace => "left brace",
            TokenKind::RBrace => "right brace",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its raw text, decoded value and column in the physical line.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Decoded value of literal tokens.
    pub literal: Option<Literal>,
    pub column: usize,
}

/// One non-empty source line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub tokens: Vec<Token>,
    /// Indentation level: leading spaces divided by the indent width.
    pub indent: usize,
    /// 0-based row in the file.
    pub row: usize,
    /// Column of the first character after the indentation.
    pub column: usize,
    /// Column just past the last non-space character.
    pub end_column: usize,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pad = " ".repeat(self.indent * INDENT_WIDTH);
        writeln!(f, "{pad}line {}", self.row + 1)?;
        for token in &self.tokens {
            match &token.literal {
                Some(literal) => writeln!(f, "{pad}- {:?} {literal}", token.kind)?,
                None => writeln!(f, "{pad}- {:?} {}", token.kind, token.text)?,
            }
        }
        Ok(())
    }
}
