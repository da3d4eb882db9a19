//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites in the parser.

use crate::ast::Literal;
use crate::lexer::{Token, TokenKind};

/// Token kinds accepted as default values of data sections, members, inputs and outputs.
pub const VALUE_KINDS: &[TokenKind] = &[
    TokenKind::None,
    TokenKind::Integer,
    TokenKind::SignedInteger,
    TokenKind::Float,
    TokenKind::String,
    TokenKind::Rune,
];

impl TokenKind {
    /// Return `true` for tokens that carry a decoded literal.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Integer | TokenKind::SignedInteger | TokenKind::Float | TokenKind::String | TokenKind::Rune
        )
    }
}

impl Token {
    /// Return `true` if this is a name spelled `word`.
    pub fn is_name(&self, word: &str) -> bool {
        self.kind == TokenKind::Name && self.text == word
    }

    /// Convenience accessor for unsigned integer tokens.
    pub fn integer_value(&self) -> Option<u64> {
        match self.literal {
            Some(Literal::Integer(value)) => Some(value),
            _ => None,
        }
    }

    /// Convenience accessor for string tokens.
    pub fn string_value(&self) -> Option<&str> {
        match &self.literal {
            Some(Literal::String(value)) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::lex;

    #[test]
    fn test_literal_kinds() {
        let (lines, _) = lex(r#"12 -3 1.5 "s" 'c' name"#);
        let literal: Vec<_> = lines[0].tokens.iter().map(|t| t.kind.is_literal()).collect();
        assert_eq!(literal, vec![true, true, true, true, true, false]);
    }

    #[test]
    fn test_accessors() {
        let (lines, _) = lex(r#"external 7 "text""#);
        let tokens = &lines[0].tokens;
        assert!(tokens[0].is_name("external"));
        assert_eq!(tokens[1].integer_value(), Some(7));
        assert_eq!(tokens[2].string_value(), Some("text"));
        assert_eq!(tokens[2].integer_value(), None);
    }
}
