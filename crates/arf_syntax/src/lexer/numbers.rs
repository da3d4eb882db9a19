//! Number scanning for the arf lexer
//!
//! Handles integer and fractional literals in four radixes:
//! - `0x1F` hexadecimal, `0b101` binary, `017` octal, anything else decimal
//! - a single `.` inside the digits starts the fraction (not allowed in binary)
//!
//! A fractional value is every digit read as one integer in the radix, divided by the radix raised
//! to the number of fraction digits. `0x1.8` is therefore `0x18 / 16 = 1.5`.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Literal;

impl Lexer<'_> {
    /// Scan a number starting at the current character.
    ///
    /// `start` is the index of the token's first character, which is the `-` sign for negative
    /// numbers.
    pub(super) fn scan_number(&mut self, start: usize, negative: bool) {
        let radix = self.scan_radix_prefix();
        let mut digits = String::new();
        let mut fraction_at = None;

        while let Some(c) = self.peek() {
            if c.is_digit(radix) {
                digits.push(c);
            } else if c == '.' && radix != 2 && fraction_at.is_none() {
                fraction_at = Some(digits.len());
            } else if c.is_ascii_alphanumeric() {
                self.error(self.index, format!("'{c}' is not a {} digit", radix_name(radix)));
                while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
                    self.index += 1;
                }
                break;
            } else {
                break;
            }
            self.index += 1;
        }

        if digits.is_empty() && matches!(radix, 2 | 16) {
            self.error(start, format!("{} literal has no digits", radix_name(radix)));
        }

        let literal = match fraction_at {
            Some(at) => {
                let mut value = digits
                    .chars()
                    .filter_map(|c| c.to_digit(radix))
                    .fold(0.0_f64, |acc, d| acc * f64::from(radix) + f64::from(d));
                let fraction_len = i32::try_from(digits.len() - at).unwrap_or(i32::MAX);
                value /= f64::from(radix).powi(fraction_len);
                Literal::Float(if negative { -value } else { value })
            }
            None => {
                let value = self.integer_value(start, &digits, radix);
                if negative {
                    match 0_i64.checked_sub_unsigned(value) {
                        Some(value) => Literal::SignedInteger(value),
                        None => {
                            self.error(start, "integer literal does not fit in 64 bits");
                            Literal::SignedInteger(0)
                        }
                    }
                } else {
                    Literal::Integer(value)
                }
            }
        };

        let kind = match literal {
            Literal::Float(_) => TokenKind::Float,
            Literal::SignedInteger(_) => TokenKind::SignedInteger,
            _ => TokenKind::Integer,
        };
        self.add_token(kind, start, Some(literal));
    }

    /// Consume the radix prefix, if any, and return the radix.
    fn scan_radix_prefix(&mut self) -> u32 {
        if self.peek() != Some('0') {
            return 10;
        }
        match self.peek_at(1) {
            Some('x') => {
                self.index += 2;
                16
            }
            Some('b') => {
                self.index += 2;
                2
            }
            Some(c) if c.is_ascii_digit() => {
                self.index += 1;
                8
            }
            _ => 10,
        }
    }

    fn integer_value(&mut self, start: usize, digits: &str, radix: u32) -> u64 {
        if digits.is_empty() {
            return 0;
        }
        match u64::from_str_radix(digits, radix) {
            Ok(value) => value,
            Err(_) => {
                self.error(start, "integer literal does not fit in 64 bits");
                0
            }
        }
    }
}

fn radix_name(radix: u32) -> &'static str {
    match radix {
        2 => "binary",
        8 => "octal",
        16 => "hexadecimal",
        _ => "decimal",
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::Literal;
    use crate::lexer::{TokenKind, lex};

    fn number(text: &str) -> (TokenKind, Literal) {
        let (lines, diagnostics) = lex(text);
        assert!(diagnostics.is_empty(), "{text}: {diagnostics:?}");
        assert_eq!(lines[0].tokens.len(), 1, "{text} should be a single token");
        let token = &lines[0].tokens[0];
        (token.kind, token.literal.clone().unwrap())
    }

    #[test]
    fn test_radixes() {
        assert_eq!(number("0x1F"), (TokenKind::Integer, Literal::Integer(31)));
        assert_eq!(number("0b101"), (TokenKind::Integer, Literal::Integer(5)));
        assert_eq!(number("017"), (TokenKind::Integer, Literal::Integer(15)));
        assert_eq!(number("42"), (TokenKind::Integer, Literal::Integer(42)));
        assert_eq!(number("0"), (TokenKind::Integer, Literal::Integer(0)));
    }

    #[test]
    fn test_fractions() {
        assert_eq!(number("3.5"), (TokenKind::Float, Literal::Float(3.5)));
        assert_eq!(number("0.25"), (TokenKind::Float, Literal::Float(0.25)));
        assert_eq!(number("0x1.8"), (TokenKind::Float, Literal::Float(1.5)));
        assert_eq!(number("-2.5"), (TokenKind::Float, Literal::Float(-2.5)));
    }

    #[test]
    fn test_negative_integer() {
        assert_eq!(number("-5"), (TokenKind::SignedInteger, Literal::SignedInteger(-5)));
        assert_eq!(
            number("-9223372036854775808"),
            (TokenKind::SignedInteger, Literal::SignedInteger(i64::MIN))
        );
    }

    #[test]
    fn test_overflow_is_an_error() {
        let (_, diagnostics) = lex("18446744073709551616");
        assert!(diagnostics.contains_message("does not fit in 64 bits"));
        let (_, diagnostics) = lex("-9223372036854775809");
        assert!(diagnostics.contains_message("does not fit in 64 bits"));
    }

    #[test]
    fn test_prefix_without_digits_is_an_error() {
        let (_, diagnostics) = lex("0x");
        assert!(diagnostics.contains_message("hexadecimal literal has no digits"));
        let (_, diagnostics) = lex("0b 1");
        assert!(diagnostics.contains_message("binary literal has no digits"));
    }

    #[test]
    fn test_bad_digit_is_reported_once() {
        let (lines, diagnostics) = lex("0b102 x");
        assert_eq!(diagnostics.error_count(), 1);
        assert!(diagnostics.contains_message("'2' is not a binary digit"));
        assert_eq!(lines[0].tokens.len(), 2);
    }

    #[test]
    fn test_binary_stops_at_dot() {
        let (lines, _) = lex("0b1.1");
        let kinds: Vec<_> = lines[0].tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Integer, TokenKind::Dot, TokenKind::Integer]);
    }
}
