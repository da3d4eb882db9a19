//! String scanning for the arf lexer
//!
//! Handles `"string"` and `'r'` rune literals and their escape sequences.

use super::Lexer;
use super::tokens::TokenKind;
use crate::ast::Literal;

// ============================================================================
// Escape sequence handling
// ============================================================================

/// Decode a single-character escape code (the character after the backslash).
fn simple_escape(code: char) -> Option<char> {
    match code {
        'a' => Some('\x07'),
        'b' => Some('\x08'),
        'f' => Some('\x0c'),
        'n' => Some('\n'),
        'r' => Some('\r'),
        't' => Some('\t'),
        'v' => Some('\x0b'),
        '\'' => Some('\''),
        '"' => Some('"'),
        '\\' => Some('\\'),
        _ => None,
    }
}

impl Lexer<'_> {
    /// Process an escape sequence. The current character is the backslash.
    ///
    /// Returns `None` after reporting a malformed escape; scanning continues after it.
    fn scan_escape(&mut self) -> Option<char> {
        let at = self.index;
        self.index += 1;

        let Some(code) = self.peek() else {
            self.error(at, "escape sequence cut off by the end of the line");
            return None;
        };

        if let Some(c) = simple_escape(code) {
            self.index += 1;
            return Some(c);
        }

        match code {
            '0'..='7' => self.scan_escape_digits(at, 8, 3),
            'x' | 'u' | 'U' => {
                self.index += 1;
                let width = match code {
                    'x' => 2,
                    'u' => 4,
                    _ => 8,
                };
                self.scan_escape_digits(at, 16, width)
            }
            _ => {
                self.index += 1;
                self.error(at, format!("invalid escape code \\{code}"));
                None
            }
        }
    }

    /// Read exactly `width` digits of an octal or hex escape.
    fn scan_escape_digits(&mut self, at: usize, radix: u32, width: usize) -> Option<char> {
        let mut code = 0_u32;
        let mut count = 0;
        while count < width {
            let Some(digit) = self.peek().and_then(|c| c.to_digit(radix)) else {
                break;
            };
            code = code * radix + digit;
            count += 1;
            self.index += 1;
        }

        if count < width {
            let kind = if radix == 8 { "octal" } else { "hex" };
            self.error(at, format!("{kind} escape sequence too short, expected {width} digits"));
            return None;
        }

        let decoded = char::from_u32(code);
        if decoded.is_none() {
            self.error(at, format!("escape sequence \\{} is not a valid character", self.text_from(at + 1)));
        }
        decoded
    }

    // ========================================================================
    // String scanning
    // ========================================================================

    /// Scan a string (`"`) or rune (`'`) literal. The current character is the opening quote.
    pub(super) fn scan_quoted(&mut self, quote: char) {
        let start = self.index;
        self.index += 1;

        let mut value = String::new();
        let mut terminated = false;
        while let Some(c) = self.peek() {
            if c == quote {
                self.index += 1;
                terminated = true;
                break;
            }
            if c == '\\' {
                if let Some(decoded) = self.scan_escape() {
                    value.push(decoded);
                }
                continue;
            }
            value.push(c);
            self.index += 1;
        }

        if !terminated {
            let what = if quote == '\'' { "rune" } else { "string" };
            self.error(start, format!("unterminated {what} literal"));
        }

        if quote == '\'' {
            let mut chars = value.chars();
            let rune = match (chars.next(), chars.next()) {
                (Some(c), None) => c,
                _ => {
                    self.error(start, "rune literal must be one rune in size");
                    '\0'
                }
            };
            self.add_token(TokenKind::Rune, start, Some(Literal::Rune(rune)));
        } else {
            self.add_token(TokenKind::String, start, Some(Literal::String(value)));
        }
    }
}
