/// Cursor helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Looking at the cursor (`line`, `token`, `kind`, `position`)
/// - Moving the cursor (`next_token`, `next_line`)
/// - `expect`, which reports "unexpected X. expected A, B, or C"
/// - Section-level recovery (`skip_to_indent`, `skip_section`)
impl<'a> Parser<'a> {
    // ========================================================================
    // Cursor
    // ========================================================================

    fn line(&self) -> Option<&'a Line> {
        self.lines.get(self.line_index)
    }

    /// Return the current token, or `None` at end of line and end of file.
    fn token(&self) -> Option<&'a Token> {
        self.line()?.tokens.get(self.token_index)
    }

    /// Kind of the current token; [`TokenKind::None`] at end of line.
    fn kind(&self) -> TokenKind {
        self.token().map_or(TokenKind::None, |token| token.kind)
    }

    fn indent(&self) -> Option<usize> {
        self.line().map(|line| line.indent)
    }

    fn end_of_file(&self) -> bool {
        self.line_index >= self.lines.len()
    }

    fn end_of_line(&self) -> bool {
        self.token().is_none()
    }

    fn next_token(&mut self) {
        if !self.end_of_line() {
            self.token_index += 1;
        }
    }

    /// Move to the start of the next line. Returns `false` once the file is exhausted.
    fn next_line(&mut self) -> bool {
        if !self.end_of_file() {
            self.line_index += 1;
        }
        self.token_index = 0;
        !self.end_of_file()
    }

    /// Position of the current token, of the end of the line, or of the end of the file.
    fn position(&self) -> Position {
        match self.line() {
            Some(line) => {
                let column = self.token().map_or(line.end_column, |token| token.column);
                Position::new(self.source, line.row, column)
            }
            None => match self.lines.last() {
                Some(last) => Position::new(self.source, last.row, last.end_column),
                None => Position::new(self.source, 0, 0),
            },
        }
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn error(&mut self, message: impl Into<String>, position: Position) {
        self.diagnostics.error(message, position);
    }

    fn warning(&mut self, message: impl Into<String>, position: Position) {
        self.diagnostics.warning(message, position);
    }

    /// Check that the current token is one of `kinds` without consuming it.
    ///
    /// An empty `kinds` expects the end of the line. On a mismatch the error is reported at the
    /// current position and `false` is returned; the cursor does not move.
    fn expect(&mut self, kinds: &[TokenKind]) -> bool {
        if !self.end_of_file() {
            let kind = self.kind();
            let matched = if kinds.is_empty() {
                kind == TokenKind::None
            } else {
                kinds.contains(&kind)
            };
            if matched {
                return true;
            }
        }

        let mut message = if self.end_of_file() {
            "unexpected end of file.".to_string()
        } else if self.end_of_line() {
            "unexpected end of line.".to_string()
        } else {
            format!("unexpected {} token.", self.kind())
        };

        if kinds.is_empty() {
            message.push_str(" expected end of line");
        } else if kinds.len() < 6 {
            message.push_str(" expected ");
            message.push_str(&expected_list(kinds));
        }

        let position = self.position();
        self.error(message, position);
        false
    }

    // ========================================================================
    // Recovery
    // ========================================================================

    /// Skip to the next line indented at most `max` levels (or the end of the file).
    ///
    /// Always leaves the current line.
    fn skip_to_indent(&mut self, max: usize) {
        while self.next_line() {
            if self.indent().is_some_and(|indent| indent <= max) {
                break;
            }
        }
    }

    /// Skip the rest of the current section.
    fn skip_section(&mut self) {
        self.skip_to_indent(0);
    }
}

/// Render `kinds` as "a", "a or b", or "a, b, or c".
fn expected_list(kinds: &[TokenKind]) -> String {
    match kinds {
        [] => String::new(),
        [only] => only.describe().to_string(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => {
            let rest: Vec<_> = rest.iter().map(|kind| kind.describe()).collect();
            format!("{}, or {last}", rest.join(", "))
        }
    }
}
