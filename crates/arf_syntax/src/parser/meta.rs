/// File header parsing.
///
/// The header is a run of unindented `key value` lines closed by `---`:
///
/// ```text
/// :arf
/// module geometry
/// author "someone"
/// license "MIT"
/// require "./vectors"
/// ---
/// ```
impl<'a> Parser<'a> {
    /// Parse header lines up to and including the `---` separator.
    fn parse_meta(&mut self) -> Result<(), FrontendError> {
        loop {
            let Some(line) = self.line() else {
                return Err(FrontendError::UnexpectedEof {
                    path: self.source.path().to_path_buf(),
                });
            };

            if line.indent != 0 {
                let position = self.position();
                self.error("this line should not be indented", position);
                self.next_line();
                continue;
            }

            if !self.expect(&[TokenKind::Name, TokenKind::Separator]) {
                self.next_line();
                continue;
            }

            if self.kind() == TokenKind::Separator {
                self.next_token();
                self.expect(&[]);
                self.next_line();
                return Ok(());
            }

            self.parse_header_field();
            self.next_line();
        }
    }

    /// Parse one `key value` line. The current token is the key.
    fn parse_header_field(&mut self) {
        let Some(key) = self.token() else {
            return;
        };
        let key_position = self.position();
        self.next_token();

        if !self.expect(&[TokenKind::Name, TokenKind::String]) {
            return;
        }
        let Some(value_token) = self.token() else {
            return;
        };
        let value_position = self.position();
        let value = value_token
            .string_value()
            .unwrap_or(value_token.text.as_str())
            .to_string();

        match keywords::header_key_from_str(&key.text) {
            Some(HeaderKeyId::Module) => {
                if value != self.module.name {
                    let message = format!("module name \"{value}\" does not match \"{}\"", self.module.name);
                    self.error(message, value_position);
                }
            }
            Some(HeaderKeyId::Author) => self.module.author = value,
            Some(HeaderKeyId::License) => self.module.license = value,
            Some(HeaderKeyId::Require) => self.module.requires.push(value),
            None => {
                tracing::debug!(key = %key.text, "skipping unknown header directive");
                self.warning("unknown header directive", key_position);
            }
        }

        self.next_token();
        self.expect(&[]);
    }
}
