/// Identifier and type parsing.
///
/// - Identifiers: `name`, `module.name`, `a.b.c`
/// - Types: `Int`, `geometry.Point`, `{Int}`, `{Byte 64}`, `{{Int}}`, each optionally followed by
///   `:mut`
impl<'a> Parser<'a> {
    /// Parse a dotted identifier.
    fn parse_identifier(&mut self) -> Option<Identifier> {
        let position = self.position();
        let mut trail = Vec::new();
        loop {
            if !self.expect(&[TokenKind::Name]) {
                return None;
            }
            trail.push(self.token()?.text.clone());
            self.next_token();

            if self.kind() != TokenKind::Dot {
                return Some(Identifier::new(position, trail));
            }
            self.next_token();
        }
    }

    /// Parse a type specifier and its optional qualifier.
    fn parse_type(&mut self) -> Option<Type> {
        let position = self.position();
        if !self.expect(&[TokenKind::Name, TokenKind::LBrace]) {
            return None;
        }

        let mut ty = if self.kind() == TokenKind::LBrace {
            self.next_token();
            let points_to = self.parse_type()?;

            if !self.expect(&[TokenKind::RBrace, TokenKind::Integer]) {
                return None;
            }
            let mut items = 1;
            if let Some(count) = self.token().and_then(Token::integer_value) {
                items = count;
                self.next_token();
                if !self.expect(&[TokenKind::RBrace]) {
                    return None;
                }
            }
            self.next_token();
            Type::pointer(position, points_to, items)
        } else {
            let name = self.parse_identifier()?;
            Type::named(position, name)
        };

        if self.kind() == TokenKind::Colon {
            self.next_token();
            if !self.expect(&[TokenKind::Name]) {
                return None;
            }
            let qualifier = self.token()?;
            match keywords::qualifier_from_str(&qualifier.text) {
                Some(QualifierId::Mut) => ty.mutable = true,
                None => {
                    let position = self.position();
                    self.error(format!("unknown type qualifier :{}", qualifier.text), position);
                }
            }
            self.next_token();
        }

        Some(ty)
    }
}
