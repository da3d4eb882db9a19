/// Body sections: `data`, `type` and `func`.
///
/// ## Notes
/// - Every section starts on an unindented line. A section parser leaves the cursor on the next
///   unindented line (or at the end of the file), whether it succeeded or not.
/// - A section that fails to parse is dropped and the rest of its lines are skipped.
/// - Default values follow the declaration on the same line and may continue on lines indented
///   deeper than the line that started them.
impl<'a> Parser<'a> {
    // ========================================================================
    // Body
    // ========================================================================

    fn parse_body(&mut self) {
        while let Some(line) = self.line() {
            let position = self.position();
            if line.indent != 0 {
                self.error("this line should not be indented", position);
                self.skip_section();
                continue;
            }

            if !self.expect(&[TokenKind::Name]) {
                self.skip_section();
                continue;
            }
            let Some(keyword) = self.token() else {
                self.skip_section();
                continue;
            };

            match keywords::section_from_str(&keyword.text) {
                Some(SectionId::Data) => {
                    self.next_token();
                    if let Some(data) = self.parse_data_section(position.clone()) {
                        if let Err(err) = self.module.add_data(data) {
                            self.error(err.to_string(), position);
                        }
                    }
                }
                Some(SectionId::Type) => {
                    self.next_token();
                    if let Some(typedef) = self.parse_typedef_section(position.clone()) {
                        if let Err(err) = self.module.add_typedef(typedef) {
                            self.error(err.to_string(), position);
                        }
                    }
                }
                Some(SectionId::Func) => {
                    self.next_token();
                    if let Some(function) = self.parse_function_section(position.clone()) {
                        if let Err(err) = self.module.add_function(function) {
                            self.error(err.to_string(), position);
                        }
                    }
                }
                None => {
                    self.error(format!("unknown section type \"{}\"", keyword.text), position);
                    self.skip_section();
                }
            }
        }
    }

    // ========================================================================
    // Shared pieces
    // ========================================================================

    fn parse_permissions(&mut self) -> Option<Permissions> {
        if !self.expect(&[TokenKind::Permission]) {
            return None;
        }
        let token = self.token()?;
        match token.text.parse::<Permissions>() {
            Ok(permissions) => {
                self.next_token();
                Some(permissions)
            }
            Err(err) => {
                let position = self.position();
                self.error(err.to_string(), position);
                None
            }
        }
    }

    /// Parse `name:Type`.
    fn parse_declaration(&mut self) -> Option<(String, Type)> {
        if !self.expect(&[TokenKind::Name]) {
            return None;
        }
        let name = self.token()?.text.clone();
        self.next_token();

        if !self.expect(&[TokenKind::Colon]) {
            return None;
        }
        self.next_token();

        let ty = self.parse_type()?;
        Some((name, ty))
    }

    /// Read the values on the rest of this line into `data`.
    fn parse_values_on_line(&mut self, data: &mut Data) -> bool {
        loop {
            if self.token().is_some_and(|token| token.is_name(keywords::EXTERNAL)) {
                data.external = true;
                self.next_token();
                continue;
            }

            if !self.expect(VALUE_KINDS) {
                return false;
            }
            let Some(token) = self.token() else {
                return true;
            };
            if let Some(literal) = &token.literal {
                data.values.push(literal.clone());
            }
            self.next_token();
        }
    }

    /// Read values up to the end of the line and on every following line indented deeper than
    /// `parent_indent`. Leaves the cursor on the first line that is not a continuation.
    fn parse_default_values(&mut self, parent_indent: usize, data: &mut Data) -> bool {
        if !self.parse_values_on_line(data) {
            return false;
        }
        while self.next_line() && self.indent().is_some_and(|indent| indent > parent_indent) {
            if !self.parse_values_on_line(data) {
                return false;
            }
        }
        true
    }

    // ========================================================================
    // data
    // ========================================================================

    /// `data PP name:Type values...`; the keyword has been consumed.
    fn parse_data_section(&mut self, position: Position) -> Option<Data> {
        let Some(permissions) = self.parse_permissions() else {
            self.skip_section();
            return None;
        };
        let Some((name, ty)) = self.parse_declaration() else {
            self.skip_section();
            return None;
        };

        let mut data = Data::new(position, name, permissions, ty);
        if self.mode == ParseMode::Skim {
            self.skip_section();
            return Some(data);
        }

        if !self.parse_default_values(0, &mut data) {
            self.skip_section();
            return None;
        }
        Some(data)
    }

    // ========================================================================
    // type
    // ========================================================================

    /// `type PP name:Inherits` followed by members at indent 1; the keyword has been consumed.
    fn parse_typedef_section(&mut self, position: Position) -> Option<Typedef> {
        let Some(permissions) = self.parse_permissions() else {
            self.skip_section();
            return None;
        };
        let Some((name, inherits)) = self.parse_declaration() else {
            self.skip_section();
            return None;
        };

        let mut typedef = Typedef::new(position, name, permissions, inherits);
        if self.mode == ParseMode::Skim {
            self.skip_section();
            return Some(typedef);
        }

        if !self.expect(&[]) {
            self.skip_section();
            return None;
        }
        self.next_line();

        while let Some(line) = self.line() {
            if line.indent == 0 {
                break;
            }
            let member_position = self.position();
            if line.indent > 1 {
                self.error("this line is indented too far", member_position);
                self.skip_to_indent(1);
                continue;
            }

            match self.parse_member() {
                Some(member) => {
                    if let Err(err) = typedef.add_member(member) {
                        self.error(err.to_string(), member_position);
                    }
                }
                None => self.skip_to_indent(1),
            }
        }

        Some(typedef)
    }

    /// `[data] PP name:Type values...` at indent 1.
    fn parse_member(&mut self) -> Option<Data> {
        if self
            .token()
            .is_some_and(|token| token.is_name(keywords::section_as_str(SectionId::Data)))
        {
            self.next_token();
        }

        let position = self.position();
        let permissions = self.parse_permissions()?;
        let (name, ty) = self.parse_declaration()?;

        let mut member = Data::new(position, name, permissions, ty);
        if !self.parse_default_values(1, &mut member) {
            return None;
        }
        Some(member)
    }
}
