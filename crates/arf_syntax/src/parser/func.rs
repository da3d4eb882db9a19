/// Function sections.
///
/// ```text
/// func rw area
///         @ rectangle:{Rectangle}
///         > scale:Int 1
///         < result:Int
///         ---
///         [= result [* rectangle.width rectangle.height]]
/// ```
///
/// The head lists the receiver (`@`), inputs (`>`) and outputs (`<`) at indent 1; `---` ends the
/// head and the body follows as the function's root block.
impl<'a> Parser<'a> {
    /// `func PP name`; the keyword has been consumed.
    fn parse_function_section(&mut self, position: Position) -> Option<Function> {
        let Some(permissions) = self.parse_permissions() else {
            self.skip_section();
            return None;
        };
        if !self.expect(&[TokenKind::Name]) {
            self.skip_section();
            return None;
        }
        let name = self.token()?.text.clone();
        self.next_token();
        if !self.expect(&[]) {
            self.skip_section();
            return None;
        }

        let mut function = Function::new(position, name, permissions);
        if self.mode == ParseMode::Skim {
            self.skip_section();
            return Some(function);
        }
        self.next_line();

        loop {
            let Some(line) = self.line() else {
                return Some(function);
            };
            if line.indent == 0 {
                return Some(function);
            }
            if line.indent > 1 {
                let position = self.position();
                self.error("this line is indented too far", position);
                self.skip_to_indent(1);
                continue;
            }

            if !self.expect(&[TokenKind::Separator, TokenKind::Symbol]) {
                self.skip_to_indent(1);
                continue;
            }
            if self.kind() == TokenKind::Separator {
                self.next_token();
                self.expect(&[]);
                self.next_line();
                break;
            }
            self.parse_head_item(&mut function);
        }

        function.root = self.parse_block(0);
        Some(function)
    }

    /// One `@`, `>` or `<` line. Leaves the cursor on the next line at indent 1 or less.
    fn parse_head_item(&mut self, function: &mut Function) {
        let Some(symbol) = self.token() else {
            self.skip_to_indent(1);
            return;
        };
        let position = self.position();
        let Some(marker) = punctuation::head_marker_from_str(&symbol.text) else {
            let message = format!(
                "unknown argument type symbol '{}', use either '@', '>', or '<'",
                symbol.text
            );
            self.error(message, position);
            self.skip_to_indent(1);
            return;
        };
        self.next_token();

        let Some((name, ty)) = self.parse_declaration() else {
            self.skip_to_indent(1);
            return;
        };

        match marker {
            HeadMarkerId::Receiver => {
                if !ty.is_pointer() {
                    self.error("method receiver must be a pointer", ty.position.clone());
                } else if ty.mutable {
                    self.error("method receiver cannot be mutable", ty.position.clone());
                } else if function.receiver.is_some() {
                    self.error("method already has a receiver", position.clone());
                } else {
                    function.receiver = Some(Receiver { position, name, ty });
                }
                if self.expect(&[]) {
                    self.next_line();
                } else {
                    self.skip_to_indent(1);
                }
            }
            HeadMarkerId::Input => {
                let mutable = ty.mutable;
                let type_position = ty.position.clone();
                let mut input = Data::new(position.clone(), name, Permissions::default(), ty);
                if !self.parse_default_values(1, &mut input) {
                    self.skip_to_indent(1);
                    return;
                }
                if mutable {
                    self.error("function arguments cannot be mutable", type_position);
                    return;
                }
                if let Err(err) = function.add_input(input) {
                    self.error(err.to_string(), position);
                }
            }
            HeadMarkerId::Output => {
                if ty.mutable {
                    self.warning(
                        "you don't need to mark return values as mutable, they will be anyways",
                        ty.position.clone(),
                    );
                }
                let mut output = Data::new(position.clone(), name, Permissions::default(), ty);
                output.ty.mutable = true;
                if !self.parse_default_values(1, &mut output) {
                    self.skip_to_indent(1);
                    return;
                }
                if let Err(err) = function.add_output(output) {
                    self.error(err.to_string(), position);
                }
            }
        }
    }
}
