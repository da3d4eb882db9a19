/// Function bodies: blocks and statements.
///
/// ## Notes
/// - A statement sits one level deeper than its block; a line two levels deeper opens a nested
///   block. Anything deeper is an error.
/// - A statement is `command args...` up to the end of the line, or `[command args...]`, which may
///   continue over several lines until its bracket closes.
/// - Arguments: nested `[...]` statements, dotted identifiers, `name:Type` definitions,
///   `{argument N}` dereferences and literals.
/// - A definition adds a variable to the block the statement belongs to.
impl<'a> Parser<'a> {
    /// Parse lines indented deeper than `parent_indent` into a block.
    fn parse_block(&mut self, parent_indent: usize) -> Block {
        let mut block = Block::new(self.position());

        while let Some(line) = self.line() {
            let indent = line.indent;
            if indent <= parent_indent {
                break;
            }

            if indent == parent_indent + 1 {
                if let Some(statement) = self.parse_statement(indent, &mut block) {
                    block.items.push(BlockItem::Statement(statement));
                }
            } else if indent == parent_indent + 2 {
                let child = self.parse_block(parent_indent + 1);
                block.items.push(BlockItem::Block(child));
            } else {
                let position = self.position();
                self.error("this line is indented too far", position);
                self.next_line();
            }
        }

        block
    }

    /// Parse the statement starting this line. Leaves the cursor on the line after it.
    fn parse_statement(&mut self, indent: usize, scope: &mut Block) -> Option<Statement> {
        self.depth = 0;
        self.statement_indent = indent;
        if !self.expect(&[
            TokenKind::LBracket,
            TokenKind::Name,
            TokenKind::String,
            TokenKind::Symbol,
        ]) {
            self.recover_statement(indent);
            return None;
        }

        let bracketed = self.kind() == TokenKind::LBracket;
        if bracketed {
            self.next_token();
            self.depth = 1;
        }

        let Some(statement) = self.parse_call(scope, bracketed) else {
            self.recover_statement(indent);
            return None;
        };

        self.expect(&[]);
        self.next_line();
        Some(statement)
    }

    /// Parse a command and its arguments.
    ///
    /// A bracketed call runs until its `]`, which it consumes; otherwise the call ends with the
    /// line. A bracketed call that reaches a line indented less than its statement is unclosed.
    fn parse_call(&mut self, scope: &mut Block, bracketed: bool) -> Option<Statement> {
        let position = self.position();
        if !self.expect(&[TokenKind::Name, TokenKind::String, TokenKind::Symbol]) {
            return None;
        }

        let token = self.token()?;
        let command = match token.kind {
            TokenKind::String => {
                let name = token.string_value().unwrap_or_default().to_string();
                self.next_token();
                Command::External(name)
            }
            TokenKind::Symbol => {
                self.next_token();
                Command::Operator(token.text.clone())
            }
            _ => Command::Identifier(self.parse_identifier()?),
        };

        let mut statement = Statement {
            position: position.clone(),
            command,
            arguments: Vec::new(),
        };

        let accepted = if bracketed {
            BRACKETED_ARGUMENT_KINDS
        } else {
            ARGUMENT_KINDS
        };
        loop {
            if !self.expect(accepted) {
                return None;
            }
            match self.kind() {
                TokenKind::None => {
                    if !bracketed {
                        break;
                    }
                    let end = self.position();
                    self.next_line();
                    if self.indent().is_some_and(|next| next < self.statement_indent) {
                        self.diagnostics.push(
                            Diagnostic::error("missing `]` at end of statement", end)
                                .with_note(format!("the statement starts on line {}", position.row + 1)),
                        );
                        return None;
                    }
                }
                TokenKind::RBracket => {
                    self.next_token();
                    self.depth = self.depth.saturating_sub(1);
                    break;
                }
                TokenKind::Colon => self.parse_definition(&mut statement, scope)?,
                _ => {
                    let argument = self.parse_argument(scope)?;
                    statement.arguments.push(argument);
                }
            }
        }

        Some(statement)
    }

    /// Turn the previous argument into a `name:Type` definition. The current token is the colon.
    fn parse_definition(&mut self, statement: &mut Statement, scope: &mut Block) -> Option<()> {
        let colon = self.position();
        let previous = statement.arguments.pop();
        self.next_token();
        let ty = self.parse_type()?;

        let Some(previous) = previous else {
            self.error("type specifier may only follow an identifier", colon);
            return Some(());
        };
        let ArgumentKind::Identifier(identifier) = &previous.kind else {
            self.error("type specifier may only follow an identifier", colon);
            return Some(());
        };
        let Some(name) = identifier.as_single().map(str::to_string) else {
            self.error(
                "cannot use member selection in definition, name cannot have dots in it",
                previous.position,
            );
            return Some(());
        };

        let variable = Variable {
            position: previous.position.clone(),
            name: name.clone(),
            ty: ty.clone(),
        };
        if let Err(err) = scope.add_variable(variable) {
            self.error(err.to_string(), previous.position.clone());
        }

        statement.arguments.push(Argument::new(
            previous.position,
            ArgumentKind::Definition(Definition { name, ty }),
        ));
        Some(())
    }

    /// Parse one argument that is not a definition.
    fn parse_argument(&mut self, scope: &mut Block) -> Option<Argument> {
        let position = self.position();
        let token = self.token()?;
        let kind = match token.kind {
            TokenKind::LBracket => {
                self.next_token();
                self.depth += 1;
                ArgumentKind::Statement(self.parse_call(scope, true)?)
            }
            TokenKind::LBrace => ArgumentKind::Dereference(self.parse_dereference(scope)?),
            TokenKind::Name => ArgumentKind::Identifier(self.parse_identifier()?),
            kind if kind.is_literal() => {
                let literal = token.literal.clone()?;
                self.next_token();
                literal.into()
            }
            _ => {
                self.expect(VALUE_ARGUMENT_KINDS);
                return None;
            }
        };
        Some(Argument::new(position, kind))
    }

    /// `{argument}` or `{argument N}`. The current token is the `{`.
    fn parse_dereference(&mut self, scope: &mut Block) -> Option<Dereference> {
        self.next_token();
        if !self.expect(VALUE_ARGUMENT_KINDS) {
            return None;
        }
        let argument = self.parse_argument(scope)?;

        if !self.expect(&[TokenKind::RBrace, TokenKind::Integer]) {
            return None;
        }
        let mut offset = 1;
        if let Some(value) = self.token().and_then(Token::integer_value) {
            offset = value;
            self.next_token();
            if !self.expect(&[TokenKind::RBrace]) {
                return None;
            }
        }
        self.next_token();

        Some(Dereference {
            argument: Box::new(argument),
            offset,
        })
    }

    /// Skip what is left of a malformed statement.
    ///
    /// Without open brackets that is the rest of the line. Otherwise tokens are skipped, across
    /// lines, until the brackets balance, stopping early on a line indented less than the
    /// statement (the current one included) so the enclosing block can continue from there.
    fn recover_statement(&mut self, indent: usize) {
        let mut depth = self.depth;
        self.depth = 0;
        if self.indent().is_some_and(|current| current < indent) {
            self.token_index = 0;
            return;
        }
        if depth == 0 {
            self.next_line();
            return;
        }

        loop {
            if self.end_of_file() {
                return;
            }
            let Some(token) = self.token() else {
                if !self.next_line() {
                    return;
                }
                if self.indent().is_some_and(|next| next < indent) {
                    return;
                }
                continue;
            };

            match token.kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.next_token();
            if depth == 0 {
                self.next_line();
                return;
            }
        }
    }
}

/// Tokens that may start an argument (or end an unbracketed statement).
const ARGUMENT_KINDS: &[TokenKind] = &[
    TokenKind::None,
    TokenKind::LBracket,
    TokenKind::Colon,
    TokenKind::LBrace,
    TokenKind::Name,
    TokenKind::String,
    TokenKind::Rune,
    TokenKind::Integer,
    TokenKind::SignedInteger,
    TokenKind::Float,
];

const BRACKETED_ARGUMENT_KINDS: &[TokenKind] = &[
    TokenKind::None,
    TokenKind::RBracket,
    TokenKind::LBracket,
    TokenKind::Colon,
    TokenKind::LBrace,
    TokenKind::Name,
    TokenKind::String,
    TokenKind::Rune,
    TokenKind::Integer,
    TokenKind::SignedInteger,
    TokenKind::Float,
];

/// Tokens that may start a value: anything but a definition.
const VALUE_ARGUMENT_KINDS: &[TokenKind] = &[
    TokenKind::LBracket,
    TokenKind::LBrace,
    TokenKind::Name,
    TokenKind::String,
    TokenKind::Rune,
    TokenKind::Integer,
    TokenKind::SignedInteger,
    TokenKind::Float,
];
