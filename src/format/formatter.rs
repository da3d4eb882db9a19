//! Core rendering logic for arf source
//!
//! Walks a [`Module`] and emits source the parser reads back into an equal module.

use arf_core::lang::keywords::{self, HeaderKeyId, SectionId};
use arf_core::lang::punctuation::{self, HeadMarkerId};

use super::config::FormatConfig;
use super::writer::LineWriter;
use crate::frontend::ast::*;

/// Formatter that turns a module back into arf source
pub struct Formatter {
    config: FormatConfig,
    writer: LineWriter,
}

impl Formatter {
    pub fn new(config: FormatConfig) -> Self {
        Self {
            config,
            writer: LineWriter::new(),
        }
    }

    /// Render a module and return the source
    pub fn format(mut self, module: &Module) -> String {
        self.format_header(module);
        self.format_body(module);
        self.writer.finish()
    }

    // ========================================================================
    // Header
    // ========================================================================

    fn format_header(&mut self, module: &Module) {
        self.writer.line(0, [punctuation::MAGIC]);
        self.format_header_field(HeaderKeyId::Module, module.name.clone());
        if !module.author.is_empty() {
            self.format_header_field(HeaderKeyId::Author, quote(&module.author, '"'));
        }
        if !module.license.is_empty() {
            self.format_header_field(HeaderKeyId::License, quote(&module.license, '"'));
        }
        for require in &module.requires {
            self.format_header_field(HeaderKeyId::Require, quote(require, '"'));
        }
    }

    fn format_header_field(&mut self, key: HeaderKeyId, value: String) {
        self.writer.line(0, [keywords::header_key_as_str(key).to_string(), value]);
    }

    // ========================================================================
    // Sections
    // ========================================================================

    fn format_body(&mut self, module: &Module) {
        self.writer.line(0, [punctuation::SEPARATOR]);

        let mut first = true;
        for typedef in module.typedefs.values() {
            self.separate(&mut first);
            self.format_typedef(typedef);
        }
        for data in module.datas.values() {
            self.separate(&mut first);
            let mut words = vec![keywords::section_as_str(SectionId::Data).to_string()];
            words.extend(data_words(data, &data.ty));
            self.writer.line(0, words);
        }
        for function in module.functions.values() {
            self.separate(&mut first);
            self.format_function(function);
        }
    }

    fn separate(&mut self, first: &mut bool) {
        if !*first {
            self.writer.blank_lines(self.config.blank_lines_between_sections);
        }
        *first = false;
    }

    fn format_typedef(&mut self, typedef: &Typedef) {
        self.writer.line(
            0,
            [
                keywords::section_as_str(SectionId::Type).to_string(),
                typedef.permissions.to_string(),
                format!("{}:{}", typedef.name, typedef.inherits),
            ],
        );
        for member in typedef.members.values() {
            self.writer.line(1, data_words(member, &member.ty));
        }
    }

    // ========================================================================
    // Functions
    // ========================================================================

    fn format_function(&mut self, function: &Function) {
        self.writer.line(
            0,
            [
                keywords::section_as_str(SectionId::Func).to_string(),
                function.permissions.to_string(),
                function.name.clone(),
            ],
        );

        if let Some(receiver) = &function.receiver {
            self.writer.line(
                1,
                [
                    punctuation::head_marker_as_str(HeadMarkerId::Receiver).to_string(),
                    format!("{}:{}", receiver.name, receiver.ty),
                ],
            );
        }
        for input in function.inputs.values() {
            self.format_head_line(HeadMarkerId::Input, input, &input.ty);
        }
        for output in function.outputs.values() {
            // Outputs are always mutable; writing `:mut` only earns a warning.
            let mut ty = output.ty.clone();
            ty.mutable = false;
            self.format_head_line(HeadMarkerId::Output, output, &ty);
        }

        if !function.root.items.is_empty() {
            self.writer.line(1, [punctuation::SEPARATOR]);
            self.format_block(&function.root, 1);
        }
    }

    fn format_head_line(&mut self, marker: HeadMarkerId, data: &Data, ty: &Type) {
        let mut words = vec![punctuation::head_marker_as_str(marker).to_string()];
        // Head lines carry no permissions.
        words.extend(data_words(data, ty).skip(1));
        self.writer.line(1, words);
    }

    /// Statements of `block` at `level`, nested blocks one level deeper.
    fn format_block(&mut self, block: &Block, level: usize) {
        for item in &block.items {
            match item {
                BlockItem::Statement(statement) => self.writer.line(level, [format_statement(statement)]),
                BlockItem::Block(child) => self.format_block(child, level + 1),
            }
        }
    }
}

/// `rw name:Type values... [external]`, written as `ty` rather than `data.ty`.
fn data_words<'a>(data: &'a Data, ty: &'a Type) -> impl Iterator<Item = String> + 'a {
    [data.permissions.to_string(), format!("{}:{}", data.name, ty)]
        .into_iter()
        .chain(data.values.iter().map(Literal::to_string))
        .chain(data.external.then(|| keywords::EXTERNAL.to_string()))
}

// ============================================================================
// Statements
// ============================================================================

/// `[command arguments...]`
fn format_statement(statement: &Statement) -> String {
    let mut out = format!("[{}", statement.command);
    for argument in &statement.arguments {
        out.push(' ');
        out.push_str(&format_argument(argument));
    }
    out.push(']');
    out
}

fn format_argument(argument: &Argument) -> String {
    match &argument.kind {
        ArgumentKind::Statement(statement) => format_statement(statement),
        ArgumentKind::Identifier(identifier) => identifier.to_string(),
        ArgumentKind::Definition(definition) => format!("{}:{}", definition.name, definition.ty),
        ArgumentKind::Dereference(dereference) if dereference.offset == 1 => {
            format!("{{{}}}", format_argument(&dereference.argument))
        }
        ArgumentKind::Dereference(dereference) => {
            format!("{{{} {}}}", format_argument(&dereference.argument), dereference.offset)
        }
        ArgumentKind::String(value) => Literal::String(value.clone()).to_string(),
        ArgumentKind::Rune(value) => Literal::Rune(*value).to_string(),
        ArgumentKind::Integer(value) => value.to_string(),
        ArgumentKind::SignedInteger(value) => value.to_string(),
        ArgumentKind::Float(value) => Literal::Float(*value).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arf_core::Permissions;

    fn render(module: &Module) -> String {
        Formatter::new(FormatConfig::default()).format(module)
    }

    fn named(name: &str) -> Type {
        Type::named(Position::default(), Identifier::single(Position::default(), name))
    }

    fn perms(text: &str) -> Permissions {
        text.parse().unwrap()
    }

    #[test]
    fn test_header_only() {
        let mut module = Module::new("demo", "demo");
        module.author = "Ada \"A\" L".into();
        module.requires.push("../shapes".into());
        assert_eq!(
            render(&module),
            ":arf\nmodule demo\nauthor \"Ada \\\"A\\\" L\"\nrequire \"../shapes\"\n---\n"
        );
    }

    #[test]
    fn test_data_with_values_and_external() {
        let mut module = Module::new("demo", "demo");
        let mut data = Data::new(Position::default(), "table", perms("rr"), Type::pointer(Position::default(), named("U8"), 3));
        data.values = vec![Literal::Integer(1), Literal::SignedInteger(-2), Literal::Float(3.0)];
        module.add_data(data).unwrap();
        let mut sym = Data::new(Position::default(), "sym", perms("rn"), named("Int"));
        sym.external = true;
        module.add_data(sym).unwrap();

        assert_eq!(
            render(&module),
            ":arf\nmodule demo\n---\ndata rr table:{U8 3} 1 -2 3.0\ndata rn sym:Int external\n"
        );
    }

    #[test]
    fn test_output_drops_mut_qualifier() {
        let mut module = Module::new("demo", "demo");
        let mut function = Function::new(Position::default(), "get", perms("rr"));
        let mut ty = named("Int");
        ty.mutable = true;
        function
            .add_output(Data::new(Position::default(), "value", Permissions::default(), ty))
            .unwrap();
        module.add_function(function).unwrap();

        assert_eq!(render(&module), ":arf\nmodule demo\n---\nfunc rr get\n        < value:Int\n");
    }

    #[test]
    fn test_statement_arguments() {
        let position = Position::default();
        let inner = Statement {
            position: position.clone(),
            command: Command::Operator("+".into()),
            arguments: vec![
                Argument::new(position.clone(), ArgumentKind::Integer(1)),
                Argument::new(position.clone(), ArgumentKind::Rune('\n')),
            ],
        };
        let statement = Statement {
            position: position.clone(),
            command: Command::External("puts".into()),
            arguments: vec![
                Argument::new(position.clone(), ArgumentKind::Statement(inner)),
                Argument::new(
                    position.clone(),
                    ArgumentKind::Dereference(Dereference {
                        argument: Box::new(Argument::new(
                            position.clone(),
                            ArgumentKind::Identifier(Identifier::single(position.clone(), "buf")),
                        )),
                        offset: 4,
                    }),
                ),
                Argument::new(
                    position.clone(),
                    ArgumentKind::Definition(Definition {
                        name: "n".into(),
                        ty: named("Int"),
                    }),
                ),
            ],
        };
        assert_eq!(format_statement(&statement), "[\"puts\" [+ 1 '\\n'] {buf 4} n:Int]");
    }

    #[test]
    fn test_blank_lines_between_sections() {
        let mut module = Module::new("demo", "demo");
        module.add_data(Data::new(Position::default(), "aa", perms("rr"), named("Int"))).unwrap();
        module.add_data(Data::new(Position::default(), "bb", perms("rr"), named("Int"))).unwrap();
        let config = FormatConfig::new().with_blank_lines_between_sections(1);
        let out = Formatter::new(config).format(&module);
        assert_eq!(out, ":arf\nmodule demo\n---\ndata rr aa:Int\n\ndata rr bb:Int\n");
    }
}
