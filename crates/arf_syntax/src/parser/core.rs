/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type, the [`ParseMode`] switch and the top-level `parse()`
/// that walks the header and then the body.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single “god file”.

/// How much of each section to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Everything: default values, typedef members, function heads and bodies.
    #[default]
    Full,
    /// The header, plus only the first line of every section (`data PP name:Type`,
    /// `type PP name:Type`, `func PP name`).
    Skim,
}

/// Parser state for one file.
///
/// ## Notes
/// - The cursor is a (line, token) pair. Being past the last token of a line is "end of line"
///   ([`TokenKind::None`]); being past the last line is "end of file".
/// - Grammar functions report their own errors and return `None`/`false`; the caller decides how
///   far to skip.
pub struct Parser<'a> {
    source: &'a Arc<SourceText>,
    lines: &'a [Line],
    line_index: usize,
    token_index: usize,
    /// Open brackets of the statement being parsed, for recovery.
    depth: usize,
    /// Indentation level of the statement being parsed; a bracketed call may not continue onto a
    /// line below it.
    statement_indent: usize,
    mode: ParseMode,
    module: &'a mut Module,
    diagnostics: Diagnostics,
}

impl<'a> Parser<'a> {
    /// Create a parser that adds what it finds in `lines` to `module`.
    pub fn new(source: &'a Arc<SourceText>, lines: &'a [Line], module: &'a mut Module, mode: ParseMode) -> Self {
        Self {
            source,
            lines,
            line_index: 0,
            token_index: 0,
            depth: 0,
            statement_indent: 0,
            mode,
            module,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Parse the header and the body.
    ///
    /// ## Errors
    /// Returns [`FrontendError::UnexpectedEof`] if the file ends before the header's `---`.
    /// Everything else is recoverable and only reported.
    pub fn parse(&mut self) -> Result<(), FrontendError> {
        self.parse_meta()?;
        self.parse_body();
        Ok(())
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }
}
