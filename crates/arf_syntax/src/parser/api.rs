/// Lex and parse one file into `module`.
///
/// This is the main public entrypoint for parsing. Diagnostics of the lexer and the parser are
/// appended to `diagnostics`.
///
/// ## Parameters
/// - `source`: The file's text; its path is used in diagnostics.
/// - `module`: The module being assembled; may already hold sections of other files.
/// - `mode`: [`ParseMode::Skim`] stops after the first line of every section.
///
/// ## Errors
/// - [`FrontendError::EmptyFile`] if the file has no tokens besides the `:arf` line.
/// - [`FrontendError::UnexpectedEof`] if the file ends inside its header.
#[tracing::instrument(skip_all, fields(path = %source.path().display(), module = %module.name, ?mode))]
pub fn parse_file(
    source: &Arc<SourceText>,
    module: &mut Module,
    mode: ParseMode,
    diagnostics: &mut Diagnostics,
) -> Result<(), FrontendError> {
    let (lines, lex_diagnostics) = lexer::tokenize(source);
    diagnostics.absorb(lex_diagnostics);

    if lines.is_empty() {
        return Err(FrontendError::EmptyFile {
            path: source.path().to_path_buf(),
        });
    }

    let mut parser = Parser::new(source, &lines, module, mode);
    let result = parser.parse();
    diagnostics.absorb(parser.into_diagnostics());
    result
}
