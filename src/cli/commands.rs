//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Arc;

use crate::format::render_module;
use crate::frontend::analyzer;
use crate::frontend::cache::ModuleCache;
use crate::frontend::diagnostics::{ColorMode, Diagnostics, FrontendError, format_diagnostic};
use crate::frontend::module::{FsLoader, load_module, scan_module_name};
use crate::frontend::parser::ParseMode;
use crate::frontend::source::SourceText;
use crate::frontend::{FrontendConfig, lexer};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path.display(), e)))
}

// ============================================================================
// Commands
// ============================================================================

/// Tokenize one file and print its lines (debug)
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let text = read_source(file_path)?;
    let module_name = scan_module_name(&text).unwrap_or_default();
    let source = Arc::new(SourceText::new(file_path, module_name, &text));

    let (lines, diagnostics) = lexer::tokenize(&source);
    for line in &lines {
        print!("{line}");
    }

    report(&diagnostics);
    Ok(exit_code_for(&diagnostics))
}

/// Parse a module and print it re-rendered as arf source (debug)
pub fn parse_module(module_path: &Path, skim: bool, config: &FrontendConfig) -> CliResult<ExitCode> {
    let loader = FsLoader::new(config.clone());
    let mode = if skim { ParseMode::Skim } else { ParseMode::Full };

    let mut diagnostics = Diagnostics::new();
    let module = load_module(&loader, module_path, mode, &mut diagnostics).map_err(fatal_error)?;
    print!("{}", render_module(&module));

    report(&diagnostics);
    Ok(exit_code_for(&diagnostics))
}

/// Parse and analyze a module, then print the resolved sections
pub fn analyze_module(module_path: &Path, config: &FrontendConfig) -> CliResult<ExitCode> {
    let loader = FsLoader::new(config.clone());
    let mut cache = ModuleCache::new();

    let mut diagnostics = Diagnostics::new();
    let tree = analyzer::analyze(&mut cache, &loader, module_path, &mut diagnostics).map_err(fatal_error)?;
    print!("{tree}");

    report(&diagnostics);
    eprintln!("{}", summary(&diagnostics));
    Ok(exit_code_for(&diagnostics))
}

// ============================================================================
// Reporting
// ============================================================================

/// Print every diagnostic to stderr, colored when stderr is a terminal.
fn report(diagnostics: &Diagnostics) {
    let mode = if std::io::stderr().is_terminal() {
        ColorMode::Ansi
    } else {
        ColorMode::Plain
    };
    for diagnostic in diagnostics {
        eprint!("{}", format_diagnostic(diagnostic, mode));
    }
}

/// The closing totals line.
pub fn summary(diagnostics: &Diagnostics) -> String {
    format!(
        "{} warnings and {} errors",
        diagnostics.warning_count(),
        diagnostics.error_count()
    )
}

fn exit_code_for(diagnostics: &Diagnostics) -> ExitCode {
    if diagnostics.has_errors() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Render a fatal front-end error with its code and help text.
fn fatal_error(err: FrontendError) -> CliError {
    let report = miette::Report::new(err);
    CliError::failure(format!("{report:?}"))
}
