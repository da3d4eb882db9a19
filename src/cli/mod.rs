//! CLI module for the arf front end
//!
//! ## Usage
//!
//! - `arf <MODULE_PATH>` - parse and analyze a module, print the resolved sections
//! - `arf --lex <FILE>` - print the token lines of one file
//! - `arf --parse <MODULE_PATH> [--skim]` - parse a module and print it re-rendered as arf source
//!
//! A module path is a directory joined with a module name, e.g. `src/shapes`.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::frontend::FrontendConfig;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Front end for the arf language
#[derive(Parser, Debug)]
#[command(name = "arf")]
#[command(version = VERSION)]
#[command(about = "Parse and analyze arf modules", long_about = None)]
pub struct Cli {
    /// Module to analyze (default action)
    #[arg(value_name = "MODULE_PATH", required_unless_present_any = ["lex_file", "parse_module"])]
    pub module_path: Option<PathBuf>,

    /// Tokenize one file and print its lines
    #[arg(long = "lex", value_name = "FILE", conflicts_with_all = ["module_path", "parse_module"])]
    pub lex_file: Option<PathBuf>,

    /// Parse a module and print it as arf source
    #[arg(long = "parse", value_name = "MODULE_PATH", conflicts_with = "module_path")]
    pub parse_module: Option<PathBuf>,

    /// Only parse section heads (with --parse)
    #[arg(long = "skim", requires = "parse_module")]
    pub skim: bool,

    /// Extension of module files
    #[arg(long = "extension", value_name = "EXT", default_value = "arf")]
    pub extension: String,
}

impl Cli {
    /// Loader configuration from the command line.
    pub fn frontend_config(&self) -> FrontendConfig {
        FrontendConfig::new().with_extension(&self.extension)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code != ExitCode::SUCCESS {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
pub fn execute(cli: Cli) -> CliResult<ExitCode> {
    let config = cli.frontend_config();
    tracing::debug!(extension = %config.extension, "frontend configuration");

    if let Some(file) = &cli.lex_file {
        return commands::lex_file(file);
    }
    if let Some(path) = &cli.parse_module {
        return commands::parse_module(path, cli.skim, &config);
    }
    match &cli.module_path {
        Some(path) => commands::analyze_module(path, &config),
        None => Err(CliError::failure("no module path given, see --help")),
    }
}

// ============================================================================
// Tests
// ============================================================================
