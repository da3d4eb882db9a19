//! Diagnostics and error reporting for the arf front end.
//!
//! Recoverable problems are collected as [`Diagnostic`]s in a [`Diagnostics`] sink and counted; the
//! front end keeps going after them. Problems that stop a file or a whole module from being read are
//! [`FrontendError`]s.

use std::fmt;
use std::fmt::Write as _;
use std::path::PathBuf;

use thiserror::Error;

use crate::source::Position;

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Warning,
    Error,
    /// The file or module could not be processed further.
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// A single warning or error, optionally anchored to a source position.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub position: Option<Position>,
    pub notes: Vec<String>,
    pub hints: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>, position: Option<Position>) -> Self {
        Self {
            severity,
            message: message.into(),
            position,
            notes: Vec::new(),
            hints: Vec::new(),
        }
    }

    pub fn warning(message: impl Into<String>, position: Position) -> Self {
        Self::new(Severity::Warning, message, Some(position))
    }

    pub fn error(message: impl Into<String>, position: Position) -> Self {
        Self::new(Severity::Error, message, Some(position))
    }

    /// Record a fatal front-end error so it is counted and printed with the rest.
    pub fn fatal(error: &FrontendError) -> Self {
        Self::new(Severity::Fatal, error.to_string(), None)
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error | Severity::Fatal)
    }
}

/// Ordered collection of diagnostics with warning and error counts.
///
/// Each stage owns one sink and hands it up to its caller, which [`absorb`](Diagnostics::absorb)s
/// it. Counts therefore add up from lexer to parser to loader to analyzer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(severity = %diagnostic.severity, message = %diagnostic.message, "diagnostic");
        self.items.push(diagnostic);
    }

    pub fn warning(&mut self, message: impl Into<String>, position: Position) {
        self.push(Diagnostic::warning(message, position));
    }

    pub fn error(&mut self, message: impl Into<String>, position: Position) {
        self.push(Diagnostic::error(message, position));
    }

    pub fn fatal(&mut self, error: &FrontendError) {
        self.push(Diagnostic::fatal(error));
    }

    /// Move every diagnostic of `other` into this sink.
    pub fn absorb(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    pub fn warning_count(&self) -> usize {
        self.items.iter().filter(|d| d.severity == Severity::Warning).count()
    }

    /// Errors and fatal errors.
    pub fn error_count(&self) -> usize {
        self.items.iter().filter(|d| d.is_error()).count()
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Return `true` if some diagnostic message contains `needle`.
    pub fn contains_message(&self, needle: &str) -> bool {
        self.items.iter().any(|d| d.message.contains(needle))
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Errors that stop a file or a module from being processed.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum FrontendError {
    #[error("could not read {}", path.display())]
    #[diagnostic(code(arf::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("there are no files in module \"{module}\"")]
    #[diagnostic(
        code(arf::empty_module),
        help("a module file starts with `:arf` and declares `module {module}` in its header")
    )]
    EmptyModule { module: String },

    #[error("file {} is devoid of content", path.display())]
    #[diagnostic(code(arf::empty_file))]
    EmptyFile { path: PathBuf },

    #[error("\"{name}\" is not a valid module name")]
    #[diagnostic(
        code(arf::invalid_module_name),
        help("module names start with a letter, are at least two characters long and only use letters and digits")
    )]
    InvalidModuleName { name: String },

    #[error("file {} terminated unexpectedly", path.display())]
    #[diagnostic(code(arf::unexpected_eof), help("the header of every file must end with a `---` line"))]
    UnexpectedEof { path: PathBuf },
}

/// Colors used by [`format_diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    #[default]
    Plain,
    Ansi,
}

struct Palette {
    kind: &'static str,
    cyan: &'static str,
    bold: &'static str,
    reset: &'static str,
}

impl Palette {
    fn new(mode: ColorMode, severity: Severity) -> Self {
        match mode {
            ColorMode::Plain => Self {
                kind: "",
                cyan: "",
                bold: "",
                reset: "",
            },
            ColorMode::Ansi => Self {
                kind: match severity {
                    Severity::Warning => "\x1b[33m",
                    Severity::Error | Severity::Fatal => "\x1b[31m",
                },
                cyan: "\x1b[36m",
                bold: "\x1b[1m",
                reset: "\x1b[0m",
            },
        }
    }
}

/// Render a diagnostic with its source line and a caret under the reported column.
///
/// Rows and columns are printed 1-based.
pub fn format_diagnostic(diagnostic: &Diagnostic, mode: ColorMode) -> String {
    let Palette {
        kind,
        cyan,
        bold,
        reset,
    } = Palette::new(mode, diagnostic.severity);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{bold}{kind}{severity}{reset}{bold}: {message}{reset}",
        severity = diagnostic.severity,
        message = diagnostic.message,
    );

    if let Some(position) = &diagnostic.position {
        let row = position.row + 1;
        let column = position.column + 1;
        match position.path() {
            Some(path) => {
                let _ = writeln!(out, "  {cyan}-->{reset} {}:{row}:{column}", path.display());
            }
            None => {
                let _ = writeln!(out, "  {cyan}-->{reset} {row}:{column}");
            }
        }

        if let Some(line_text) = position.line_text() {
            let width = row.to_string().len();
            let _ = writeln!(out, "  {cyan}{:>width$} |{reset}", "");
            let _ = writeln!(out, "  {cyan}{row:>width$} |{reset} {line_text}");
            let _ = writeln!(
                out,
                "  {cyan}{:>width$} |{reset} {}{kind}^{reset}",
                "",
                " ".repeat(position.column),
            );
        }
    }

    for note in &diagnostic.notes {
        let _ = writeln!(out, "  {cyan}= note:{reset} {note}");
    }
    for hint in &diagnostic.hints {
        let _ = writeln!(out, "  {cyan}= hint:{reset} {hint}");
    }

    out
}
