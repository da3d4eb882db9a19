#![forbid(unsafe_code)]
//! arf Programming Language Front End
//!
//! This crate loads arf modules from disk, parses them, and resolves the types their sections
//! name, across module boundaries. It also renders parsed modules back to arf source.
//!
//! - `frontend`: module discovery and loading, the module cache, the analyzer
//! - `format`: AST-to-source renderer
//! - `cli`: the `arf` command line
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod format;
pub mod frontend;

pub use frontend::{ast, diagnostics, lexer, parser, source};

pub use format::{FormatConfig, render_module, render_module_with_config};
pub use frontend::FrontendConfig;
pub use frontend::analyzer::{SemanticTree, analyze};
pub use frontend::cache::ModuleCache;
pub use frontend::module::{FsLoader, MemoryLoader, ModuleLoader, load_module};
