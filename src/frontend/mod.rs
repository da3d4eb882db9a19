//! arf Compiler Frontend
//!
//! This module contains the pieces that work across files and modules:
//! - `config`: file extension used for discovery
//! - `module`: finding a module's files and parsing them into one `Module`
//! - `cache`: loaded modules by path, skimmed or full
//! - `analyzer`: type resolution into a `SemanticTree`

// Syntax components are provided by the shared arf_syntax crate.
pub use arf_syntax::{ast, diagnostics, lexer, parser, source};

pub mod analyzer;
pub mod cache;
pub mod config;
pub mod module;

pub use config::FrontendConfig;
