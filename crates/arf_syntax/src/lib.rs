//! Syntax front end for the arf language: source text, lexer, parser, AST, diagnostics.
//!
//! This crate turns the text of one file into tokens and then into a [`ast::Module`] fragment. It does
//! not touch the filesystem and does not resolve names across modules; both happen in the `arf`
//! package, which feeds files in and merges fragments that share a module name.
//!
//! ## Notes
//! - Vocabulary (section keywords, header keys, qualifiers, permissions) comes from `arf_core::lang`.
//! - Every diagnostic is collected into a [`diagnostics::Diagnostics`] sink; nothing here prints.
//!
//! ## Examples
//! ```rust
//! use std::sync::Arc;
//!
//! use arf_syntax::ast::Module;
//! use arf_syntax::diagnostics::Diagnostics;
//! use arf_syntax::parser::{self, ParseMode};
//! use arf_syntax::source::SourceText;
//!
//! let text = ":arf\nmodule demo\n---\ndata rw counter:Int 0\n";
//! let source = Arc::new(SourceText::new("demo.arf", "demo", text));
//! let mut module = Module::new("demo", "demo");
//! let mut diagnostics = Diagnostics::new();
//! parser::parse_file(&source, &mut module, ParseMode::Full, &mut diagnostics).unwrap();
//! assert_eq!(diagnostics.error_count(), 0);
//! assert!(module.datas.contains_key("counter"));
//! ```

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod source;
pub mod token_helpers;
