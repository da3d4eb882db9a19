//! Parser for the arf programming language
//!
//! Consumes the [`Line`]s of one file and adds its header fields and sections to a [`Module`].
//! Several files of the same module are parsed into the same `Module` one after another.
//!
//! ## Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use arf_syntax::ast::{BlockItem, Module};
//! use arf_syntax::diagnostics::Diagnostics;
//! use arf_syntax::parser::{ParseMode, parse_file};
//! use arf_syntax::source::SourceText;
//!
//! let text = ":arf\nmodule demo\n---\nfunc rr main\n        ---\n        [print \"hi\"]\n";
//! let source = Arc::new(SourceText::new("main.arf", "demo", text));
//! let mut module = Module::new("demo", "demo");
//! let mut diagnostics = Diagnostics::new();
//! parse_file(&source, &mut module, ParseMode::Full, &mut diagnostics).unwrap();
//! assert!(matches!(module.functions["main"].root.items[0], BlockItem::Statement(_)));
//! ```

use std::sync::Arc;

use arf_core::Permissions;
use arf_core::lang::keywords::{self, HeaderKeyId, QualifierId, SectionId};
use arf_core::lang::punctuation::{self, HeadMarkerId};

use crate::ast::*;
use crate::diagnostics::{Diagnostic, Diagnostics, FrontendError};
use crate::lexer::{self, Line, Token, TokenKind};
use crate::source::SourceText;
use crate::token_helpers::VALUE_KINDS;

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/meta.rs");
include!("parser/sections.rs");
include!("parser/types.rs");
include!("parser/func.rs");
include!("parser/stmts.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
