//! arf language vocabulary registries.
//!
//! Callers work with stable IDs (e.g. `SectionId`, `HeaderKeyId`) and look up spellings via the
//! registry tables instead of comparing strings all over the front end.
//!
//! ## Notes
//! - Registries are **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings for parsing, diagnostics and
//!   rendering.
//!
//! ## Examples
//! ```rust
//! use arf_core::lang::keywords::{self, SectionId};
//!
//! assert_eq!(keywords::section_from_str("func"), Some(SectionId::Func));
//! assert_eq!(keywords::section_as_str(SectionId::Func), "func");
//! ```

pub mod keywords;
pub mod permissions;
pub mod primitives;
pub mod punctuation;
