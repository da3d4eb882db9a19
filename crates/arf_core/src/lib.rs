//! Provide shared, pure vocabulary and validators for the arf compiler front end.
//!
//! This crate is intentionally small. It contains deterministic helpers that the lexer, the parser,
//! the analyzer and the renderer all agree on:
//! - section keywords, header keys and type qualifiers,
//! - permission modes and their two-letter encoding,
//! - built-in primitive type names,
//! - name and permission validators.
//!
//! ## Notes
//!
//! - This is a “vocabulary core” crate: **no IO**, no global state, and no AST types.

pub mod lang;
pub mod validate;

pub use lang::permissions::{Mode, PermissionError, Permissions};
