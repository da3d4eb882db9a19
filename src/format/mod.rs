//! arf source renderer
//!
//! Turns a parsed [`Module`] back into arf source:
//! - the header lists `module`, then `author`/`license` when set, then every `require`;
//! - sections follow in the order type, data, func, each in source order;
//! - every statement is written as one bracketed line.
//!
//! Parsing the output again yields a module equal to the input (positions aside).

mod config;
mod formatter;
mod writer;

pub use config::FormatConfig;
pub use formatter::Formatter;

use crate::frontend::ast::Module;

/// Render a module with default settings
pub fn render_module(module: &Module) -> String {
    render_module_with_config(module, FormatConfig::default())
}

/// Render a module with custom configuration
#[tracing::instrument(skip_all, fields(module = %module.name))]
pub fn render_module_with_config(module: &Module, config: FormatConfig) -> String {
    Formatter::new(config).format(module)
}
