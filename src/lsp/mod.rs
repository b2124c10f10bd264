//! LSP Protocol Implementation
//!
//! Editor adapter connecting the formatter bridge to host-provided
//! formatting triggers.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;

/// Identifier of the manually invocable formatting command
pub const FORMAT_COMMAND: &str = "fprettify.formatDocument";
