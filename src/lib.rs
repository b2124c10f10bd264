//! fprettify Language Server
//!
//! A small Language Server Protocol implementation that delegates Fortran
//! code formatting to the external `fprettify` command-line tool.
//!
//! This library provides:
//! - A formatter bridge that pipes document text through fprettify
//! - Workspace-root discovery of `.fprettify.rc` configuration
//! - LSP registration of a formatting provider and a manual command
//! - Configuration management

pub mod config;
pub mod fmt;
pub mod lsp;

// Re-exports for clean public API
pub use config::Config;
pub use fmt::{FormatterOutcome, build_args, resolve_config_path, run_formatter};
