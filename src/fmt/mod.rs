//! Formatter bridge
//!
//! Converts raw document text into formatted text by piping it through the
//! external fprettify binary. Configuration is discovered by looking for a
//! `.fprettify.rc` directly under the workspace root; its contents are never
//! parsed here, only its path is forwarded to the tool.

mod bridge;

pub use bridge::{FormatterOutcome, run_formatter};

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Reserved configuration file name, looked up at the workspace root
pub const CONFIG_FILE_NAME: &str = ".fprettify.rc";

/// Argument instructing fprettify to read from standard input
pub const STDIN_SENTINEL: &str = "-";

/// Locate the configuration file for a formatting request.
///
/// Only the first workspace root is consulted, and only the top level of it.
/// Returns `None` when no workspace is open or the file does not exist.
pub fn resolve_config_path(workspace_root: Option<&Path>) -> Option<PathBuf> {
    let root = workspace_root?;
    let candidate = root.join(CONFIG_FILE_NAME);
    if candidate.is_file() {
        Some(candidate)
    } else {
        None
    }
}

/// Build the argument list for one formatter invocation.
///
/// Always starts with the stdin sentinel; a `--config <path>` pair is
/// appended when a configuration file was resolved.
pub fn build_args(config_path: Option<&Path>) -> Vec<OsString> {
    let mut args = vec![OsString::from(STDIN_SENTINEL)];
    if let Some(path) = config_path {
        args.push(OsString::from("--config"));
        args.push(path.as_os_str().to_os_string());
    }
    args
}
