//! Subprocess round trip for one formatting request.
//!
//! Each invocation spawns an independent child process, streams the full
//! input text to its stdin while draining stdout and stderr, and waits
//! for exit. No timeout is enforced and there is no cancellation; the
//! caller awaits process exit.

use std::ffi::OsString;
use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Result of one formatter invocation.
///
/// Failures are values, not errors: launch problems and non-zero exits both
/// land in `Failed` with a human-readable message, so callers decide how to
/// surface them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatterOutcome {
    /// Exit status zero; carries the accumulated stdout text
    Formatted(String),
    /// Launch failure or non-zero exit; carries the diagnostic message
    Failed(String),
}

impl FormatterOutcome {
    /// The formatted text, if the invocation succeeded
    pub fn into_formatted(self) -> Option<String> {
        match self {
            FormatterOutcome::Formatted(text) => Some(text),
            FormatterOutcome::Failed(_) => None,
        }
    }
}

/// Pipe `input` through the formatter and collect its output.
///
/// Empty input is passed through as-is; whatever the tool emits for an empty
/// document is the result.
pub async fn run_formatter(program: &Path, args: &[OsString], input: &str) -> FormatterOutcome {
    let mut child = match Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            return FormatterOutcome::Failed(format!(
                "failed to launch formatter {}: {}",
                program.display(),
                e
            ));
        }
    };

    // Stdin was requested as piped above, so take() cannot fail.
    let stdin = child.stdin.take();
    let write_input = async move {
        match stdin {
            // The handle drops when this block ends, closing the stream
            // and signaling end of input.
            Some(mut stdin) => stdin.write_all(input.as_bytes()).await,
            None => Ok(()),
        }
    };

    // Write stdin while draining stdout/stderr. Writing to completion
    // first would deadlock once the input exceeds the OS pipe buffers:
    // the child blocks on a full stdout pipe and stops reading.
    let (write_result, output) = tokio::join!(write_input, child.wait_with_output());

    let output = match output {
        Ok(output) => output,
        Err(e) => {
            return FormatterOutcome::Failed(format!("failed to wait for formatter: {}", e));
        }
    };

    if let Err(e) = write_result {
        // A child that exits without consuming its stdin (a formatter
        // rejecting bad input) breaks the pipe; its stderr and exit
        // status carry the real diagnostic.
        if e.kind() == std::io::ErrorKind::BrokenPipe {
            log::debug!("formatter exited before consuming all input: {}", e);
        } else {
            return FormatterOutcome::Failed(format!(
                "failed to write to formatter stdin: {}",
                e
            ));
        }
    }

    if output.status.success() {
        FormatterOutcome::Formatted(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        log::debug!("formatter exited with {}: {}", output.status, stderr);
        FormatterOutcome::Failed(stderr)
    }
}
