//! Bridge round-trip tests against stub formatter executables.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use fprettify_language_server::fmt::{
    CONFIG_FILE_NAME, FormatterOutcome, build_args, resolve_config_path, run_formatter,
};

/// Write an executable stub script into `dir` and return its path
fn write_stub(dir: &Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, script).expect("write stub script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("make stub executable");
    path
}

#[tokio::test]
async fn test_echo_stub_round_trips_input() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let stub = write_stub(dir.path(), "echo-fmt", "#!/bin/sh\ncat\n");

    let input = "program demo\n  implicit none\n  print *, 'hi'\nend program demo\n";
    let outcome = run_formatter(&stub, &build_args(None), input).await;

    assert_eq!(outcome, FormatterOutcome::Formatted(input.to_string()));
}

#[tokio::test]
async fn test_empty_input_passes_through() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let stub = write_stub(dir.path(), "echo-fmt", "#!/bin/sh\ncat\n");

    let outcome = run_formatter(&stub, &build_args(None), "").await;

    assert_eq!(outcome, FormatterOutcome::Formatted(String::new()));
}

#[tokio::test]
async fn test_nonzero_exit_carries_stderr() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let stub = write_stub(
        dir.path(),
        "fail-fmt",
        "#!/bin/sh\necho 'bad syntax at line 3' >&2\nexit 1\n",
    );

    let outcome = run_formatter(&stub, &build_args(None), "program x\n").await;

    match outcome {
        FormatterOutcome::Failed(stderr) => {
            assert!(stderr.contains("bad syntax at line 3"), "got: {}", stderr);
        }
        FormatterOutcome::Formatted(_) => panic!("expected failure outcome"),
    }
}

#[tokio::test]
async fn test_exit_without_reading_stdin_still_reports_stderr() {
    // A formatter that rejects its input can exit while we are still
    // writing; the broken pipe must not mask its diagnostics.
    let dir = tempfile::tempdir().expect("create tempdir");
    let stub = write_stub(
        dir.path(),
        "reject-fmt",
        "#!/bin/sh\necho 'cannot parse input' >&2\nexit 1\n",
    );

    // Large enough to overflow the pipe buffer so the write hits EPIPE.
    let input = "x = 1\n".repeat(200_000);
    let outcome = run_formatter(&stub, &build_args(None), &input).await;

    match outcome {
        FormatterOutcome::Failed(stderr) => {
            assert!(stderr.contains("cannot parse input"), "got: {}", stderr);
        }
        FormatterOutcome::Formatted(_) => panic!("expected failure outcome"),
    }
}

#[tokio::test]
async fn test_large_input_does_not_deadlock() {
    // Child writes output while we are still writing input; the piped
    // round trip must drain both sides.
    let dir = tempfile::tempdir().expect("create tempdir");
    let stub = write_stub(dir.path(), "echo-fmt", "#!/bin/sh\ncat\n");

    let line = "  call compute(a, b, c, d, e, f, g, h)\n";
    let input = line.repeat(20_000);
    let outcome = run_formatter(&stub, &build_args(None), &input).await;

    assert_eq!(outcome, FormatterOutcome::Formatted(input));
}

#[tokio::test]
async fn test_config_discovered_at_workspace_root_reaches_argv() {
    let workspace = tempfile::tempdir().expect("create workspace");
    let rc = workspace.path().join(CONFIG_FILE_NAME);
    fs::write(&rc, "indent=3\n").expect("write config");

    let config_path = resolve_config_path(Some(workspace.path()));
    assert_eq!(config_path.as_deref(), Some(rc.as_path()));

    // Stub prints one argument per line so argv ordering is observable.
    let dir = tempfile::tempdir().expect("create tempdir");
    let stub = write_stub(
        dir.path(),
        "args-fmt",
        "#!/bin/sh\nprintf '%s\\n' \"$@\"\n",
    );

    let args = build_args(config_path.as_deref());
    let outcome = run_formatter(&stub, &args, "").await;

    let expected = format!("-\n--config\n{}\n", rc.display());
    assert_eq!(outcome, FormatterOutcome::Formatted(expected));
}

#[tokio::test]
async fn test_no_config_means_stdin_sentinel_only() {
    let workspace = tempfile::tempdir().expect("create workspace");
    let config_path = resolve_config_path(Some(workspace.path()));
    assert!(config_path.is_none());

    let dir = tempfile::tempdir().expect("create tempdir");
    let stub = write_stub(
        dir.path(),
        "args-fmt",
        "#!/bin/sh\nprintf '%s\\n' \"$@\"\n",
    );

    let outcome = run_formatter(&stub, &build_args(config_path.as_deref()), "").await;

    assert_eq!(outcome, FormatterOutcome::Formatted("-\n".to_string()));
}
