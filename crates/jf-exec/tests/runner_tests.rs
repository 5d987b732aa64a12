// SPDX-License-Identifier: MIT OR Apache-2.0
//! End-to-end tests for the process runner.
//!
//! Exercises the full invocation lifecycle against small POSIX utilities:
//! exit codes, per-stream capture and ordering, stdin feeding, environment
//! and working-directory overrides, and cancellation latency.
#![cfg(unix)]

use std::time::{Duration, Instant};

use jf_exec::{CancelToken, ExecError, RunOptions, run};

// ---------------------------------------------------------------------------
// Exit codes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn echo_exits_zero_and_streams_stdout() {
    let mut out = Vec::new();
    let code = run(
        &CancelToken::new(),
        "echo",
        RunOptions::new().arg("hello").stdout(&mut out),
    )
    .await
    .expect("echo should run");

    assert_eq!(code, 0);
    assert_eq!(out, b"hello\n");
}

#[tokio::test]
async fn nonzero_exit_is_not_an_error() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        &CancelToken::new(),
        "sh",
        RunOptions::new()
            .args(["-c", "exit 7"])
            .stdout(&mut out)
            .stderr(&mut err),
    )
    .await
    .expect("non-zero exit must come back as a code, not an error");

    assert_eq!(code, 7);
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[tokio::test]
async fn false_yields_one_and_empty_sinks() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        &CancelToken::new(),
        "false",
        RunOptions::new().stdout(&mut out).stderr(&mut err),
    )
    .await
    .expect("false should run");

    assert_eq!(code, 1);
    assert!(out.is_empty());
    assert!(err.is_empty());
}

// ---------------------------------------------------------------------------
// Resolution failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn nonexistent_command_is_not_found() {
    let err = run(
        &CancelToken::new(),
        "this-does-not-exist-xyz",
        RunOptions::new(),
    )
    .await
    .expect_err("unresolvable name must fail");

    assert!(matches!(err, ExecError::NotFound(name) if name == "this-does-not-exist-xyz"));
}

#[tokio::test]
async fn empty_command_name_is_not_found() {
    let err = run(&CancelToken::new(), "", RunOptions::new())
        .await
        .expect_err("empty name must fail");

    assert!(matches!(err, ExecError::NotFound(_)));
}

#[tokio::test]
async fn runner_is_reusable_after_a_failure() {
    let bad = run(&CancelToken::new(), "no-such-binary-jf", RunOptions::new()).await;
    assert!(bad.is_err(), "bad command should fail");

    let mut out = Vec::new();
    let code = run(
        &CancelToken::new(),
        "echo",
        RunOptions::new().arg("still alive").stdout(&mut out),
    )
    .await
    .expect("runner must stay usable after a failed call");

    assert_eq!(code, 0);
    assert_eq!(out, b"still alive\n");
}

// ---------------------------------------------------------------------------
// Stream routing and ordering
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stdout_and_stderr_land_in_their_own_sinks() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(
        &CancelToken::new(),
        "sh",
        RunOptions::new()
            .args(["-c", "echo out; echo err >&2"])
            .stdout(&mut out)
            .stderr(&mut err),
    )
    .await
    .expect("script should run");

    assert_eq!(code, 0);
    assert_eq!(out, b"out\n");
    assert_eq!(err, b"err\n");
}

#[tokio::test]
async fn stdout_bytes_arrive_exactly_once_in_order() {
    let script = "i=0; while [ $i -lt 200 ]; do echo $i; i=$((i+1)); done";
    let mut out = Vec::new();
    let code = run(
        &CancelToken::new(),
        "sh",
        RunOptions::new().args(["-c", script]).stdout(&mut out),
    )
    .await
    .expect("script should run");
    assert_eq!(code, 0);

    let expected: String = (0..200).map(|i| format!("{i}\n")).collect();
    assert_eq!(String::from_utf8(out).expect("utf-8"), expected);
}

#[tokio::test]
async fn unconfigured_streams_are_discarded() {
    // No sinks at all; the child's output must not block or leak anywhere.
    let code = run(
        &CancelToken::new(),
        "sh",
        RunOptions::new().args(["-c", "echo ignored; echo ignored >&2"]),
    )
    .await
    .expect("script should run");
    assert_eq!(code, 0);
}

// ---------------------------------------------------------------------------
// Stdin
// ---------------------------------------------------------------------------

#[tokio::test]
async fn stdin_source_is_fed_and_closed() {
    let mut source: &[u8] = b"ping";
    let mut out = Vec::new();
    let code = run(
        &CancelToken::new(),
        "cat",
        RunOptions::new().stdin(&mut source).stdout(&mut out),
    )
    .await
    .expect("cat should run");

    assert_eq!(code, 0);
    assert_eq!(out, b"ping");
}

#[tokio::test]
async fn child_may_exit_without_draining_stdin() {
    let data = vec![b'x'; 1 << 20];
    let mut source: &[u8] = &data;
    let code = run(
        &CancelToken::new(),
        "true",
        RunOptions::new().stdin(&mut source),
    )
    .await
    .expect("a child ignoring its stdin is not an error");
    assert_eq!(code, 0);
}

// ---------------------------------------------------------------------------
// Environment and working directory
// ---------------------------------------------------------------------------

#[tokio::test]
async fn env_overlay_reaches_the_child() {
    let mut out = Vec::new();
    let code = run(
        &CancelToken::new(),
        "sh",
        RunOptions::new()
            .args(["-c", r#"printf %s "$JF_TEST_ENV""#])
            .env("JF_TEST_ENV", "overlay-value")
            .stdout(&mut out),
    )
    .await
    .expect("script should run");

    assert_eq!(code, 0);
    assert_eq!(out, b"overlay-value");
}

#[tokio::test]
async fn working_directory_override_applies() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut out = Vec::new();
    let code = run(
        &CancelToken::new(),
        "pwd",
        RunOptions::new().current_dir(dir.path()).stdout(&mut out),
    )
    .await
    .expect("pwd should run");
    assert_eq!(code, 0);

    let printed = String::from_utf8(out).expect("utf-8");
    let printed = std::path::Path::new(printed.trim_end());
    // pwd reports the physical path; canonicalize both sides.
    assert_eq!(
        printed.canonicalize().expect("canonicalize printed"),
        dir.path().canonicalize().expect("canonicalize tempdir"),
    );
}

// ---------------------------------------------------------------------------
// Cancellation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn pre_cancelled_token_returns_promptly() {
    let cancel = CancelToken::new();
    cancel.cancel();

    let started = Instant::now();
    let err = run(&cancel, "sleep", RunOptions::new().arg("30"))
        .await
        .expect_err("pre-cancelled run must fail");

    assert!(err.is_cancelled(), "expected Cancelled, got: {err}");
    assert!(
        started.elapsed() < Duration::from_secs(2),
        "pre-cancelled run must not wait on the child"
    );
}

#[tokio::test]
async fn cancellation_interrupts_a_long_run() {
    let cancel = CancelToken::new();
    cancel.cancel_after(Duration::from_millis(300));

    let started = Instant::now();
    let err = run(&cancel, "sleep", RunOptions::new().arg("30"))
        .await
        .expect_err("cancelled run must fail");

    assert!(err.is_cancelled(), "expected Cancelled, got: {err}");
    assert!(
        started.elapsed() < Duration::from_secs(10),
        "run must return near the cancellation delay, not the child's runtime"
    );
}

#[tokio::test]
async fn independent_tokens_cancel_independently() {
    let cancelled = CancelToken::new();
    cancelled.cancel();

    let live = CancelToken::new();
    let mut out = Vec::new();

    let doomed = run(&cancelled, "sleep", RunOptions::new().arg("30")).await;
    assert!(doomed.is_err());

    let code = run(
        &live,
        "echo",
        RunOptions::new().arg("unaffected").stdout(&mut out),
    )
    .await
    .expect("a separate token must not be affected");
    assert_eq!(code, 0);
    assert_eq!(out, b"unaffected\n");
}
