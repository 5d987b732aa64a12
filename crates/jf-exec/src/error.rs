// SPDX-License-Identifier: MIT OR Apache-2.0
//! Error taxonomy for process invocations.

use thiserror::Error;

/// Errors from resolving, spawning, streaming, or waiting on an invocation.
///
/// A child that runs to completion and exits non-zero is *not* an error of
/// the runner; that outcome is reported through the exit code returned by
/// [`run`](crate::run). Every variant here names an infrastructure failure
/// or a caller-initiated cancellation.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The command name was empty or could not be resolved on `PATH`.
    #[error("executable not found: {0:?}")]
    NotFound(String),

    /// The operating system refused to create the process.
    #[error("failed to spawn process: {0}")]
    Spawn(#[source] std::io::Error),

    /// Failed to feed the configured source into child stdin.
    #[error("failed to feed child stdin: {0}")]
    Stdin(#[source] std::io::Error),

    /// Failed to stream child stdout into its sink.
    #[error("failed to stream child stdout: {0}")]
    Stdout(#[source] std::io::Error),

    /// Failed to stream child stderr into its sink.
    #[error("failed to stream child stderr: {0}")]
    Stderr(#[source] std::io::Error),

    /// The wait primitive failed after the process had started.
    #[error("failed to wait for process exit: {0}")]
    Wait(#[source] std::io::Error),

    /// The process was terminated by a signal and reported no exit code.
    #[error("process terminated by signal")]
    Signaled,

    /// The cancellation token fired before the process completed.
    #[error("invocation cancelled")]
    Cancelled,
}

impl ExecError {
    /// Returns `true` when the caller gave up, as opposed to the program
    /// or the platform failing.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
