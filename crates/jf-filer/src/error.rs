// SPDX-License-Identifier: MIT OR Apache-2.0
//! Harness-level error type.

use thiserror::Error;

/// Errors from driving the external interpreter or decoding its output.
#[derive(Debug, Error)]
pub enum FilerError {
    /// The runner could not complete the invocation.
    #[error(transparent)]
    Exec(#[from] jf_exec::ExecError),

    /// The interpreter ran and reported failure. A non-zero exit is only an
    /// error at this layer; the runner itself reports it as a plain code.
    #[error("jsonnet exited with code {code}: {stderr}")]
    Interpreter {
        /// Exit code reported by the interpreter.
        code: i32,
        /// Captured standard error, usually the interpreter's diagnostics.
        stderr: String,
    },

    /// Interpreter output was not valid UTF-8.
    #[error("interpreter output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Output did not parse as the expected JSON document.
    #[error("failed to parse interpreter output: {0}")]
    Json(#[from] serde_json::Error),

    /// Encoded content did not parse as YAML.
    #[error("failed to parse encoded content as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
