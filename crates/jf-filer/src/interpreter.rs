// SPDX-License-Identifier: MIT OR Apache-2.0
//! Thin wrapper over the external `jsonnet` interpreter.

use std::path::{Path, PathBuf};

use jf_exec::{CancelToken, RunOptions, run};
use tracing::debug;

use crate::FilerError;

/// Handle to an external Jsonnet interpreter binary.
///
/// The interpreter is an opaque collaborator: it is invoked with a script
/// path or inline source and expected to print one textual document on
/// stdout. Nothing about the templating semantics lives on this side.
#[derive(Debug, Clone)]
pub struct Jsonnet {
    binary: String,
    cwd: Option<PathBuf>,
}

impl Jsonnet {
    /// Use the `jsonnet` binary from `PATH`.
    pub fn new() -> Self {
        Self::with_binary("jsonnet")
    }

    /// Use a specific interpreter binary.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            cwd: None,
        }
    }

    /// Evaluate scripts from `dir`, so relative imports resolve there.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Evaluate a script file and return the document it prints.
    ///
    /// The path is handed to the interpreter as a UTF-8 argument; non-UTF-8
    /// paths are converted lossily.
    pub async fn eval_file(
        &self,
        cancel: &CancelToken,
        script: impl AsRef<Path>,
    ) -> Result<String, FilerError> {
        let script = script.as_ref().to_string_lossy().into_owned();
        self.eval(cancel, vec![script]).await
    }

    /// Evaluate inline source through the interpreter's `--exec` flag.
    pub async fn eval_snippet(
        &self,
        cancel: &CancelToken,
        source: &str,
    ) -> Result<String, FilerError> {
        self.eval(cancel, vec!["--exec".into(), source.into()]).await
    }

    async fn eval(&self, cancel: &CancelToken, args: Vec<String>) -> Result<String, FilerError> {
        debug!(target: "jf_filer", binary = %self.binary, ?args, "evaluating");

        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut opts = RunOptions::new()
            .args(args)
            .stdout(&mut out)
            .stderr(&mut err);
        if let Some(cwd) = &self.cwd {
            opts = opts.current_dir(cwd);
        }

        let code = run(cancel, &self.binary, opts).await?;
        if code != 0 {
            return Err(FilerError::Interpreter {
                code,
                stderr: String::from_utf8_lossy(&err).into_owned(),
            });
        }

        Ok(String::from_utf8(out)?)
    }
}

impl Default for Jsonnet {
    fn default() -> Self {
        Self::new()
    }
}
