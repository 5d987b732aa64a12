// SPDX-License-Identifier: MIT OR Apache-2.0
//! Invocation specification for a single process launch.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use tokio::io::{AsyncRead, AsyncWrite};

/// Configuration for one process invocation (args, env, cwd, stdio targets).
///
/// Built fluently and fully determined before the process is spawned; a
/// fresh value is created per call and never shared. Defaults: no arguments,
/// inherited working directory and environment, discarded stdout/stderr,
/// no stdin.
///
/// The stdio endpoints are borrowed from the caller for the duration of the
/// call, so capture buffers remain inspectable after
/// [`run`](crate::run) returns.
#[derive(Default)]
pub struct RunOptions<'a> {
    /// Ordered arguments passed to the command.
    pub args: Vec<String>,
    /// Environment overlay; unset names inherit from the parent process.
    pub env: BTreeMap<String, String>,
    /// Optional working directory override.
    pub cwd: Option<PathBuf>,
    pub(crate) stdin: Option<&'a mut (dyn AsyncRead + Send + Unpin)>,
    pub(crate) stdout: Option<&'a mut (dyn AsyncWrite + Send + Unpin)>,
    pub(crate) stderr: Option<&'a mut (dyn AsyncWrite + Send + Unpin)>,
}

impl<'a> RunOptions<'a> {
    /// Create the default invocation specification.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments, preserving order.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Overlay one environment variable onto the inherited environment.
    #[must_use]
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), value.into());
        self
    }

    /// Set the child's working directory.
    #[must_use]
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Supply a source for child stdin; it is drained and then closed.
    #[must_use]
    pub fn stdin(mut self, source: &'a mut (dyn AsyncRead + Send + Unpin)) -> Self {
        self.stdin = Some(source);
        self
    }

    /// Supply a sink that receives child stdout bytes as they arrive.
    #[must_use]
    pub fn stdout(mut self, sink: &'a mut (dyn AsyncWrite + Send + Unpin)) -> Self {
        self.stdout = Some(sink);
        self
    }

    /// Supply a sink that receives child stderr bytes as they arrive.
    #[must_use]
    pub fn stderr(mut self, sink: &'a mut (dyn AsyncWrite + Send + Unpin)) -> Self {
        self.stderr = Some(sink);
        self
    }
}

impl fmt::Debug for RunOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunOptions")
            .field("args", &self.args)
            .field("env", &self.env)
            .field("cwd", &self.cwd)
            .field("stdin", &self.stdin.is_some())
            .field("stdout", &self.stdout.is_some())
            .field("stderr", &self.stderr.is_some())
            .finish()
    }
}
