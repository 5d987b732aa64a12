// SPDX-License-Identifier: MIT OR Apache-2.0
//! Single-invocation process execution.

use std::io::ErrorKind;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::process::{ChildStderr, ChildStdin, ChildStdout, Command};
use tracing::{debug, warn};

use crate::{CancelToken, ExecError, RunOptions, lookup};

/// Run `command` to completion under the given cancellation token.
///
/// Spawns exactly one OS process per call: the command is resolved against
/// `PATH`, launched with the configured arguments, environment overlay, and
/// working directory, and its stdout/stderr are streamed into the configured
/// sinks as the child produces them. The call blocks until the child exits
/// or `cancel` fires, whichever comes first.
///
/// Returns the child's exit code on normal exit — including non-zero codes,
/// which are the invoked program's way of reporting failure and not an error
/// of the runner. `Err` is reserved for infrastructure failures; see
/// [`ExecError`] for the taxonomy. On cancellation the child is signalled
/// (best effort), reaped, and [`ExecError::Cancelled`] is returned.
///
/// Nothing is retried internally, and no failure poisons the runner: it is
/// always safe to call `run` again.
pub async fn run(
    cancel: &CancelToken,
    command: &str,
    opts: RunOptions<'_>,
) -> Result<i32, ExecError> {
    if cancel.is_cancelled() {
        return Err(ExecError::Cancelled);
    }

    let program = lookup::resolve(command)?;

    let RunOptions {
        args,
        env,
        cwd,
        stdin,
        stdout,
        stderr,
    } = opts;

    debug!(
        target: "jf_exec",
        command,
        program = %program.display(),
        ?args,
        "spawning process"
    );

    let mut cmd = Command::new(&program);
    cmd.args(&args)
        .stdin(wire(stdin.is_some()))
        .stdout(wire(stdout.is_some()))
        .stderr(wire(stderr.is_some()))
        .kill_on_drop(true);

    if let Some(cwd) = &cwd {
        cmd.current_dir(cwd);
    }
    for (name, value) in &env {
        cmd.env(name, value);
    }

    let mut child = cmd.spawn().map_err(ExecError::Spawn)?;

    let stdin_pipe = child.stdin.take();
    let stdout_pipe = child.stdout.take();
    let stderr_pipe = child.stderr.take();

    // The stdio pumps and the exit wait are multiplexed onto this task and
    // raced against the token; pipes reach EOF when the child exits, so the
    // pumps always settle before the wait.
    let finished = tokio::select! {
        _ = cancel.cancelled() => None,
        res = async {
            drive_stdio(stdin_pipe, stdout_pipe, stderr_pipe, stdin, stdout, stderr).await?;
            child.wait().await.map_err(ExecError::Wait)
        } => Some(res),
    };

    let Some(result) = finished else {
        debug!(target: "jf_exec", command, "cancelled; terminating child");
        if let Err(error) = child.start_kill() {
            warn!(target: "jf_exec", command, %error, "failed to signal cancelled child");
        }
        let _ = child.wait().await;
        return Err(ExecError::Cancelled);
    };

    let status = match result {
        Ok(status) => status,
        Err(error) => {
            // Reap before surfacing the stream/wait failure.
            let _ = child.start_kill();
            let _ = child.wait().await;
            return Err(error);
        }
    };

    match status.code() {
        Some(code) => {
            debug!(target: "jf_exec", command, code, "process exited");
            Ok(code)
        }
        None => Err(ExecError::Signaled),
    }
}

fn wire(configured: bool) -> Stdio {
    if configured {
        Stdio::piped()
    } else {
        Stdio::null()
    }
}

async fn drive_stdio(
    stdin_pipe: Option<ChildStdin>,
    stdout_pipe: Option<ChildStdout>,
    stderr_pipe: Option<ChildStderr>,
    source: Option<&mut (dyn AsyncRead + Send + Unpin)>,
    out_sink: Option<&mut (dyn AsyncWrite + Send + Unpin)>,
    err_sink: Option<&mut (dyn AsyncWrite + Send + Unpin)>,
) -> Result<(), ExecError> {
    let feed = feed_stdin(stdin_pipe, source);
    let out = pump(stdout_pipe, out_sink, ExecError::Stdout);
    let err = pump(stderr_pipe, err_sink, ExecError::Stderr);
    tokio::try_join!(feed, out, err)?;
    Ok(())
}

async fn feed_stdin(
    pipe: Option<ChildStdin>,
    source: Option<&mut (dyn AsyncRead + Send + Unpin)>,
) -> Result<(), ExecError> {
    let (Some(mut pipe), Some(source)) = (pipe, source) else {
        return Ok(());
    };

    // The child is entitled to exit without draining its input.
    match tokio::io::copy(source, &mut pipe).await {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::BrokenPipe => return Ok(()),
        Err(e) => return Err(ExecError::Stdin(e)),
    }

    match pipe.shutdown().await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(e) => Err(ExecError::Stdin(e)),
    }
}

async fn pump<R>(
    pipe: Option<R>,
    sink: Option<&mut (dyn AsyncWrite + Send + Unpin)>,
    wrap: fn(std::io::Error) -> ExecError,
) -> Result<(), ExecError>
where
    R: AsyncRead + Unpin,
{
    if let (Some(mut pipe), Some(sink)) = (pipe, sink) {
        tokio::io::copy(&mut pipe, sink).await.map_err(wrap)?;
    }
    Ok(())
}
