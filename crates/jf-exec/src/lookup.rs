// SPDX-License-Identifier: MIT OR Apache-2.0
//! Executable resolution against the platform search path.

use std::path::{Path, PathBuf};

use crate::ExecError;

/// Resolve `command` to a concrete executable path.
///
/// A name containing a path separator is treated as a direct path; a bare
/// name is searched for in every `PATH` entry, probing the usual executable
/// extensions on Windows. Matching shell lookup semantics, a candidate that
/// exists but is not executable is skipped and the scan continues. An empty
/// or unresolvable name is a configuration error, reported as
/// [`ExecError::NotFound`].
pub fn resolve(command: &str) -> Result<PathBuf, ExecError> {
    if command.is_empty() {
        return Err(ExecError::NotFound(String::new()));
    }

    let direct = Path::new(command);
    if direct.components().count() > 1 {
        return if is_executable(direct) {
            Ok(direct.to_path_buf())
        } else {
            Err(ExecError::NotFound(command.to_string()))
        };
    }

    let Some(path) = std::env::var_os("PATH") else {
        return Err(ExecError::NotFound(command.to_string()));
    };

    search(std::env::split_paths(&path), command)
        .ok_or_else(|| ExecError::NotFound(command.to_string()))
}

fn search(dirs: impl Iterator<Item = PathBuf>, command: &str) -> Option<PathBuf> {
    dirs.map(|dir| dir.join(command)).find_map(probe)
}

fn probe(candidate: PathBuf) -> Option<PathBuf> {
    if is_executable(&candidate) {
        return Some(candidate);
    }

    if !cfg!(windows) {
        return None;
    }

    [".exe", ".cmd", ".bat", ".com"]
        .into_iter()
        .map(|ext| {
            let mut with_ext = candidate.clone().into_os_string();
            with_ext.push(ext);
            PathBuf::from(with_ext)
        })
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
