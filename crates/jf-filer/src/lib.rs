// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
#![warn(missing_docs)]
//! jf-filer
//!
//! The packaged Jsonnet file-manifest library (`lib/main.libsonnet`) and a
//! thin host harness around the external `jsonnet` interpreter.
//!
//! The templating semantics live entirely in the Jsonnet side; this crate
//! only invokes the interpreter through [`jf_exec`] and gives its output a
//! typed shape for assertions.

mod error;
mod interpreter;
mod manifest;

pub use error::FilerError;
pub use interpreter::Jsonnet;
pub use manifest::{EncodingStrategy, FileManifest, ObjectMeta};

use std::path::{Path, PathBuf};

/// Directory containing the packaged `main.libsonnet`.
pub fn library_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("lib")
}
