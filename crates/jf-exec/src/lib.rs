// SPDX-License-Identifier: MIT OR Apache-2.0
#![doc = include_str!("../README.md")]
//! jf-exec
#![deny(unsafe_code)]
#![warn(missing_docs)]
//!
//! Cancellable single-shot process execution with streaming stdio.
//!
//! The crate deliberately knows nothing about what the invoked executable
//! computes: callers hand over a command name, an invocation specification,
//! and a cancellation token, and get back an exit code or an [`ExecError`]
//! naming the phase that failed.

pub mod cancel;
pub mod error;
pub mod lookup;
pub mod options;
pub mod runner;

pub use cancel::CancelToken;
pub use error::ExecError;
pub use options::RunOptions;
pub use runner::run;
