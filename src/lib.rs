#![forbid(unsafe_code)]
//! Test launcher for conda-style build environments.
//!
//! `testlaunch` locates a `test` directory under the path named by the
//! `SRC_DIR` environment variable and runs `python -m unittest` against it,
//! forwarding any extra command-line arguments verbatim. The child process
//! inherits stdin, stdout and stderr unchanged, and its exit code becomes the
//! launcher's exit code.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` and `launcher` modules
//!   enforce `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod cli;
pub mod launcher;

pub use launcher::{CommandSpec, InheritStdioRunner, LaunchError, Launcher, ProcessRunner};
