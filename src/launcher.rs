//! Command construction and process execution for the test launcher.
//!
//! ## I/O Boundaries
//!
//! Process execution is abstracted behind the [`ProcessRunner`] trait so that
//! command construction stays pure and testable. The default implementation,
//! [`InheritStdioRunner`], spawns the child with all three standard streams
//! inherited from the parent and blocks until it exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, warn};

/// Environment variable naming the directory that contains the `test` target.
pub const SRC_DIR_VAR: &str = "SRC_DIR";

/// Optional interpreter override. Conda build environments export this with
/// the build-prefix interpreter path.
pub const PYTHON_VAR: &str = "PYTHON";

/// Interpreter used when no override is present.
const DEFAULT_INTERPRETER: &str = "python";

/// Module passed to the interpreter's `-m` flag.
const RUNNER_MODULE: &str = "unittest";

/// Errors raised before or while spawning the test run.
#[derive(Debug, Error)]
pub enum LaunchError {
    /// A required environment variable is unset. Raised before any
    /// subprocess is created.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// The interpreter could not be spawned at all. Distinct from a test
    /// run that completes with a non-zero exit code.
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// A fully constructed subprocess invocation: program plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
}

// ============================================================================
// Process Runner Interface
// ============================================================================

/// Execute a constructed command and report the child's exit code.
///
/// Implement this trait to substitute execution strategies; tests use a
/// recording implementation to verify what would be spawned.
pub trait ProcessRunner {
    fn run(&self, spec: &CommandSpec) -> Result<i32, LaunchError>;
}

/// Spawns the child sharing the parent's stdin, stdout and stderr, with no
/// redirection or capture, and waits for it to terminate.
pub struct InheritStdioRunner;

impl ProcessRunner for InheritStdioRunner {
    fn run(&self, spec: &CommandSpec) -> Result<i32, LaunchError> {
        let status = Command::new(&spec.program)
            .args(&spec.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| LaunchError::Spawn {
                program: spec.program.to_string_lossy().into_owned(),
                source: e,
            })?;

        Ok(status.code().unwrap_or_else(|| {
            // No code means the child was killed by a signal (Unix).
            warn!(?status, "test run terminated without an exit code");
            1
        }))
    }
}

// ============================================================================
// Launcher
// ============================================================================

/// Resolves the environment, builds the unittest command vector and hands it
/// to a [`ProcessRunner`].
pub struct Launcher {
    src_dir: Option<OsString>,
    interpreter: Option<OsString>,
}

impl Launcher {
    /// Create a launcher with explicit settings. `None` for `interpreter`
    /// falls back to plain `python`.
    pub fn new(src_dir: Option<OsString>, interpreter: Option<OsString>) -> Self {
        Self { src_dir, interpreter }
    }

    /// Capture `SRC_DIR` and `PYTHON` from the process environment.
    pub fn from_env() -> Self {
        Self::new(env::var_os(SRC_DIR_VAR), env::var_os(PYTHON_VAR))
    }

    /// Build the unittest invocation for the forwarded arguments:
    /// `<interpreter> -m unittest <SRC_DIR>/test <forwarded...>`.
    ///
    /// Fails without spawning anything when `SRC_DIR` is unset.
    pub fn command_spec(&self, forwarded: &[OsString]) -> Result<CommandSpec, LaunchError> {
        let src_dir = self
            .src_dir
            .as_ref()
            .ok_or(LaunchError::MissingEnv(SRC_DIR_VAR))?;
        let test_path = PathBuf::from(src_dir).join("test");

        let program = self
            .interpreter
            .clone()
            .unwrap_or_else(|| DEFAULT_INTERPRETER.into());

        let mut args: Vec<OsString> =
            vec!["-m".into(), RUNNER_MODULE.into(), test_path.into_os_string()];
        args.extend(forwarded.iter().cloned());

        Ok(CommandSpec { program, args })
    }

    /// Construct the command and run it, returning the child's exit code
    /// unchanged. A non-zero code is the normal way a failing test run
    /// reports itself, not an error.
    pub fn launch(
        &self,
        forwarded: &[OsString],
        runner: &dyn ProcessRunner,
    ) -> Result<i32, LaunchError> {
        let spec = self.command_spec(forwarded)?;
        debug!(program = ?spec.program, args = ?spec.args, "launching test run");
        runner.run(&spec)
    }
}

// ============================================================================
// Tests
// ============================================================================
