//! CLI surface for the test launcher.
//!
//! Every positional argument is forwarded verbatim to the unittest runner;
//! the launcher interprets no flags of its own beyond `--help`/`--version`.
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::ffi::OsString;
use std::fmt;
use std::process;

use clap::Parser;

use crate::launcher::{InheritStdioRunner, LaunchError, Launcher, ProcessRunner};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create an error with a custom exit code.
    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Runs `python -m unittest` against the `test` directory under `$SRC_DIR`
#[derive(Parser, Debug)]
#[command(name = "testlaunch")]
#[command(version = VERSION)]
#[command(about = "Runs `python -m unittest` against $SRC_DIR/test", long_about = None)]
pub struct Cli {
    /// Arguments forwarded verbatim to the unittest runner
    #[arg(
        value_name = "RUNNER_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub runner_args: Vec<OsString>,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    launch_tests(&cli.runner_args, &Launcher::from_env(), &InheritStdioRunner)
}

/// Build and run the unittest invocation; the child's exit code becomes the
/// launcher's exit code, unchanged.
pub fn launch_tests(
    forwarded: &[OsString],
    launcher: &Launcher,
    runner: &dyn ProcessRunner,
) -> CliResult<ExitCode> {
    match launcher.launch(forwarded, runner) {
        Ok(code) => Ok(ExitCode(code)),
        Err(e @ LaunchError::MissingEnv(_)) => Err(CliError::failure(format!("Error: {}", e))),
        // 127 is the shell convention for "command not found"
        Err(e @ LaunchError::Spawn { .. }) => Err(CliError::with_code(format!("Error: {}", e), 127)),
    }
}

// ============================================================================
// Tests
// ============================================================================
