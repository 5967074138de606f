//! External process execution.
//!
//! Every failure mode is folded into a [`CommandResult`] so callers never
//! have to distinguish "could not run" from "ran and failed".

use crate::command::CommandResult;
use crate::command::result::UNKNOWN_EXIT_STATUS;

use std::{future::Future, process::Stdio};

use tokio::process::Command;
use tracing::{debug, instrument, warn};

/// Runs an external command and reports its outcome.
///
/// Implementations must never fail: spawn and I/O errors are returned as a
/// result with `success == false`.
pub trait CommandRunner: Send + Sync + 'static {
    /// Run `argv[0]` with the remaining elements as arguments.
    fn run(&self, argv: &[String]) -> impl Future<Output = CommandResult> + Send;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    #[instrument(skip(self))]
    async fn run(&self, argv: &[String]) -> CommandResult {
        let Some((program, args)) = argv.split_first() else {
            return CommandResult::spawn_failure("Empty command line");
        };

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(false)
            .output()
            .await;

        match output {
            Ok(output) => {
                let result = CommandResult {
                    success: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    exit_status: output.status.code().unwrap_or(UNKNOWN_EXIT_STATUS),
                };
                debug!(
                    success = result.success,
                    exit_status = result.exit_status,
                    stdout_len = result.stdout.len(),
                    "Command finished"
                );
                result
            }
            Err(e) => {
                warn!(error = %e, "Failed to run command");
                CommandResult::spawn_failure(format!("Failed to run {}: {}", program, e))
            }
        }
    }
}
