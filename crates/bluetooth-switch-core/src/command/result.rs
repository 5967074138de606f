use crate::SwitchError;

use std::panic::Location;

use error_location::ErrorLocation;

/// Exit status reported when no real status is available.
pub const UNKNOWN_EXIT_STATUS: i32 = -1;

/// Outcome of one external command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the process ran and exited with status zero.
    pub success: bool,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error, or spawn diagnostics.
    pub stderr: String,
    /// Process exit status, `-1` when the process never produced one.
    pub exit_status: i32,
}

impl CommandResult {
    /// Build a failed result for a command that could not be run at all.
    pub fn spawn_failure(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: reason.into(),
            exit_status: UNKNOWN_EXIT_STATUS,
        }
    }

    /// Best diagnostic available: stderr, then stdout, then a fallback.
    pub fn failure_detail(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }

        let stdout = self.stdout.trim();
        if !stdout.is_empty() {
            return stdout.to_string();
        }

        "Unknown error".to_string()
    }

    /// Convert a failed result into a reportable error.
    #[track_caller]
    pub fn into_error(self) -> SwitchError {
        SwitchError::CommandFailure {
            reason: self.failure_detail(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
