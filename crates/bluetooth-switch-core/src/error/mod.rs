use error_location::ErrorLocation;
use thiserror::Error;

/// Audio backend and controller errors with source location tracking.
#[derive(Error, Debug)]
pub enum SwitchError {
    /// External command exited non-zero or could not be spawned.
    #[error("Command failed: {reason} {location}")]
    CommandFailure {
        /// Diagnostic text taken from the command output.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Device listing failed or produced no usable lines.
    #[error("Device discovery failed: {reason} {location}")]
    Discovery {
        /// Description of the discovery failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No listed device matched the Bluetooth naming convention.
    #[error("No Bluetooth audio cards found (prefix {prefix:?}) {location}")]
    NoDevice {
        /// Name prefix the listing was filtered by.
        prefix: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Target device or its active-profile line is missing.
    #[error("Active profile unavailable for {device}: {reason} {location}")]
    ProfileNotFound {
        /// Device that was queried.
        device: String,
        /// Description of what was missing.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Desktop notification could not be shown.
    #[error("Notification failed: {reason} {location}")]
    NotificationFailed {
        /// Description of the notification failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl SwitchError {
    /// User-facing text for labels and notifications, without call-site noise.
    pub fn detail(&self) -> String {
        match self {
            SwitchError::CommandFailure { reason, .. }
            | SwitchError::Discovery { reason, .. }
            | SwitchError::ProfileNotFound { reason, .. }
            | SwitchError::NotificationFailed { reason, .. } => reason.clone(),
            SwitchError::NoDevice { .. } => "No Bluetooth audio cards found".to_string(),
        }
    }
}

/// Result type alias using [`SwitchError`].
pub type Result<T> = std::result::Result<T, SwitchError>;
