use crate::{
    backend::{Device, ProfileName},
    controller::state::BusyGuard,
};

use std::fmt;

use uuid::Uuid;

/// Result of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Not started: a toggle was in flight or the controller is destroyed.
    Skipped,
    /// Started, but a toggle or teardown happened while it was suspended.
    Abandoned,
    /// Device or profile could not be resolved; the switch was disabled.
    Unavailable {
        /// Text shown next to the switch label.
        detail: String,
    },
    /// The switch now shows the device's actual mode.
    Displayed {
        /// Device that was read.
        device: Device,
        /// Profile the device reported.
        profile: ProfileName,
        /// Whether the profile is a headset profile.
        headset: bool,
    },
}

/// Result of a user-initiated profile change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The audio tool accepted the profile change.
    Switched {
        /// Device that was switched.
        device: Device,
        /// Profile that was requested.
        profile: ProfileName,
    },
    /// The change failed; the user was shown an error notification.
    Failed {
        /// Text of the error notification.
        detail: String,
    },
    /// No Bluetooth card to switch; the switch stays disabled until a sync
    /// finds one.
    NoDevice {
        /// Text of the error notification.
        detail: String,
    },
    /// Teardown happened while the change was in flight.
    Abandoned,
}

/// Why a toggle event was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleRejection {
    /// The event was caused by a programmatic switch update.
    Suppressed,
    /// Another profile change is still in flight.
    Busy,
    /// The controller has been torn down.
    Destroyed,
}

impl fmt::Display for ToggleRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToggleRejection::Suppressed => write!(f, "suppressed"),
            ToggleRejection::Busy => write!(f, "busy"),
            ToggleRejection::Destroyed => write!(f, "destroyed"),
        }
    }
}

/// An accepted toggle request holding the busy flag.
///
/// Dropping the ticket without running it releases the flag.
#[derive(Debug)]
pub struct ToggleTicket {
    pub(crate) enabled: bool,
    pub(crate) request_id: Uuid,
    pub(crate) busy: BusyGuard,
}

impl ToggleTicket {
    /// Whether the user asked for headset mode.
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Correlation id carried through the toggle's log lines.
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}
