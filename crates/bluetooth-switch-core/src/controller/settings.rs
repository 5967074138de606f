use crate::backend::ProfileRoles;

use std::time::Duration;

/// How often the controller re-reads the device state.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Wait after a profile change before confirming it.
///
/// The audio stack takes a moment to report the new active profile.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(250);

/// Tunables for the reconciliation controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    /// Profiles the switch toggles between.
    pub roles: ProfileRoles,
    /// Period of the background sync.
    pub poll_interval: Duration,
    /// Delay between a successful change and its confirm sync.
    pub settle_delay: Duration,
    /// Whether to announce successful profile changes.
    pub notify_on_switch: bool,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            roles: ProfileRoles::default(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
            notify_on_switch: true,
        }
    }
}
