mod collaborators;
#[allow(clippy::module_inception)]
mod controller;
mod indicator;
mod outcome;
mod settings;
mod state;

pub use {
    collaborators::{Notifier, ToggleView},
    controller::{Controller, NOTIFICATION_TITLE, TOGGLE_BASE_LABEL, switch_message, toggle_label},
    indicator::Indicator,
    outcome::{SyncOutcome, ToggleOutcome, ToggleRejection, ToggleTicket},
    settings::{ControllerSettings, DEFAULT_POLL_INTERVAL, DEFAULT_SETTLE_DELAY},
};
