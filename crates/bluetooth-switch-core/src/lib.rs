//! Bluetooth Switch Core Library
//!
//! Keeps a headset-mode switch in line with the active profile of a
//! Bluetooth audio card, driving the `pactl` audio control tool.
//!
//! # Example
//!
//! ```no_run
//! use bluetooth_switch_core::{
//!     AudioBackend, Controller, ControllerSettings, CoreResult, Notifier, ProcessRunner,
//!     SyncOutcome, ToggleView,
//! };
//!
//! struct LogView;
//!
//! impl ToggleView for LogView {
//!     fn set_toggle_state(&self, on: bool) {
//!         println!("headset mode: {}", on);
//!     }
//!     fn set_sensitive(&self, _sensitive: bool) {}
//!     fn set_label(&self, text: &str) {
//!         println!("{}", text);
//!     }
//!     fn dispose(&self) {}
//! }
//!
//! struct StdoutNotifier;
//!
//! impl Notifier for StdoutNotifier {
//!     fn notify(&self, message: &str) {
//!         println!("{}", message);
//!     }
//!     fn notify_error(&self, title: &str, message: &str) -> CoreResult<()> {
//!         println!("{}: {}", title, message);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let backend = AudioBackend::new(ProcessRunner);
//!     let controller =
//!         Controller::new(backend, LogView, StdoutNotifier, ControllerSettings::default());
//!
//!     if let SyncOutcome::Displayed { headset: false, .. } = controller.sync().await {
//!         let _ = controller.toggle(true).await;
//!     }
//! }
//! ```

mod backend;
mod command;
mod controller;
mod error;

pub use {
    backend::{
        AudioBackend, BLUETOOTH_CARD_PREFIX, DEFAULT_HEADSET_PROFILE,
        DEFAULT_HIGH_FIDELITY_PROFILE, DEFAULT_PROGRAM, Device, ProfileName, ProfileRoles,
        select_canonical,
    },
    command::{CommandResult, CommandRunner, ProcessRunner},
    controller::{
        Controller, ControllerSettings, DEFAULT_POLL_INTERVAL, DEFAULT_SETTLE_DELAY, Indicator,
        NOTIFICATION_TITLE, Notifier, SyncOutcome, TOGGLE_BASE_LABEL, ToggleOutcome,
        ToggleRejection, ToggleTicket, ToggleView, switch_message, toggle_label,
    },
    error::{Result as CoreResult, SwitchError},
};

#[cfg(test)]
mod tests;
