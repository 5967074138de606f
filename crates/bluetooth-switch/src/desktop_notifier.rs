//! Desktop notifications via the platform notification service.

use std::panic::Location;

use bluetooth_switch_core::{CoreResult, Notifier, SwitchError};
use error_location::ErrorLocation;
#[cfg(all(unix, not(target_os = "macos")))]
use notify_rust::Urgency;
use notify_rust::{Notification, Timeout};
use tracing::{debug, warn};

const APP_NAME: &str = "Bluetooth Switch";
const SWITCH_ICON: &str = "bluetooth-active-symbolic";
const ERROR_ICON: &str = "dialog-error";

/// Posts switch results as desktop notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl Notifier for DesktopNotifier {
    fn notify(&self, message: &str) {
        let result = Notification::new()
            .appname(APP_NAME)
            .summary(message)
            .icon(SWITCH_ICON)
            .timeout(Timeout::Default)
            .show();

        match result {
            Ok(_) => debug!(summary = message, "Notification shown"),
            Err(e) => warn!(error = %e, summary = message, "Failed to show notification"),
        }
    }

    #[track_caller]
    fn notify_error(&self, title: &str, message: &str) -> CoreResult<()> {
        let location = ErrorLocation::from(Location::caller());

        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .summary(title)
            .body(message)
            .icon(ERROR_ICON);

        #[cfg(all(unix, not(target_os = "macos")))]
        notification.urgency(Urgency::Critical);

        notification
            .show()
            .map(|_| ())
            .map_err(|e| SwitchError::NotificationFailed {
                reason: e.to_string(),
                location,
            })
    }
}
