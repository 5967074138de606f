use crate::CoreResult;

/// The on/off switch the controller drives.
///
/// Calls arrive from the controller's runtime thread; implementations that
/// own thread-bound widgets forward them to their UI thread.
pub trait ToggleView: Send + Sync + 'static {
    /// Show the switch as on or off without emitting a user toggle.
    fn set_toggle_state(&self, on: bool);

    /// Enable or grey out the switch.
    fn set_sensitive(&self, sensitive: bool);

    /// Replace the switch label text.
    fn set_label(&self, text: &str);

    /// Detach the switch from its host and stop delivering toggle events.
    fn dispose(&self);
}

/// Desktop notification sink.
pub trait Notifier: Send + Sync + 'static {
    /// Show a single-message informational notification.
    fn notify(&self, message: &str);

    /// Show an error notification with a title.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SwitchError::NotificationFailed`] when the rich form
    /// is unavailable, so the caller can fall back to [`Notifier::notify`].
    fn notify_error(&self, title: &str, message: &str) -> CoreResult<()>;
}
