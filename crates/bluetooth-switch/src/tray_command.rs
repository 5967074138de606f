/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` (because `TrayIcon` is `!Send`),
/// so all tray mutations and process lifecycle events flow through this enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayCommand {
    /// Show the headset-mode switch as on or off.
    SetChecked(bool),
    /// Enable or grey out the switch.
    SetEnabled(bool),
    /// Replace the switch label.
    SetLabel(String),
    /// Remove the tray icon; the switch no longer delivers events.
    Detach,
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
