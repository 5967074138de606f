use crate::TrayCommand;

use std::sync::{Mutex, PoisonError};

use bluetooth_switch_core::ToggleView;
use tao::event_loop::EventLoopProxy;
use tracing::warn;

/// Switch view backed by the tray menu.
///
/// Forwards every update to the main thread, which owns the tray icon.
pub struct TrayView {
    proxy: Mutex<EventLoopProxy<TrayCommand>>,
}

impl TrayView {
    pub fn new(proxy: EventLoopProxy<TrayCommand>) -> Self {
        Self {
            proxy: Mutex::new(proxy),
        }
    }

    fn send(&self, command: TrayCommand) {
        let proxy = self.proxy.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = proxy.send_event(command) {
            warn!(error = ?e, "Tray event loop closed, dropping update");
        }
    }
}

impl ToggleView for TrayView {
    fn set_toggle_state(&self, on: bool) {
        self.send(TrayCommand::SetChecked(on));
    }

    fn set_sensitive(&self, sensitive: bool) {
        self.send(TrayCommand::SetEnabled(sensitive));
    }

    fn set_label(&self, text: &str) {
        self.send(TrayCommand::SetLabel(text.to_string()));
    }

    fn dispose(&self) {
        self.send(TrayCommand::Detach);
    }
}
