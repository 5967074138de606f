use crate::{
    command::CommandRunner,
    controller::{Controller, Notifier, ToggleView},
};

use std::sync::Arc;

use tracing::info;

/// Lifecycle handle for the one switch instance.
///
/// `enable` constructs the running indicator; `disable` (or dropping the
/// handle) tears it down.
pub struct Indicator<R: CommandRunner, V: ToggleView, N: Notifier> {
    controller: Arc<Controller<R, V, N>>,
}

impl<R: CommandRunner, V: ToggleView, N: Notifier> Indicator<R, V, N> {
    /// Activate the controller: start polling, which also runs the initial
    /// sync. Must be called from within a tokio runtime.
    pub fn enable(controller: Controller<R, V, N>) -> Self {
        let controller = Arc::new(controller);
        controller.start_polling();

        info!("Indicator enabled");

        Self { controller }
    }

    /// Shared handle for routing UI events into the controller.
    pub fn controller(&self) -> &Arc<Controller<R, V, N>> {
        &self.controller
    }

    /// Deactivate and release the controller.
    pub fn disable(self) {
        drop(self);
    }
}

impl<R: CommandRunner, V: ToggleView, N: Notifier> Drop for Indicator<R, V, N> {
    fn drop(&mut self) {
        if !self.controller.is_destroyed() {
            self.controller.destroy();
            info!("Indicator disabled");
        }
    }
}
