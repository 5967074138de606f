use crate::{AppResult, DesktopNotifier, TrayCommand, TrayView, config::Config};

use std::sync::Arc;

use bluetooth_switch_core::{AudioBackend, Controller, Indicator, ProcessRunner};
use tao::event_loop::EventLoopProxy;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use tray_icon::menu::{MenuEvent, MenuId};

type TrayController = Controller<ProcessRunner, TrayView, DesktopNotifier>;

/// Main application state.
///
/// Runs on the async runtime thread. Tray updates go back to the main
/// thread through `tray_proxy` because `TrayIcon` is `!Send` and must
/// remain on the UI thread.
pub struct App {
    pub(crate) config: Config,
    pub(crate) tray_proxy: EventLoopProxy<TrayCommand>,
    pub(crate) toggle_menu_id: MenuId,
    pub(crate) exit_menu_id: MenuId,
}

impl App {
    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(self) -> AppResult<()> {
        info!(program = %self.config.backend.program, "Bluetooth Switch starting");

        let backend = AudioBackend::with_program(
            ProcessRunner,
            self.config.backend.program.as_str(),
            self.config.backend.device_prefix.as_str(),
        );
        let controller = Controller::new(
            backend,
            TrayView::new(self.tray_proxy.clone()),
            DesktopNotifier,
            self.config.controller_settings(),
        );
        let indicator = Indicator::enable(controller);

        // Tray event forwarding via single persistent blocking task.
        //
        // MenuEvent::receiver() has a blocking recv(), so one thread waits
        // without polling. Dropping tray_event_rx makes blocking_send() fail
        // and ends the loop on the next menu event.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    if event.id == self.toggle_menu_id {
                        self.handle_toggle(indicator.controller());
                    } else if event.id == self.exit_menu_id {
                        info!("Exit requested from tray menu");
                        break;
                    }
                }

                result = &mut ctrl_c => {
                    match result {
                        Ok(()) => info!("Interrupt received"),
                        Err(e) => error!(error = ?e, "Failed to listen for interrupt"),
                    }
                    break;
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }
        }

        indicator.disable();
        drop(tray_event_rx);

        match tokio::time::timeout(std::time::Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        let _ = self.tray_proxy.send_event(TrayCommand::Shutdown);
        info!("Bluetooth Switch shut down successfully");

        Ok(())
    }

    /// Handle a click on the headset-mode switch.
    ///
    /// The menu flips its check mark on its own, so a rejected click puts
    /// the displayed state back.
    fn handle_toggle(&self, controller: &Arc<TrayController>) {
        let requested = !controller.displayed_toggle_state();

        match controller.begin_toggle(requested) {
            Ok(ticket) => {
                let request_id = ticket.request_id();
                let controller = Arc::clone(controller);
                tokio::spawn(async move {
                    let outcome = controller.run_toggle(ticket).await;
                    debug!(request_id = %request_id, ?outcome, "Toggle finished");
                });
            }
            Err(rejection) => {
                debug!(%rejection, requested, "Toggle ignored");
                let _ = self
                    .tray_proxy
                    .send_event(TrayCommand::SetChecked(controller.displayed_toggle_state()));
            }
        }
    }
}
