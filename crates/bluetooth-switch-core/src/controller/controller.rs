//! Reconciliation controller for the headset-mode switch.
//!
//! Owns the busy/destroyed flags and keeps the switch in line with the
//! device's actual profile. All operations are cooperative: an operation
//! may be suspended at every external command and at the settle delay, so
//! each continuation re-checks the flags before touching the view.
//!
//! ```text
//!            tick / sync()                 begin_toggle()
//!   Idle ──────────────────► Syncing   Idle ─────────────► Toggling
//!    ▲                          │        ▲                     │
//!    └──────────────────────────┘        └── settle + sync ◄───┘
//!
//!   any ── destroy() ──► Destroyed (terminal)
//! ```

use crate::{
    backend::AudioBackend,
    command::CommandRunner,
    controller::{
        ControllerSettings, Notifier, SyncOutcome, ToggleOutcome, ToggleRejection, ToggleTicket,
        ToggleView, state::ControllerState,
    },
    error::SwitchError,
};

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use tokio::{task::JoinHandle, time::MissedTickBehavior};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Title of every error notification.
pub const NOTIFICATION_TITLE: &str = "Bluetooth Switch";

/// Switch label when there is nothing to report.
pub const TOGGLE_BASE_LABEL: &str = "Headset mode";

/// `tokio::time::interval` rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Switch label with an optional detail suffix.
pub fn toggle_label(detail: &str) -> String {
    let detail = detail.trim();
    if detail.is_empty() {
        TOGGLE_BASE_LABEL.to_string()
    } else {
        format!("{} - {}", TOGGLE_BASE_LABEL, detail)
    }
}

/// Announcement after a successful profile change.
pub fn switch_message(headset: bool) -> String {
    let mode = if headset { "Headset" } else { "A2DP" };
    format!("Bluetooth audio: {}", mode)
}

/// State machine reconciling the switch with the device profile.
pub struct Controller<R, V, N> {
    backend: AudioBackend<R>,
    view: V,
    notifier: N,
    settings: ControllerSettings,
    state: Arc<ControllerState>,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl<R: CommandRunner, V: ToggleView, N: Notifier> Controller<R, V, N> {
    /// Create an idle controller. Nothing runs until [`Controller::sync`],
    /// [`Controller::start_polling`] or a toggle is requested.
    pub fn new(
        backend: AudioBackend<R>,
        view: V,
        notifier: N,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            backend,
            view,
            notifier,
            settings,
            state: Arc::new(ControllerState::default()),
            poll_task: Mutex::new(None),
        }
    }

    /// The view this controller drives.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Whether a user-initiated profile change is in flight.
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Whether the controller has been torn down.
    pub fn is_destroyed(&self) -> bool {
        self.state.is_destroyed()
    }

    /// State the switch currently shows.
    pub fn displayed_toggle_state(&self) -> bool {
        self.state.displayed()
    }

    /// Detail currently appended to the switch label, empty when none.
    pub fn label_detail(&self) -> String {
        self.state.label_detail()
    }

    /// Re-read the device and profile and show the result on the switch.
    ///
    /// Skipped while a toggle is in flight; abandoned if a toggle starts or
    /// the controller is destroyed while a command is running.
    #[instrument(skip(self))]
    pub async fn sync(&self) -> SyncOutcome {
        if self.state.should_abandon() {
            return SyncOutcome::Skipped;
        }

        let target = self.backend.target_device().await;

        if self.state.should_abandon() {
            debug!("Sync abandoned after device discovery");
            return SyncOutcome::Abandoned;
        }

        let device = match target {
            Ok(device) => device,
            Err(e) => {
                debug!(error = %e, "No device to show");
                return self.show_unavailable(e.detail());
            }
        };

        self.view.set_sensitive(true);
        self.set_label_detail("");

        let profile = self.backend.get_active_profile(&device).await;

        if self.state.should_abandon() {
            debug!(device = %device, "Sync abandoned after profile read");
            return SyncOutcome::Abandoned;
        }

        let profile = match profile {
            Ok(profile) => profile,
            Err(e) => {
                debug!(device = %device, error = %e, "Active profile unavailable");
                return self.show_unavailable(format!("{}: {}", device, e.detail()));
            }
        };

        let headset = self.settings.roles.is_headset(&profile);
        self.display_toggle(headset);

        debug!(device = %device, profile = %profile, headset, "Switch synced");

        SyncOutcome::Displayed {
            device,
            profile,
            headset,
        }
    }

    /// Accept or reject a user toggle event.
    ///
    /// Acceptance takes the busy flag before returning, so a background sync
    /// that resumes afterwards discards its result.
    ///
    /// # Errors
    ///
    /// Returns the reason the event was ignored.
    pub fn begin_toggle(&self, enabled: bool) -> Result<ToggleTicket, ToggleRejection> {
        if self.state.is_toggle_suppressed() {
            return Err(ToggleRejection::Suppressed);
        }

        if self.state.is_destroyed() {
            return Err(ToggleRejection::Destroyed);
        }

        let busy = self
            .state
            .try_acquire_busy()
            .ok_or(ToggleRejection::Busy)?;

        // The host already flipped the switch when the user clicked it.
        self.state.set_displayed(enabled);

        let request_id = Uuid::new_v4();
        info!(request_id = %request_id, enabled, "Toggle accepted");

        Ok(ToggleTicket {
            enabled,
            request_id,
            busy,
        })
    }

    /// Carry out an accepted toggle, then confirm the result with a sync.
    ///
    /// The busy flag is released once the change and its notification are
    /// done, before the settle delay. The switch is re-enabled unless there
    /// was no device to switch.
    #[instrument(skip(self, ticket), fields(request_id = %ticket.request_id, enabled = ticket.enabled))]
    pub async fn run_toggle(&self, ticket: ToggleTicket) -> ToggleOutcome {
        let ToggleTicket { enabled, busy, .. } = ticket;

        self.view.set_sensitive(false);

        let outcome = self.switch_profile(enabled).await;

        drop(busy);

        if self.state.is_destroyed() {
            return outcome;
        }

        if !matches!(outcome, ToggleOutcome::NoDevice { .. }) {
            self.view.set_sensitive(true);
        }

        tokio::time::sleep(self.settings.settle_delay).await;

        if !self.state.is_destroyed() {
            let confirmed = self.sync().await;
            debug!(?confirmed, "Confirm sync finished");
        }

        outcome
    }

    /// [`Controller::begin_toggle`] followed by [`Controller::run_toggle`].
    ///
    /// # Errors
    ///
    /// Returns the reason the toggle was not started.
    pub async fn toggle(&self, enabled: bool) -> Result<ToggleOutcome, ToggleRejection> {
        let ticket = self.begin_toggle(enabled)?;
        Ok(self.run_toggle(ticket).await)
    }

    /// Start the periodic sync. The first pass runs immediately.
    ///
    /// Must be called from within a tokio runtime. The poll task only holds
    /// a weak handle, so it ends once the controller is dropped or destroyed.
    pub fn start_polling(self: &Arc<Self>) {
        if self.state.is_destroyed() {
            return;
        }

        let weak = Arc::downgrade(self);
        let period = self.settings.poll_interval.max(MIN_POLL_INTERVAL);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                let Some(controller) = weak.upgrade() else {
                    break;
                };
                if controller.is_destroyed() {
                    break;
                }

                controller.sync().await;
            }

            debug!("Poll loop stopped");
        });

        let previous = self
            .poll_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }

        info!(period_ms = period.as_millis(), "Polling started");
    }

    /// Tear down: stop polling, dispose the view, and make every in-flight
    /// continuation a no-op. Calling it again does nothing.
    #[instrument(skip(self))]
    pub fn destroy(&self) {
        if !self.state.mark_destroyed() {
            return;
        }

        let poll_task = self
            .poll_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(handle) = poll_task {
            handle.abort();
        }

        self.view.dispose();

        info!("Controller destroyed");
    }

    async fn switch_profile(&self, enabled: bool) -> ToggleOutcome {
        let device = self.backend.target_device().await;

        if self.state.is_destroyed() {
            return ToggleOutcome::Abandoned;
        }

        let device = match device {
            Ok(device) => device,
            Err(e) => {
                warn!(error = %e, "No device to switch");
                let detail = e.detail();
                self.notify_error(&detail);
                return match e {
                    SwitchError::NoDevice { .. } => ToggleOutcome::NoDevice { detail },
                    _ => ToggleOutcome::Failed { detail },
                };
            }
        };

        let profile = self.settings.roles.target(enabled).clone();
        let result = self.backend.set_profile(&device, &profile).await;

        if self.state.is_destroyed() {
            return ToggleOutcome::Abandoned;
        }

        if !result.success {
            let error = result.into_error();
            warn!(device = %device, profile = %profile, error = %error, "Profile switch failed");
            let detail = error.detail();
            self.notify_error(&detail);
            return ToggleOutcome::Failed { detail };
        }

        if self.settings.notify_on_switch {
            self.notifier.notify(&switch_message(enabled));
        }

        info!(device = %device, profile = %profile, "Profile switched");

        ToggleOutcome::Switched { device, profile }
    }

    fn show_unavailable(&self, detail: String) -> SyncOutcome {
        self.set_label_detail(&detail);
        self.view.set_sensitive(false);
        SyncOutcome::Unavailable { detail }
    }

    fn display_toggle(&self, on: bool) {
        let _suppressed = self.state.suppress_toggle_events();
        self.state.set_displayed(on);
        self.view.set_toggle_state(on);
    }

    fn set_label_detail(&self, detail: &str) {
        if self.state.replace_label_detail(detail) {
            self.view.set_label(&toggle_label(detail));
        }
    }

    fn notify_error(&self, message: &str) {
        if let Err(e) = self.notifier.notify_error(NOTIFICATION_TITLE, message) {
            warn!(error = %e, "Error notification unavailable, falling back");
            self.notifier
                .notify(&format!("{}: {}", NOTIFICATION_TITLE, message));
        }
    }
}
