//! Scripted collaborators for controller and backend tests.

use crate::{
    AudioBackend, CommandResult, CommandRunner, Controller, ControllerSettings, CoreResult,
    Notifier, SwitchError, ToggleRejection, ToggleView,
};

use std::{
    collections::HashMap,
    panic::Location,
    sync::{
        Arc, Mutex, MutexGuard, OnceLock, PoisonError, Weak,
        atomic::{AtomicBool, Ordering},
    },
};

use error_location::ErrorLocation;
use tokio::sync::Notify;

pub(crate) const BT_CARD: &str = "bluez_card.00_1B_66_AA_BB_CC";
pub(crate) const ALSA_CARD: &str = "alsa_card.pci-0000_00_1f.3";

pub(crate) type TestController = Controller<FakePactl, RecordingView, RecordingNotifier>;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

struct FakeCard {
    name: String,
    active_profile: Option<String>,
}

struct Hold {
    args: String,
    point: HoldPoint,
}

/// Lets a test park one command after its output was computed.
#[derive(Clone, Default)]
pub(crate) struct HoldPoint {
    reached: Arc<Notify>,
    release: Arc<Notify>,
}

impl HoldPoint {
    /// Wait until the held command has been issued.
    pub(crate) async fn reached(&self) {
        self.reached.notified().await;
    }

    /// Let the held command complete with its already computed output.
    pub(crate) fn release(&self) {
        self.release.notify_one();
    }
}

#[derive(Default)]
struct FakePactlInner {
    cards: Mutex<Vec<FakeCard>>,
    failures: Mutex<HashMap<String, CommandResult>>,
    holds: Mutex<Vec<Hold>>,
    calls: Mutex<Vec<Vec<String>>>,
}

/// In-memory stand-in for `pactl` and its card table.
#[derive(Clone, Default)]
pub(crate) struct FakePactl {
    inner: Arc<FakePactlInner>,
}

impl FakePactl {
    pub(crate) fn with_cards(cards: &[(&str, &str)]) -> Self {
        let pactl = Self::default();
        for (name, profile) in cards {
            pactl.add_card(name, Some(profile));
        }
        pactl
    }

    pub(crate) fn add_card(&self, name: &str, active_profile: Option<&str>) {
        lock(&self.inner.cards).push(FakeCard {
            name: name.to_string(),
            active_profile: active_profile.map(str::to_string),
        });
    }

    pub(crate) fn remove_card(&self, name: &str) {
        lock(&self.inner.cards).retain(|card| card.name != name);
    }

    /// Make every call with these arguments fail with `stderr`.
    pub(crate) fn fail(&self, args: &str, stderr: &str) {
        lock(&self.inner.failures).insert(
            args.to_string(),
            CommandResult {
                success: false,
                stdout: String::new(),
                stderr: stderr.to_string(),
                exit_status: 1,
            },
        );
    }

    /// Park the next call with these arguments until released.
    pub(crate) fn hold(&self, args: &str) -> HoldPoint {
        let point = HoldPoint::default();
        lock(&self.inner.holds).push(Hold {
            args: args.to_string(),
            point: point.clone(),
        });
        point
    }

    pub(crate) fn calls(&self) -> Vec<Vec<String>> {
        lock(&self.inner.calls).clone()
    }

    pub(crate) fn call_count(&self, args: &str) -> usize {
        lock(&self.inner.calls)
            .iter()
            .filter(|argv| argv.get(1..).map(|rest| rest.join(" ")).as_deref() == Some(args))
            .count()
    }

    pub(crate) fn active_profile(&self, name: &str) -> Option<String> {
        lock(&self.inner.cards)
            .iter()
            .find(|card| card.name == name)
            .and_then(|card| card.active_profile.clone())
    }

    fn respond(&self, args: &[String]) -> CommandResult {
        let key = args.join(" ");
        if let Some(failure) = lock(&self.inner.failures).get(&key) {
            return failure.clone();
        }

        let words: Vec<&str> = args.iter().map(String::as_str).collect();
        match words.as_slice() {
            ["list", "cards", "short"] => ok(self.short_listing()),
            ["list", "cards"] => ok(self.long_listing()),
            ["set-card-profile", name, profile] => {
                let mut cards = lock(&self.inner.cards);
                match cards.iter_mut().find(|card| card.name == *name) {
                    Some(card) => {
                        card.active_profile = Some((*profile).to_string());
                        ok(String::new())
                    }
                    None => CommandResult {
                        success: false,
                        stdout: String::new(),
                        stderr: "Failure: No such entity\n".to_string(),
                        exit_status: 1,
                    },
                }
            }
            _ => CommandResult {
                success: false,
                stdout: String::new(),
                stderr: format!("Unknown command: {}", key),
                exit_status: 1,
            },
        }
    }

    fn short_listing(&self) -> String {
        lock(&self.inner.cards)
            .iter()
            .enumerate()
            .map(|(index, card)| format!("{}\t{}\tmodule-bluez5-device.c\n", index, card.name))
            .collect()
    }

    fn long_listing(&self) -> String {
        lock(&self.inner.cards)
            .iter()
            .enumerate()
            .map(|(index, card)| card_record(index, &card.name, card.active_profile.as_deref()))
            .collect()
    }
}

impl CommandRunner for FakePactl {
    async fn run(&self, argv: &[String]) -> CommandResult {
        lock(&self.inner.calls).push(argv.to_vec());

        let args = argv.get(1..).unwrap_or_default();
        let result = self.respond(args);

        let key = args.join(" ");
        let hold = {
            let mut holds = lock(&self.inner.holds);
            holds
                .iter()
                .position(|hold| hold.args == key)
                .map(|index| holds.remove(index).point)
        };

        if let Some(point) = hold {
            point.reached.notify_one();
            point.release.notified().await;
        }

        result
    }
}

fn ok(stdout: String) -> CommandResult {
    CommandResult {
        success: true,
        stdout,
        stderr: String::new(),
        exit_status: 0,
    }
}

/// One card record in `pactl list cards` format.
pub(crate) fn card_record(index: usize, name: &str, active_profile: Option<&str>) -> String {
    let mut record = format!(
        "Card #{index}\n\
         \tName: {name}\n\
         \tDriver: module-bluez5-device.c\n\
         \tOwner Module: {module}\n\
         \tProperties:\n\
         \t\tdevice.description = \"WH-1000XM4\"\n\
         \tProfiles:\n\
         \t\ta2dp-sink: High Fidelity Playback (A2DP Sink) (sinks: 1, sources: 0, priority: 40, available: yes)\n\
         \t\theadset-head-unit: Headset Head Unit (HSP/HFP) (sinks: 1, sources: 1, priority: 30, available: yes)\n\
         \t\toff: Off (sinks: 0, sources: 0, priority: 0, available: yes)\n",
        module = index + 20,
    );
    if let Some(profile) = active_profile {
        record.push_str(&format!("\tActive Profile: {}\n", profile));
    }
    record.push_str("\tPorts:\n\t\theadphone-output: Headphone (type: Headphones, priority: 0)\n\n");
    record
}

/// Everything the controller did to the switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ViewEvent {
    Toggle(bool),
    Sensitive(bool),
    Label(String),
    Disposed,
}

#[derive(Clone, Default)]
pub(crate) struct RecordingView {
    events: Arc<Mutex<Vec<ViewEvent>>>,
}

impl RecordingView {
    pub(crate) fn events(&self) -> Vec<ViewEvent> {
        lock(&self.events).clone()
    }

    pub(crate) fn event_count(&self) -> usize {
        lock(&self.events).len()
    }

    pub(crate) fn toggle_states(&self) -> Vec<bool> {
        lock(&self.events)
            .iter()
            .filter_map(|event| match event {
                ViewEvent::Toggle(on) => Some(*on),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn last_toggle(&self) -> Option<bool> {
        self.toggle_states().last().copied()
    }

    pub(crate) fn last_sensitive(&self) -> Option<bool> {
        lock(&self.events).iter().rev().find_map(|event| match event {
            ViewEvent::Sensitive(sensitive) => Some(*sensitive),
            _ => None,
        })
    }

    pub(crate) fn last_label(&self) -> Option<String> {
        lock(&self.events).iter().rev().find_map(|event| match event {
            ViewEvent::Label(text) => Some(text.clone()),
            _ => None,
        })
    }

    fn record(&self, event: ViewEvent) {
        lock(&self.events).push(event);
    }
}

impl ToggleView for RecordingView {
    fn set_toggle_state(&self, on: bool) {
        self.record(ViewEvent::Toggle(on));
    }

    fn set_sensitive(&self, sensitive: bool) {
        self.record(ViewEvent::Sensitive(sensitive));
    }

    fn set_label(&self, text: &str) {
        self.record(ViewEvent::Label(text.to_string()));
    }

    fn dispose(&self) {
        self.record(ViewEvent::Disposed);
    }
}

pub(crate) type EchoController = Controller<FakePactl, EchoingView, RecordingNotifier>;

/// View whose switch fires a toggle event on every programmatic update,
/// the way some widget toolkits do.
#[derive(Default)]
pub(crate) struct EchoingView {
    recorder: RecordingView,
    controller: OnceLock<Weak<EchoController>>,
    echoes: Mutex<Vec<Result<bool, ToggleRejection>>>,
}

impl EchoingView {
    pub(crate) fn bind(&self, controller: &Arc<EchoController>) {
        let _ = self.controller.set(Arc::downgrade(controller));
    }

    pub(crate) fn recorder(&self) -> &RecordingView {
        &self.recorder
    }

    pub(crate) fn echoes(&self) -> Vec<Result<bool, ToggleRejection>> {
        lock(&self.echoes).clone()
    }
}

impl ToggleView for EchoingView {
    fn set_toggle_state(&self, on: bool) {
        self.recorder.set_toggle_state(on);

        let Some(controller) = self.controller.get().and_then(Weak::upgrade) else {
            return;
        };
        let echo = controller.begin_toggle(on).map(|ticket| ticket.enabled());
        lock(&self.echoes).push(echo);
    }

    fn set_sensitive(&self, sensitive: bool) {
        self.recorder.set_sensitive(sensitive);
    }

    fn set_label(&self, text: &str) {
        self.recorder.set_label(text);
    }

    fn dispose(&self) {
        self.recorder.dispose();
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Notice {
    Info(String),
    Error { title: String, message: String },
}

#[derive(Clone, Default)]
pub(crate) struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
    errors_unavailable: Arc<AtomicBool>,
}

impl RecordingNotifier {
    pub(crate) fn notices(&self) -> Vec<Notice> {
        lock(&self.notices).clone()
    }

    /// Make the rich error form fail so the fallback path runs.
    pub(crate) fn disable_error_form(&self) {
        self.errors_unavailable.store(true, Ordering::SeqCst);
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        lock(&self.notices).push(Notice::Info(message.to_string()));
    }

    fn notify_error(&self, title: &str, message: &str) -> CoreResult<()> {
        if self.errors_unavailable.load(Ordering::SeqCst) {
            return Err(SwitchError::NotificationFailed {
                reason: "error notifications unavailable".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        lock(&self.notices).push(Notice::Error {
            title: title.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }
}

pub(crate) fn build_controller(
    pactl: &FakePactl,
    view: &RecordingView,
    notifier: &RecordingNotifier,
) -> TestController {
    Controller::new(
        AudioBackend::new(pactl.clone()),
        view.clone(),
        notifier.clone(),
        ControllerSettings::default(),
    )
}

pub(crate) fn controller(
    pactl: &FakePactl,
    view: &RecordingView,
    notifier: &RecordingNotifier,
) -> Arc<TestController> {
    Arc::new(build_controller(pactl, view, notifier))
}

pub(crate) fn echo_controller(pactl: &FakePactl) -> Arc<EchoController> {
    let controller = Arc::new(Controller::new(
        AudioBackend::new(pactl.clone()),
        EchoingView::default(),
        RecordingNotifier::default(),
        ControllerSettings::default(),
    ));
    controller.view().bind(&controller);
    controller
}
