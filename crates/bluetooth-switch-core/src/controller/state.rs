use std::sync::{
    Arc, Mutex, PoisonError,
    atomic::{AtomicBool, Ordering},
};

/// Flags shared between the controller and its in-flight operations.
///
/// `busy` is the single advisory mutex for user toggles; `destroyed` is
/// terminal. Every continuation re-reads both after resuming.
#[derive(Debug, Default)]
pub(crate) struct ControllerState {
    busy: AtomicBool,
    destroyed: AtomicBool,
    toggle_suppressed: AtomicBool,
    displayed: AtomicBool,
    label_detail: Mutex<String>,
}

impl ControllerState {
    pub(crate) fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    pub(crate) fn is_toggle_suppressed(&self) -> bool {
        self.toggle_suppressed.load(Ordering::SeqCst)
    }

    /// True when a resumed background pass must drop its result.
    pub(crate) fn should_abandon(&self) -> bool {
        self.is_busy() || self.is_destroyed()
    }

    /// Returns false if the state was already destroyed.
    pub(crate) fn mark_destroyed(&self) -> bool {
        !self.destroyed.swap(true, Ordering::SeqCst)
    }

    pub(crate) fn displayed(&self) -> bool {
        self.displayed.load(Ordering::SeqCst)
    }

    pub(crate) fn set_displayed(&self, on: bool) {
        self.displayed.store(on, Ordering::SeqCst);
    }

    pub(crate) fn label_detail(&self) -> String {
        self.label_detail
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Store a new label detail, returning whether it changed.
    pub(crate) fn replace_label_detail(&self, detail: &str) -> bool {
        let mut current = self
            .label_detail
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *current == detail {
            return false;
        }
        *current = detail.to_string();
        true
    }

    /// Take the busy flag if nobody holds it.
    pub(crate) fn try_acquire_busy(self: &Arc<Self>) -> Option<BusyGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard {
                state: Arc::clone(self),
            })
    }

    /// Suppress user toggle handling until the guard drops.
    pub(crate) fn suppress_toggle_events(&self) -> SuppressGuard<'_> {
        self.toggle_suppressed.store(true, Ordering::SeqCst);
        SuppressGuard { state: self }
    }
}

/// RAII guard that releases the busy flag when dropped.
///
/// A toggle ticket that is discarded without being run cannot leave the
/// controller stuck in the busy state.
#[derive(Debug)]
pub(crate) struct BusyGuard {
    state: Arc<ControllerState>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.state.busy.store(false, Ordering::SeqCst);
    }
}

/// RAII guard around a programmatic toggle update.
pub(crate) struct SuppressGuard<'a> {
    state: &'a ControllerState,
}

impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        self.state.toggle_suppressed.store(false, Ordering::SeqCst);
    }
}
