use crate::config::{default_poll_interval_secs, default_settle_delay_ms};

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Polling and settle timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Seconds between background syncs.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Milliseconds to wait after a profile change before confirming it.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl TimingConfig {
    /// Poll interval as a duration.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Settle delay as a duration.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}
