use crate::config::default_notify_on_switch;

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Whether to announce successful profile changes.
    #[serde(default = "default_notify_on_switch")]
    pub notify_on_switch: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            notify_on_switch: default_notify_on_switch(),
        }
    }
}
