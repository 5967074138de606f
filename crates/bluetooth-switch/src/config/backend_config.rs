use crate::config::{default_device_prefix, default_program};

use serde::{Deserialize, Serialize};

/// Audio control tool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Program invoked for card listing and profile changes.
    #[serde(default = "default_program")]
    pub program: String,

    /// Card name prefix that marks Bluetooth devices.
    #[serde(default = "default_device_prefix")]
    pub device_prefix: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            device_prefix: default_device_prefix(),
        }
    }
}
