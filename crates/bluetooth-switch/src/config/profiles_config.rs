use crate::config::{default_headset, default_high_fidelity};

use bluetooth_switch_core::{ProfileName, ProfileRoles};
use serde::{Deserialize, Serialize};

/// Profiles the switch toggles between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilesConfig {
    /// Profile used while the switch is off.
    #[serde(default = "default_high_fidelity")]
    pub high_fidelity: String,

    /// Profile used while the switch is on. Codec variants that start with
    /// this name also count as headset mode.
    #[serde(default = "default_headset")]
    pub headset: String,
}

impl ProfilesConfig {
    /// Convert to the roles the controller works with.
    pub fn roles(&self) -> ProfileRoles {
        ProfileRoles {
            high_fidelity: ProfileName::new(self.high_fidelity.trim()),
            headset: ProfileName::new(self.headset.trim()),
        }
    }
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            high_fidelity: default_high_fidelity(),
            headset: default_headset(),
        }
    }
}
