use std::fmt;

/// Default high-fidelity stereo profile.
pub const DEFAULT_HIGH_FIDELITY_PROFILE: &str = "a2dp-sink";
/// Default bidirectional headset profile.
pub const DEFAULT_HEADSET_PROFILE: &str = "headset-head-unit";

const ACTIVE_PROFILE_PREFIX: &str = "Active Profile:";
const CARD_HEADER_PREFIX: &str = "Card #";

/// Opaque audio profile identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProfileName(String);

impl ProfileName {
    /// Wrap a profile identifier.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identifier as the audio tool spells it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this profile plays `role`, either exactly or as a codec variant
    /// (`headset-head-unit-msbc` plays `headset-head-unit`).
    pub fn plays_role(&self, role: &ProfileName) -> bool {
        self.0 == role.0 || self.0.starts_with(&role.0)
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two profiles the toggle switches between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRoles {
    /// Profile used while the toggle is off.
    pub high_fidelity: ProfileName,
    /// Profile used while the toggle is on.
    pub headset: ProfileName,
}

impl ProfileRoles {
    /// Whether the active profile means headset mode.
    pub fn is_headset(&self, active: &ProfileName) -> bool {
        active.plays_role(&self.headset)
    }

    /// Profile to request for a toggle state.
    pub fn target(&self, headset: bool) -> &ProfileName {
        if headset {
            &self.headset
        } else {
            &self.high_fidelity
        }
    }
}

impl Default for ProfileRoles {
    fn default() -> Self {
        Self {
            high_fidelity: ProfileName::new(DEFAULT_HIGH_FIDELITY_PROFILE),
            headset: ProfileName::new(DEFAULT_HEADSET_PROFILE),
        }
    }
}

/// Find the active profile of `device` in the long card listing.
///
/// Records start at a `Card #` header; the record is selected by its
/// `Name:` line, and the first `Active Profile:` line inside it wins.
pub(crate) fn parse_active_profile(output: &str, device: &str) -> Option<ProfileName> {
    let mut in_card = false;

    for line in output.lines() {
        if line.starts_with(CARD_HEADER_PREFIX) {
            in_card = false;
            continue;
        }

        let trimmed = line.trim();
        if trimmed.strip_prefix("Name:").map(str::trim) == Some(device) {
            in_card = true;
            continue;
        }

        if !in_card {
            continue;
        }

        if let Some(profile) = trimmed.strip_prefix(ACTIVE_PROFILE_PREFIX) {
            return Some(ProfileName::new(profile.trim()));
        }
    }

    None
}
