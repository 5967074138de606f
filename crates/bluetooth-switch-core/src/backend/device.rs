use std::fmt;

/// Card name prefix the Bluetooth audio stack assigns to its devices.
pub const BLUETOOTH_CARD_PREFIX: &str = "bluez_card.";

/// An audio card as named by the audio subsystem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Device {
    name: String,
}

impl Device {
    /// Wrap a card name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The card name, as passed back to the audio tool.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the card name carries the given origin prefix.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.name.starts_with(prefix)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Parse the short card listing: one card per line, name in the second field.
///
/// Blank lines and lines with fewer than two fields are skipped.
pub(crate) fn parse_cards_short(output: &str) -> Vec<Device> {
    output
        .lines()
        .filter_map(|line| line.split_whitespace().nth(1))
        .map(Device::new)
        .collect()
}

/// Pick the canonical device: the lexicographically smallest name.
///
/// Stable across polls even when the listing order changes.
pub fn select_canonical(devices: &[Device]) -> Option<&Device> {
    devices.iter().min()
}
