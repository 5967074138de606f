/// Tray icon states corresponding to the switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Device on its high-fidelity stereo profile.
    HighFidelity,
    /// Device on its headset profile.
    Headset,
    /// No device, or its profile could not be read.
    Unavailable,
}

impl TrayIconState {
    /// Icon state for what the switch currently shows.
    pub fn from_switch(checked: bool, enabled: bool) -> Self {
        match (enabled, checked) {
            (false, _) => TrayIconState::Unavailable,
            (true, true) => TrayIconState::Headset,
            (true, false) => TrayIconState::HighFidelity,
        }
    }

    /// Tooltip shown while in this state.
    pub fn tooltip(self) -> &'static str {
        match self {
            TrayIconState::HighFidelity => "Bluetooth Switch - A2DP",
            TrayIconState::Headset => "Bluetooth Switch - Headset",
            TrayIconState::Unavailable => "Bluetooth Switch - Unavailable",
        }
    }

    /// RGB tint of the tray glyph.
    pub fn tint(self) -> [u8; 3] {
        match self {
            TrayIconState::HighFidelity => [0x3d, 0x8b, 0xfd],
            TrayIconState::Headset => [0x2e, 0xc2, 0x7e],
            TrayIconState::Unavailable => [0x9a, 0x99, 0x96],
        }
    }
}
