mod audio_backend;
mod device;
mod profile;

pub(crate) use {device::parse_cards_short, profile::parse_active_profile};

pub use {
    audio_backend::{AudioBackend, DEFAULT_PROGRAM},
    device::{BLUETOOTH_CARD_PREFIX, Device, select_canonical},
    profile::{DEFAULT_HEADSET_PROFILE, DEFAULT_HIGH_FIDELITY_PROFILE, ProfileName, ProfileRoles},
};
