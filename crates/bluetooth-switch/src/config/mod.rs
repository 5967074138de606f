mod backend_config;
mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod profiles_config;
mod timing_config;

pub(crate) use {
    backend_config::BackendConfig, behaviour_config::BehaviourConfig, config::Config,
    profiles_config::ProfilesConfig, timing_config::TimingConfig,
};

use bluetooth_switch_core::{
    BLUETOOTH_CARD_PREFIX, DEFAULT_HEADSET_PROFILE, DEFAULT_HIGH_FIDELITY_PROFILE,
    DEFAULT_POLL_INTERVAL, DEFAULT_PROGRAM, DEFAULT_SETTLE_DELAY,
};

pub(crate) const DEFAULT_NOTIFY_ON_SWITCH: bool = true;

pub(crate) fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

pub(crate) fn default_device_prefix() -> String {
    BLUETOOTH_CARD_PREFIX.to_string()
}

pub(crate) fn default_high_fidelity() -> String {
    DEFAULT_HIGH_FIDELITY_PROFILE.to_string()
}

pub(crate) fn default_headset() -> String {
    DEFAULT_HEADSET_PROFILE.to_string()
}

pub(crate) fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

pub(crate) fn default_settle_delay_ms() -> u64 {
    DEFAULT_SETTLE_DELAY.as_millis() as u64
}

pub(crate) fn default_notify_on_switch() -> bool {
    DEFAULT_NOTIFY_ON_SWITCH
}
