//! Configuration management for bluetooth-switch.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, validation, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{BackendConfig, BehaviourConfig, ProfilesConfig, TimingConfig},
};

use std::{fs, io::Write, panic::Location, path::PathBuf};

use bluetooth_switch_core::ControllerSettings;
use directories::ProjectDirs;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Audio control tool settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Profiles the switch toggles between.
    #[serde(default)]
    pub profiles: ProfilesConfig,
    /// Polling and settle timing.
    #[serde(default)]
    pub timing: TimingConfig,
    /// Application behavior settings.
    #[serde(default)]
    pub behaviour: BehaviourConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path).map_err(|e| AppError::ConfigError {
                reason: format!("Failed to read config: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

            let config = Self::parse(&contents)?;

            info!(config_path = ?config_path, "Configuration loaded");

            Ok(config)
        } else {
            info!("No config found, creating default");
            Self::create_default()
        }
    }

    /// Parse and validate configuration text. Missing fields take defaults.
    #[track_caller]
    pub fn parse(contents: &str) -> AppResult<Self> {
        let config: Config = toml::from_str(contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Reject settings the controller cannot work with.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        let reason = if self.backend.program.trim().is_empty() {
            Some("backend.program must not be empty".to_string())
        } else if self.backend.device_prefix.trim().is_empty() {
            Some("backend.device_prefix must not be empty".to_string())
        } else if self.profiles.high_fidelity.trim().is_empty()
            || self.profiles.headset.trim().is_empty()
        {
            Some("profiles.high_fidelity and profiles.headset must not be empty".to_string())
        } else if self.profiles.high_fidelity.trim() == self.profiles.headset.trim() {
            Some(format!(
                "profiles.high_fidelity and profiles.headset are both {:?}",
                self.profiles.headset
            ))
        } else if self.timing.poll_interval_secs == 0 {
            Some("timing.poll_interval_secs must be at least 1".to_string())
        } else {
            None
        };

        match reason {
            Some(reason) => Err(AppError::ConfigError {
                reason,
                location: ErrorLocation::from(Location::caller()),
            }),
            None => Ok(()),
        }
    }

    /// Controller settings derived from this configuration.
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            roles: self.profiles.roles(),
            poll_interval: self.timing.poll_interval(),
            settle_delay: self.timing.settle_delay(),
            notify_on_switch: self.behaviour.notify_on_switch,
        }
    }

    /// Save configuration to disk using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    #[instrument]
    pub fn save(&self) -> AppResult<()> {
        let config_path = Self::config_path()?;

        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, &config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = ProjectDirs::from("com", "bluetooth-switch", "Bluetooth-Switch")
            .ok_or_else(|| AppError::ConfigError {
                reason: "Failed to get config directory".to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn create_default() -> AppResult<Self> {
        let config = Config::default();

        config.save()?;

        info!(
            program = %config.backend.program,
            "Default config created"
        );

        Ok(config)
    }
}
