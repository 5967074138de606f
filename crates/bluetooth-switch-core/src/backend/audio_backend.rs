//! Device discovery, profile reading and profile writing over the audio
//! control tool.

use crate::{
    CoreResult, SwitchError,
    backend::{
        BLUETOOTH_CARD_PREFIX, Device, ProfileName, parse_active_profile, parse_cards_short,
        select_canonical,
    },
    command::{CommandResult, CommandRunner},
};

use std::panic::Location;

use error_location::ErrorLocation;
use tracing::{debug, info, instrument, warn};

/// Audio control tool invoked when none is configured.
pub const DEFAULT_PROGRAM: &str = "pactl";

/// Audio control backend driving an external tool through a [`CommandRunner`].
pub struct AudioBackend<R> {
    runner: R,
    program: String,
    device_prefix: String,
}

impl<R: CommandRunner> AudioBackend<R> {
    /// Backend for `pactl` and Bluetooth card names.
    pub fn new(runner: R) -> Self {
        Self::with_program(runner, DEFAULT_PROGRAM, BLUETOOTH_CARD_PREFIX)
    }

    /// Backend for a custom tool path and device name prefix.
    pub fn with_program(
        runner: R,
        program: impl Into<String>,
        device_prefix: impl Into<String>,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            device_prefix: device_prefix.into(),
        }
    }

    /// List Bluetooth devices, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::Discovery`] if the listing command fails or
    /// lists nothing at all.
    #[instrument(skip(self))]
    pub async fn discover_devices(&self) -> CoreResult<Vec<Device>> {
        let result = self.tool(&["list", "cards", "short"]).await;

        if !result.success {
            let stderr = result.stderr.trim();
            let reason = if stderr.is_empty() {
                "Failed to list cards".to_string()
            } else {
                stderr.to_string()
            };
            warn!(exit_status = result.exit_status, reason = %reason, "Card listing failed");
            return Err(SwitchError::Discovery {
                reason,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let all = parse_cards_short(&result.stdout);
        if all.is_empty() {
            return Err(SwitchError::Discovery {
                reason: "No audio cards listed".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut bluetooth: Vec<Device> = all
            .into_iter()
            .filter(|device| device.has_prefix(&self.device_prefix))
            .collect();
        bluetooth.sort();

        debug!(count = bluetooth.len(), "Bluetooth cards discovered");

        Ok(bluetooth)
    }

    /// Resolve the one device the toggle controls.
    ///
    /// # Errors
    ///
    /// Propagates discovery errors and returns [`SwitchError::NoDevice`]
    /// when no Bluetooth card is present.
    #[instrument(skip(self))]
    pub async fn target_device(&self) -> CoreResult<Device> {
        let devices = self.discover_devices().await?;

        select_canonical(&devices)
            .cloned()
            .ok_or_else(|| SwitchError::NoDevice {
                prefix: self.device_prefix.clone(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    /// Read the profile currently active on `device`.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::ProfileNotFound`] if the listing fails or the
    /// device record carries no active profile.
    #[instrument(skip(self, device), fields(device = %device))]
    pub async fn get_active_profile(&self, device: &Device) -> CoreResult<ProfileName> {
        let result = self.tool(&["list", "cards"]).await;

        if !result.success {
            let stderr = result.stderr.trim();
            let reason = if stderr.is_empty() {
                "Failed to read active profile".to_string()
            } else {
                stderr.to_string()
            };
            return Err(SwitchError::ProfileNotFound {
                device: device.name().to_string(),
                reason,
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let profile = parse_active_profile(&result.stdout, device.name()).ok_or_else(|| {
            SwitchError::ProfileNotFound {
                device: device.name().to_string(),
                reason: "Active profile not found for selected card".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })?;

        debug!(device = %device, profile = %profile, "Active profile read");

        Ok(profile)
    }

    /// Ask the audio tool to switch `device` to `profile`.
    ///
    /// The profile is not checked against what the device supports; the
    /// tool's own failure comes back in the result.
    #[instrument(skip(self, device, profile), fields(device = %device, profile = %profile))]
    pub async fn set_profile(&self, device: &Device, profile: &ProfileName) -> CommandResult {
        let result = self
            .tool(&["set-card-profile", device.name(), profile.as_str()])
            .await;

        if result.success {
            info!("Card profile set");
        } else {
            warn!(exit_status = result.exit_status, "Card profile change rejected");
        }

        result
    }

    async fn tool(&self, args: &[&str]) -> CommandResult {
        let argv: Vec<String> = std::iter::once(self.program.clone())
            .chain(args.iter().map(|arg| (*arg).to_string()))
            .collect();
        self.runner.run(&argv).await
    }
}
