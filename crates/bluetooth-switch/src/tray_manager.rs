//! System tray icon with state-based updates.
//!
//! Manages a system tray icon tinted by switch state and a context menu
//! holding the headset-mode check item and Exit.

use crate::{AppError, AppResult, TrayCommand, TrayIconState};

use std::panic::Location;

use bluetooth_switch_core::TOGGLE_BASE_LABEL;
use error_location::ErrorLocation;
use tracing::{debug, info, instrument};
use tray_icon::menu::{CheckMenuItem, Menu, MenuId, MenuItem, PredefinedMenuItem};
use tray_icon::{Icon, TrayIcon, TrayIconBuilder};

const ICON_SIZE: u32 = 32;

/// System tray icon manager.
pub struct TrayManager {
    tray_icon: TrayIcon,
    toggle_item: CheckMenuItem,
    toggle_item_id: MenuId,
    exit_item_id: MenuId,
    checked: bool,
    enabled: bool,
}

impl TrayManager {
    /// Create the tray icon with the switch off and disabled until the
    /// first sync.
    #[track_caller]
    #[instrument]
    pub fn new() -> AppResult<Self> {
        let menu = Menu::new();

        let toggle_item = CheckMenuItem::new(TOGGLE_BASE_LABEL, false, false, None);
        let exit_item = MenuItem::new("Exit", true, None);

        let toggle_id = toggle_item.id().clone();
        let exit_id = exit_item.id().clone();

        menu.append(&toggle_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add switch menu item: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        menu.append(&PredefinedMenuItem::separator())
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to add menu separator: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        menu.append(&exit_item).map_err(|e| AppError::TrayError {
            reason: format!("Failed to add exit menu: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let state = TrayIconState::Unavailable;
        let icon = Self::render_icon(state)?;

        let tray_icon = TrayIconBuilder::new()
            .with_tooltip(state.tooltip())
            .with_menu(Box::new(menu))
            .with_icon(icon)
            .build()
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to create tray icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("System tray icon initialized");

        Ok(Self {
            tray_icon,
            toggle_item,
            toggle_item_id: toggle_id,
            exit_item_id: exit_id,
            checked: false,
            enabled: false,
        })
    }

    /// Apply a switch update coming from the controller.
    ///
    /// Lifecycle commands (`Detach`, `Shutdown`) are handled by the event
    /// loop and ignored here.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn apply(&mut self, command: TrayCommand) -> AppResult<()> {
        match command {
            TrayCommand::SetChecked(checked) => {
                self.toggle_item.set_checked(checked);
                self.checked = checked;
            }
            TrayCommand::SetEnabled(enabled) => {
                self.toggle_item.set_enabled(enabled);
                self.enabled = enabled;
            }
            TrayCommand::SetLabel(text) => {
                self.toggle_item.set_text(text);
                return Ok(());
            }
            TrayCommand::Detach | TrayCommand::Shutdown => return Ok(()),
        }

        self.update_state(TrayIconState::from_switch(self.checked, self.enabled))
    }

    /// Update the tray icon state with new icon and tooltip.
    #[track_caller]
    fn update_state(&mut self, state: TrayIconState) -> AppResult<()> {
        let icon = Self::render_icon(state)?;

        self.tray_icon
            .set_icon(Some(icon))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update icon: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.tray_icon
            .set_tooltip(Some(state.tooltip()))
            .map_err(|e| AppError::TrayError {
                reason: format!("Failed to update tooltip: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        debug!(?state, "Tray icon updated");

        Ok(())
    }

    /// Render the tray glyph: a filled disc in the state's tint.
    #[track_caller]
    fn render_icon(state: TrayIconState) -> AppResult<Icon> {
        let rgba = icon_pixels(state.tint(), ICON_SIZE);

        Icon::from_rgba(rgba, ICON_SIZE, ICON_SIZE).map_err(|e| AppError::TrayError {
            reason: format!("Failed to create icon from RGBA: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Get the headset-mode switch menu item ID.
    pub fn toggle_item_id(&self) -> &MenuId {
        &self.toggle_item_id
    }

    /// Get the exit menu item ID.
    pub fn exit_item_id(&self) -> &MenuId {
        &self.exit_item_id
    }
}

/// RGBA pixels of a `size` x `size` disc, transparent outside.
pub(crate) fn icon_pixels(tint: [u8; 3], size: u32) -> Vec<u8> {
    let center = (size as f32 - 1.0) / 2.0;
    let radius = size as f32 / 2.0 - 1.0;

    let mut rgba = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let alpha = if dx.hypot(dy) <= radius { 0xff } else { 0x00 };
            rgba.extend_from_slice(&[tint[0], tint[1], tint[2], alpha]);
        }
    }
    rgba
}
