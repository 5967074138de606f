//! Bluetooth Switch: tray toggle between A2DP and headset profiles.

mod app;
mod config;
mod desktop_notifier;
mod error;
mod tray_command;
mod tray_icon_state;
mod tray_manager;
mod tray_view;

pub(crate) use {
    app::App,
    desktop_notifier::DesktopNotifier,
    error::{AppError, Result as AppResult},
    tray_command::TrayCommand,
    tray_icon_state::TrayIconState,
    tray_manager::TrayManager,
    tray_view::TrayView,
};

use crate::config::Config;

use std::panic::Location;

use error_location::ErrorLocation;
use tao::{
    event::{Event, StartCause},
    event_loop::{ControlFlow, EventLoopBuilder},
};
use tokio::runtime::Runtime;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "bluetooth_switch=debug,bluetooth_switch_core=debug";

/// Application entry point.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let event_loop = EventLoopBuilder::<TrayCommand>::with_user_event().build();
    let tray_proxy = event_loop.create_proxy();

    // TrayManager lives on the main thread - TrayIcon is !Send on all platforms.
    // Taken out on Detach so the icon disappears before shutdown completes.
    let mut tray_manager = match TrayManager::new() {
        Ok(tm) => Some(tm),
        Err(e) => {
            error!("Failed to create TrayManager: {:?}", e);
            std::process::exit(1);
        }
    };

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::UserEvent(cmd) => match cmd {
                TrayCommand::Shutdown => {
                    *control_flow = ControlFlow::ExitWithCode(0);
                }
                TrayCommand::Detach => {
                    if tray_manager.take().is_some() {
                        info!("Tray icon removed");
                    }
                }
                cmd => {
                    if let Some(tm) = tray_manager.as_mut() {
                        if let Err(e) = tm.apply(cmd) {
                            error!(error = ?e, "Failed to update tray icon");
                        }
                    }
                }
            },
            Event::NewEvents(StartCause::Init) => {
                let config = match Config::load() {
                    Ok(c) => c,
                    Err(e) => {
                        error!("Failed to load config: {:?}", e);
                        std::process::exit(1);
                    }
                };

                let Some(tm) = tray_manager.as_ref() else {
                    return;
                };

                let app = App {
                    config,
                    tray_proxy: tray_proxy.clone(),
                    toggle_menu_id: tm.toggle_item_id().clone(),
                    exit_menu_id: tm.exit_item_id().clone(),
                };

                // Spawn tokio runtime on separate thread.
                // TrayManager stays on the main thread.
                std::thread::spawn(move || {
                    let rt = match build_runtime() {
                        Ok(rt) => rt,
                        Err(e) => {
                            error!("Failed to create tokio runtime: {:?}", e);
                            std::process::exit(1);
                        }
                    };

                    if let Err(e) = rt.block_on(app.run()) {
                        error!(error = ?e, "App error");
                    }
                });
            }
            _ => {}
        }
    });
}

/// Single-threaded runtime driving the controller and menu events.
#[track_caller]
fn build_runtime() -> AppResult<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::RuntimeError {
            reason: format!("Failed to create tokio runtime: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
}
