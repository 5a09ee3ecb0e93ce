//! Process-wide handler slot for hosts that deliver events through a plain
//! callback. The lock serializes callers around the whole handler.

use crate::clock::UptimeClock;
use crate::handler::KeyHandler;
use crate::inject::EventSink;
use crate::keypad::ProcKeypad;
use crate::matcher::DeviceDirectory;
use crate::profile::ProfileRegistry;
use crate::settings::Settings;
use crate::types::{KeyEvent, Outcome};
use anyhow::Context;
use parking_lot::Mutex;
use std::path::Path;
use tracing::{info, warn};

lazy_static::lazy_static! {
    static ref HANDLER: Mutex<Option<KeyHandler>> = Mutex::new(None);
}

/// Loads settings from `path` and installs a handler built from them.
pub fn install_handler<P: AsRef<Path>>(
    path: P,
    devices: impl DeviceDirectory + Send + 'static,
    sink: impl EventSink + Send + 'static,
) -> anyhow::Result<()> {
    let settings = Settings::load(path.as_ref())
        .with_context(|| format!("cannot install handler from {:?}", path.as_ref()))?;
    install_with_settings(&settings, devices, sink);
    Ok(())
}

/// Builds a handler from `settings` and makes it the active one.
///
/// The handler's clock counts from system boot, so the initial press-release
/// time of 0 lies far in the past and early touch taps are not suppressed.
pub fn install_with_settings(
    settings: &Settings,
    devices: impl DeviceDirectory + Send + 'static,
    sink: impl EventSink + Send + 'static,
) {
    info!("Installing home key handler...");

    if !settings.keypad_root.is_dir() {
        warn!(
            "Keypad root {:?} missing, all scan codes default to 0",
            settings.keypad_root
        );
    }

    let registry = ProfileRegistry::load(&ProcKeypad::new(&settings.keypad_root));
    install(KeyHandler::new(registry, devices, UptimeClock::since_boot(), sink));
}

/// Makes `handler` the active one, replacing any previous handler.
pub fn install(handler: KeyHandler) {
    let previous = HANDLER.lock().replace(handler);
    if previous.is_some() {
        info!("Replaced previously installed handler.");
    }
    info!("Home key handler installed.");
}

pub fn uninstall_handler() {
    if HANDLER.lock().take().is_some() {
        info!("Home key handler uninstalled.");
    }
}

pub fn is_installed() -> bool {
    HANDLER.lock().is_some()
}

/// Entry point for the host's event loop. Without a handler every event
/// passes through.
pub fn handle_key_event(event: &KeyEvent) -> Outcome {
    match HANDLER.lock().as_mut() {
        Some(handler) => handler.handle(event),
        None => Outcome::PassThrough,
    }
}
