use crate::matcher::{self, DeviceDirectory};
use crate::profile::{ProfileId, ProfileRegistry};
use crate::types::KeyEvent;
use tracing::debug;

/// Touch releases closer than this to the last press release are dropped.
pub const PRESS_TOUCH_THROTTLE_MS: u64 = 200;

/// Result of running the touch path on one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchDecision {
    /// No touch profile claimed the event.
    NotHandled,
    /// Touch release swallowed because the press was released moments ago.
    Suppressed(ProfileId),
    /// Touch release accepted; emit a tap of `key_code`.
    Inject { profile: ProfileId, key_code: i32 },
}

impl TouchDecision {
    pub fn is_handled(self) -> bool {
        !matches!(self, TouchDecision::NotHandled)
    }
}

/// Remembers when the physical button was last released.
///
/// Not synchronized: callers must feed events one at a time.
#[derive(Debug, Clone, Default)]
pub struct DebounceGate {
    last_press_release_at: u64,
}

impl DebounceGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_press_release_at(&self) -> u64 {
        self.last_press_release_at
    }

    /// Touch sensors report a fake down/up pair per tap, so only the release
    /// is looked at. Touch variants are tried in order and the first match
    /// wins.
    pub fn on_touch(
        &self,
        registry: &mut ProfileRegistry,
        event: &KeyEvent,
        devices: &dyn DeviceDirectory,
        now_ms: u64,
    ) -> TouchDecision {
        if !event.is_up() {
            return TouchDecision::NotHandled;
        }

        let Some(id) = ProfileId::TOUCH
            .into_iter()
            .find(|id| matcher::matches(registry.get_mut(*id), event, devices))
        else {
            return TouchDecision::NotHandled;
        };

        // The finger may leave the sensor only after the button came back up.
        let elapsed = now_ms.saturating_sub(self.last_press_release_at);
        if elapsed < PRESS_TOUCH_THROTTLE_MS {
            debug!(
                "Suppressed {} release {}ms after press release",
                id.label(),
                elapsed
            );
            return TouchDecision::Suppressed(id);
        }

        let key_code = registry.get(id).last_key_code().unwrap_or(event.key_code);
        TouchDecision::Inject {
            profile: id,
            key_code,
        }
    }

    /// Records press releases. Never claims the event: the press has to keep
    /// flowing downstream untouched.
    pub fn on_press(
        &mut self,
        registry: &mut ProfileRegistry,
        event: &KeyEvent,
        devices: &dyn DeviceDirectory,
        now_ms: u64,
    ) -> bool {
        if !matcher::matches(registry.get_mut(ProfileId::HomePress), event, devices) {
            return false;
        }

        if event.is_up() {
            self.last_press_release_at = now_ms;
        }

        false
    }
}
