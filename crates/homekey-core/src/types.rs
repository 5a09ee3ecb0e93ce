use serde::{Deserialize, Serialize};

/// Opaque handle the input layer assigns to a physical input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceId(pub i32);

/// Key transition reported by the hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyAction {
    Down,
    Up,
}

/// Raw key event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub device_id: DeviceId,
    pub scan_code: i32,
    pub key_code: i32,
    pub action: KeyAction,
}

impl KeyEvent {
    pub const fn new(device_id: i32, scan_code: i32, key_code: i32, action: KeyAction) -> Self {
        Self {
            device_id: DeviceId(device_id),
            scan_code,
            key_code,
            action,
        }
    }

    pub fn is_up(&self) -> bool {
        self.action == KeyAction::Up
    }
}

/// Where a synthesized event claims to come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventOrigin {
    VirtualKeyboard,
}

/// Input class a synthesized event is tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventSource {
    Keyboard,
}

/// Event constructed by the handler and handed to an [`EventSink`](crate::inject::EventSink).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InjectedEvent {
    pub key_code: i32,
    pub action: KeyAction,
    /// Modifier/flag bits. Always zero for events built here.
    pub flags: u32,
    pub origin: EventOrigin,
    pub source: EventSource,
    /// Clock reading (ms) at synthesis time.
    pub t: u64,
}

/// Verdict for the original raw event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// The raw event must not reach downstream consumers.
    Consume,
    /// Deliver the raw event unchanged.
    PassThrough,
}

impl Outcome {
    pub fn is_consumed(self) -> bool {
        matches!(self, Outcome::Consume)
    }
}
