use crate::profile::{Binding, KeyProfile};
use crate::types::{DeviceId, KeyEvent};
use std::collections::HashMap;
use tracing::debug;

/// Looks up the human-readable name of an input device.
pub trait DeviceDirectory {
    fn device_name(&self, id: DeviceId) -> Option<String>;
}

/// Device names known up front.
#[derive(Debug, Clone, Default)]
pub struct DeviceTable {
    names: HashMap<DeviceId, String>,
}

impl DeviceTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: i32, name: impl Into<String>) {
        self.names.insert(DeviceId(id), name.into());
    }

    pub fn remove(&mut self, id: i32) {
        self.names.remove(&DeviceId(id));
    }
}

impl FromIterator<(i32, String)> for DeviceTable {
    fn from_iter<T: IntoIterator<Item = (i32, String)>>(iter: T) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(id, name)| (DeviceId(id), name))
                .collect(),
        }
    }
}

impl DeviceDirectory for DeviceTable {
    fn device_name(&self, id: DeviceId) -> Option<String> {
        self.names.get(&id).cloned()
    }
}

/// Checks whether `event` belongs to `profile`.
///
/// An unbound profile binds to the event's device as soon as the device name
/// equals the profile label, even if the scan code then fails to match.
/// Once bound, only events from that device are considered. On success the
/// event's key code is recorded in the profile.
pub fn matches(profile: &mut KeyProfile, event: &KeyEvent, devices: &dyn DeviceDirectory) -> bool {
    match profile.binding {
        Binding::Unbound => {
            let name = devices.device_name(event.device_id);
            if name.as_deref() != Some(profile.label()) {
                return false;
            }
            debug!(
                "Bound {} to device {}",
                profile.label(),
                event.device_id.0
            );
            profile.binding = Binding::Bound(event.device_id);
        }
        Binding::Bound(id) => {
            if id != event.device_id {
                return false;
            }
        }
    }

    if event.scan_code != profile.scan_code() {
        return false;
    }

    profile.last_key_code = Some(event.key_code);
    true
}
