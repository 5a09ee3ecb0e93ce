use crate::keypad::ScanCodeSource;
use crate::types::DeviceId;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Device identity a profile has latched onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    Unbound,
    Bound(DeviceId),
}

/// The three logical sources of the home key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProfileId {
    /// Mechanical switch.
    HomePress,
    /// Goodix GF3208 fingerprint/touch sensor.
    HomeTouchGf3208,
    /// IDEX touch sensor.
    HomeTouchIdex,
}

impl ProfileId {
    pub const ALL: [ProfileId; 3] = [
        ProfileId::HomePress,
        ProfileId::HomeTouchGf3208,
        ProfileId::HomeTouchIdex,
    ];

    /// Touch variants in the order they are tried.
    pub const TOUCH: [ProfileId; 2] = [ProfileId::HomeTouchGf3208, ProfileId::HomeTouchIdex];

    /// Name of the keypad entry holding this profile's scan code.
    pub const fn config_key(self) -> &'static str {
        match self {
            ProfileId::HomePress => "home_press",
            ProfileId::HomeTouchGf3208 | ProfileId::HomeTouchIdex => "home_touch",
        }
    }

    /// Input device name reported by the hardware.
    pub const fn label(self) -> &'static str {
        match self {
            ProfileId::HomePress => "gpio-keys",
            ProfileId::HomeTouchGf3208 => "gf3208",
            ProfileId::HomeTouchIdex => "ix_btp",
        }
    }

    const fn index(self) -> usize {
        match self {
            ProfileId::HomePress => 0,
            ProfileId::HomeTouchGf3208 => 1,
            ProfileId::HomeTouchIdex => 2,
        }
    }
}

/// One logical key source. `label` and `scan_code` are fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyProfile {
    label: String,
    scan_code: i32,
    pub(crate) binding: Binding,
    pub(crate) last_key_code: Option<i32>,
}

impl KeyProfile {
    pub fn new(label: impl Into<String>, scan_code: i32) -> Self {
        Self {
            label: label.into(),
            scan_code,
            binding: Binding::Unbound,
            last_key_code: None,
        }
    }

    /// Resolves the scan code from `source`, falling back to 0.
    pub fn resolve(label: impl Into<String>, config_key: &str, source: &dyn ScanCodeSource) -> Self {
        let label = label.into();
        let scan_code = source.read_scan_code(config_key).unwrap_or_else(|| {
            debug!(
                "No scan code for {} ({}), defaulting to 0",
                label, config_key
            );
            0
        });
        Self::new(label, scan_code)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn scan_code(&self) -> i32 {
        self.scan_code
    }

    pub fn binding(&self) -> Binding {
        self.binding
    }

    /// Key code of the most recent matching event.
    pub fn last_key_code(&self) -> Option<i32> {
        self.last_key_code
    }
}

/// The fixed set of home-key profiles.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: [KeyProfile; 3],
}

impl ProfileRegistry {
    pub fn load(source: &dyn ScanCodeSource) -> Self {
        let profiles =
            ProfileId::ALL.map(|id| KeyProfile::resolve(id.label(), id.config_key(), source));
        for (id, p) in ProfileId::ALL.iter().zip(profiles.iter()) {
            info!(
                "Profile {:?}: device={} scan_code={}",
                id,
                p.label(),
                p.scan_code()
            );
        }
        Self { profiles }
    }

    /// Builds the registry with explicit scan codes (press, gf3208, idex).
    pub fn with_scan_codes(press: i32, touch_gf3208: i32, touch_idex: i32) -> Self {
        Self {
            profiles: [
                KeyProfile::new(ProfileId::HomePress.label(), press),
                KeyProfile::new(ProfileId::HomeTouchGf3208.label(), touch_gf3208),
                KeyProfile::new(ProfileId::HomeTouchIdex.label(), touch_idex),
            ],
        }
    }

    pub fn get(&self, id: ProfileId) -> &KeyProfile {
        &self.profiles[id.index()]
    }

    pub fn get_mut(&mut self, id: ProfileId) -> &mut KeyProfile {
        &mut self.profiles[id.index()]
    }
}
