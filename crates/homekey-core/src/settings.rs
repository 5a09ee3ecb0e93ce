use crate::keypad::DEFAULT_KEYPAD_ROOT;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding one scan code file per key.
    pub keypad_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            keypad_root: PathBuf::from(DEFAULT_KEYPAD_ROOT),
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file. A missing file yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No settings at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("failed to read settings from {:?}", path))
            }
        };
        let settings = serde_json::from_str(&content)
            .with_context(|| format!("invalid settings in {:?}", path))?;
        Ok(settings)
    }
}
