use std::io::{BufRead, BufReader};
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_KEYPAD_ROOT: &str = "/proc/keypad";

/// Resolves the raw scan code a key profile should expect.
pub trait ScanCodeSource {
    /// Returns `None` when the value is missing or unreadable.
    fn read_scan_code(&self, key: &str) -> Option<i32>;
}

#[derive(Debug, Error)]
pub enum KeypadError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path:?} does not hold a decimal scan code: {value:?}")]
    Parse {
        path: PathBuf,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Scan codes exported by the keypad driver, one file per key.
#[derive(Debug, Clone)]
pub struct ProcKeypad {
    root: PathBuf,
}

impl Default for ProcKeypad {
    fn default() -> Self {
        Self::new(DEFAULT_KEYPAD_ROOT)
    }
}

impl ProcKeypad {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads and parses the first line of `<root>/<key>`.
    pub fn try_read(&self, key: &str) -> Result<i32, KeypadError> {
        let path = self.root.join(key);
        let file = std::fs::File::open(&path).map_err(|source| KeypadError::Io {
            path: path.clone(),
            source,
        })?;

        let mut line = String::new();
        BufReader::new(file)
            .read_line(&mut line)
            .map_err(|source| KeypadError::Io {
                path: path.clone(),
                source,
            })?;

        let value = line.trim();
        value.parse::<i32>().map_err(|source| KeypadError::Parse {
            path,
            value: value.to_string(),
            source,
        })
    }
}

impl ScanCodeSource for ProcKeypad {
    fn read_scan_code(&self, key: &str) -> Option<i32> {
        match self.try_read(key) {
            Ok(sc) => Some(sc),
            Err(e) => {
                debug!("Keypad lookup for {} failed: {}", key, e);
                None
            }
        }
    }
}
