//! Bridge configuration
//!
//! Loaded from TOML; every field has a default so an empty document is valid.
//!
//! ```toml
//! [gesture]
//! double_tap_timeout_ms = 250
//!
//! [surface]
//! landscape_only = true
//!
//! [logging]
//! filter = "tether_input=debug"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tether_core::{KeyCode, Result};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub gesture: GestureConfig,
    pub keys: KeyConfig,
    pub surface: SurfaceConfig,
    pub logging: LoggingConfig,
}

impl BridgeConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Double-tap recognition thresholds
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum gap between the first up and the second down
    pub double_tap_timeout_ms: u64,
    /// Minimum gap between the first up and the second down
    pub double_tap_min_time_ms: u64,
    /// Maximum distance between the two downs, in pixels
    pub double_tap_slop: f32,
    /// Movement that turns the first touch into a drag, in pixels
    pub touch_slop: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            double_tap_timeout_ms: 300,
            double_tap_min_time_ms: 40,
            double_tap_slop: 100.0,
            touch_slop: 8.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyConfig {
    /// Size of the pressed-key table; codes at or above it are not tracked
    pub table_size: usize,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            table_size: KeyCode::MAX.code() as usize + 1,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Ignore size changes that are not wider than tall
    pub landscape_only: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence when set
    pub filter: String,
    /// Log tag on Android
    pub tag: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            tag: "Tether".to_string(),
        }
    }
}
