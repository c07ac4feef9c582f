mod loader;
pub mod template;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

pub use loader::{config_dir, config_path, load, try_load};

/// Bounds for `tracking.poll_interval_ms`.
const MIN_POLL_INTERVAL_MS: u64 = 1;
const MAX_POLL_INTERVAL_MS: u64 = 1000;

/// Top-level configuration for Tessera.
///
/// Loaded from `~/.config/tessera/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window tracking behaviour.
    pub tracking: TrackingConfig,
    /// File logging.
    pub logging: LogConfig,
}

/// Window tracking settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    /// Interval in milliseconds between "window moving" ticks while a
    /// window is dragged or resized.
    pub poll_interval_ms: u64,
    /// Ignore notifications raised by Tessera's own windows.
    pub skip_own_process: bool,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            skip_own_process: true,
        }
    }
}

impl TrackingConfig {
    /// The move poll interval, clamped to the supported range.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(
            self.poll_interval_ms
                .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS),
        )
    }
}

impl Config {
    /// Clamps values to safe ranges.
    ///
    /// A zero poll interval would spin a timer thread; very long ones make
    /// move tracking useless.
    pub fn validate(&mut self) {
        self.tracking.poll_interval_ms = self
            .tracking
            .poll_interval_ms
            .clamp(MIN_POLL_INTERVAL_MS, MAX_POLL_INTERVAL_MS);
        self.logging.max_file_mb = self.logging.max_file_mb.min(1024);
    }
}
