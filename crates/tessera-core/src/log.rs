//! File logging with size-based rotation.
//!
//! Logs are written through `tracing` to
//! `~/.config/tessera/logs/tessera.log`. When the file exceeds the
//! configured max size, it is rotated to `tessera.log.1` (one backup kept).

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "tessera.log";
const BACKUP_EXTENSION: &str = "log.1";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Filter directive: "trace", "debug", "info", "warn", "error", or a
    /// full `tracing` directive list.
    pub level: String,
    /// Maximum log file size in megabytes before rotation. 0 disables
    /// rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Installs the global file subscriber. Call once at startup.
///
/// Returns `false` if logging is disabled, the log file cannot be
/// opened, or a subscriber is already installed.
pub fn init(config: &LogConfig) -> bool {
    if !config.enabled {
        return false;
    }
    let Some(dir) = crate::config::config_dir() else {
        return false;
    };
    let Ok(file) = RotatingFile::open(&dir.join("logs"), max_bytes(config.max_file_mb)) else {
        return false;
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter(&config.level))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok()
}

/// Converts the configured size to bytes, saturating on overflow.
fn max_bytes(max_file_mb: u64) -> u64 {
    max_file_mb.saturating_mul(1024 * 1024)
}

/// Parses the configured level, falling back to `info` when invalid.
fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Append-only log file that rotates itself once it grows past
/// `max_bytes`.
pub struct RotatingFile {
    file: File,
    path: PathBuf,
    max_bytes: u64,
    written: u64,
}

impl RotatingFile {
    /// Opens (or creates) `tessera.log` inside `dir`.
    pub fn open(dir: &Path, max_bytes: u64) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata().map(|m| m.len()).unwrap_or(0);
        Ok(Self {
            file,
            path,
            max_bytes,
            written,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn rotate(&mut self) -> io::Result<()> {
        self.file.flush()?;
        let backup = self.path.with_extension(BACKUP_EXTENSION);
        fs::rename(&self.path, &backup)?;
        self.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        self.written = 0;
        Ok(())
    }
}

impl Write for RotatingFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.file.write(buf)?;
        self.written += n as u64;
        if self.max_bytes > 0 && self.written >= self.max_bytes {
            // After a failed rotation the handle may point at the backup;
            // rotation stays off and logging continues on that handle.
            if let Err(e) = self.rotate() {
                eprintln!("Warning: log rotation failed, disabling it: {e}");
                self.max_bytes = 0;
            }
        }
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
