use std::path::{Path, PathBuf};

use super::Config;
use crate::{Error, Result};

/// Returns the config directory: `~/.config/tessera/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("tessera"))
}

/// Returns the config file path: `~/.config/tessera/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Tries to load and parse `config.toml`.
pub fn try_load() -> Result<Config> {
    let path = config_path().ok_or(Error::NoConfigDir)?;
    load_from(&path)
}

/// Loads the configuration from disk, falling back to defaults.
///
/// After loading, values are clamped to safe ranges via [`Config::validate`].
/// A missing file silently yields defaults; other errors are reported
/// on stderr.
pub fn load() -> Config {
    load_or_default(try_load, Config::default)
}

/// Reads and validates the config file at `path`.
pub(super) fn load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: Config = toml::from_str(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate();
    Ok(config)
}

fn load_or_default<T>(try_load: impl FnOnce() -> Result<T>, default: impl Fn() -> T) -> T {
    match try_load() {
        Ok(val) => val,
        Err(e) if e.is_not_found() => default(),
        Err(e) => {
            eprintln!("Warning: {e}");
            default()
        }
    }
}
