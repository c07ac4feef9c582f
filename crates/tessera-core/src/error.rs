use std::path::PathBuf;

use crate::event::EventClass;
use crate::window::WindowHandle;

/// Errors surfaced by the tracking engine and its configuration layer.
///
/// OS query failures are not represented here: a window that cannot be
/// queried is simply treated as untrackable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A global notification subscription could not be established.
    #[error("failed to subscribe to {class} notifications: {reason}")]
    Subscribe { class: EventClass, reason: String },

    /// The top-level window list could not be enumerated.
    #[error("failed to enumerate windows: {0}")]
    Enumerate(String),

    /// The window was destroyed before it could be queried.
    #[error("window {0} no longer exists")]
    WindowGone(WindowHandle),

    /// The hook thread exited before reporting that it was ready.
    #[error("event loop thread exited unexpectedly")]
    EventLoop,

    /// Reading or writing a file failed.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A configuration file is not valid TOML for its schema.
    #[error("{}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The home directory could not be determined.
    #[error("could not determine config path")]
    NoConfigDir,
}

impl Error {
    /// Returns true if the error is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Result alias used throughout Tessera.
pub type Result<T> = std::result::Result<T, Error>;
