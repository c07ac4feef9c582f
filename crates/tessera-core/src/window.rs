use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::event::{EventClass, HookEvent};
use crate::style::{ExtendedStyle, Style};
use crate::Result;

/// Opaque OS-assigned identifier of a top-level window.
///
/// Stable for the lifetime of the window and never dereferenced by the
/// tracker. On Windows this is the `HWND` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowHandle(usize);

impl WindowHandle {
    /// The null handle. Never registered.
    pub const NULL: Self = Self(0);

    /// Wraps a raw pointer-sized handle value.
    pub const fn from_raw(raw: usize) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub const fn raw(self) -> usize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Callback bound once per subscription and invoked for every matching
/// notification.
pub type EventSink = Arc<dyn Fn(&HookEvent) + Send + Sync>;

/// Token identifying an installed global subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub class: EventClass,
    /// Platform token (the hook handle on Windows).
    pub id: usize,
}

/// Capability interface to the OS window subsystem.
///
/// Attribute queries never fail loudly: `None` means the window could
/// not be queried (typically because it no longer exists) and the
/// tracker treats such a window as untrackable.
///
/// Platform crates (e.g. `tessera-windows`) provide the implementation.
pub trait WindowSystem: Send + Sync + 'static {
    /// Lists every existing top-level window.
    fn enumerate_top_level_windows(&self) -> Result<Vec<WindowHandle>>;

    /// Installs a system-wide subscription for one notification stream.
    ///
    /// `sink` is called for every notification of the stream, across all
    /// processes and threads, until [`WindowSystem::unsubscribe`].
    fn subscribe_global(&self, class: EventClass, sink: EventSink) -> Result<Subscription>;

    /// Removes a subscription installed by [`WindowSystem::subscribe_global`].
    fn unsubscribe(&self, subscription: Subscription);

    fn is_visible(&self, handle: WindowHandle) -> bool;

    fn style(&self, handle: WindowHandle) -> Option<Style>;

    fn extended_style(&self, handle: WindowHandle) -> Option<ExtendedStyle>;

    /// Returns the owner window, or `None` for unowned windows.
    fn owner_of(&self, handle: WindowHandle) -> Option<WindowHandle>;

    /// Returns the root of the owner chain (the window itself when unowned).
    fn root_owner_of(&self, handle: WindowHandle) -> Option<WindowHandle>;

    /// Returns the most recently active popup owned by the window, or the
    /// window itself if it owns none.
    fn last_active_popup_of(&self, handle: WindowHandle) -> Option<WindowHandle>;

    /// Returns whether desktop composition hides the window (other virtual
    /// desktop, suspended UWP app, ...). `None` if the attribute cannot be
    /// read.
    fn is_cloaked(&self, handle: WindowHandle) -> Option<bool>;

    fn title(&self, handle: WindowHandle) -> Result<String>;
}
