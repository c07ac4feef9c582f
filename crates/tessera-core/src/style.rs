//! Window style flags consulted by the eligibility filter.
//!
//! Bit values mirror the Win32 `WS_*` and `WS_EX_*` constants so the
//! platform crate can wrap the raw style words without translation.

/// Basic window style word (`GWL_STYLE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style(pub u32);

impl Style {
    /// The window is a child window.
    pub const CHILD: Self = Self(0x4000_0000);
    /// The window is initially visible.
    pub const VISIBLE: Self = Self(0x1000_0000);

    pub fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }
}

/// Extended window style word (`GWL_EXSTYLE`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtendedStyle(pub u32);

impl ExtendedStyle {
    /// Floating toolbar; never shown in the taskbar or the switcher.
    pub const TOOLWINDOW: Self = Self(0x0000_0080);
    /// Forces a top-level window onto the taskbar when visible.
    pub const APPWINDOW: Self = Self(0x0004_0000);
    /// The window does not become the foreground window when clicked.
    pub const NOACTIVATE: Self = Self(0x0800_0000);

    pub fn contains(self, flag: Self) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl std::ops::BitOr for ExtendedStyle {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOr for Style {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
