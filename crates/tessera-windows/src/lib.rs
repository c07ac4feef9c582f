//! Windows implementation of the Tessera window system.
//!
//! Everything here talks to Win32 directly, so the crate is empty on
//! other targets.
#![cfg(windows)]

/// Ctrl+C handling for console commands.
pub mod ctrl_c;

/// Win32 window enumeration.
pub mod enumerate;

/// Mapping between WinEvent codes and notification kinds.
pub mod event;

/// Hook thread running the desktop manager and the message pump.
pub mod event_loop;

/// `WindowSystem` implementation backed by Win32.
pub mod system;

/// Window type wrapping a Win32 `HWND`.
pub mod window;

pub use enumerate::top_level_windows;
pub use event_loop::EventLoopHandle;
pub use system::Win32System;
pub use window::Window;
