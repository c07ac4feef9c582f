use std::ffi::c_void;
use std::mem;

use tessera_core::{ExtendedStyle, Style, WindowHandle};

use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Dwm::{DWMWA_CLOAKED, DwmGetWindowAttribute};
use windows::Win32::UI::WindowsAndMessaging::{
    GA_ROOTOWNER, GW_OWNER, GWL_EXSTYLE, GWL_STYLE, GetAncestor, GetLastActivePopup, GetWindow,
    GetWindowLongPtrW, GetWindowTextLengthW, GetWindowTextW, IsWindow, IsWindowVisible,
    RealGetWindowClassW, WINDOW_LONG_PTR_INDEX,
};

/// A window on the Windows platform, wrapping a Win32 `HWND`.
///
/// `HWND` is an opaque handle: a number that identifies a window to the OS.
/// This struct holds that handle and queries the OS lazily for metadata.
#[derive(Debug, Clone, Copy)]
pub struct Window {
    hwnd: HWND,
}

impl Window {
    /// Creates a new `Window` from a raw `HWND`.
    pub fn new(hwnd: HWND) -> Self {
        Self { hwnd }
    }

    /// Creates a new `Window` from a platform-agnostic handle.
    pub fn from_handle(handle: WindowHandle) -> Self {
        Self {
            hwnd: HWND(handle.raw() as *mut _),
        }
    }

    pub fn handle(&self) -> WindowHandle {
        WindowHandle::from_raw(self.hwnd.0 as usize)
    }

    /// Returns whether the handle still names an existing window.
    pub fn exists(&self) -> bool {
        // SAFETY: IsWindow accepts any value and only reports validity.
        unsafe { IsWindow(Some(self.hwnd)).as_bool() }
    }

    pub fn is_visible(&self) -> bool {
        // SAFETY: IsWindowVisible is a simple query that returns a BOOL.
        unsafe { IsWindowVisible(self.hwnd).as_bool() }
    }

    /// Returns the `GWL_STYLE` word, or `None` if the window is gone.
    pub fn style(&self) -> Option<Style> {
        self.long(GWL_STYLE).map(Style)
    }

    /// Returns the `GWL_EXSTYLE` word, or `None` if the window is gone.
    pub fn extended_style(&self) -> Option<ExtendedStyle> {
        self.long(GWL_EXSTYLE).map(ExtendedStyle)
    }

    fn long(&self, index: WINDOW_LONG_PTR_INDEX) -> Option<u32> {
        if !self.exists() {
            return None;
        }
        // SAFETY: GetWindowLongPtrW reads a window attribute; an invalid
        // handle yields 0.
        let value = unsafe { GetWindowLongPtrW(self.hwnd, index) };
        Some(value as u32)
    }

    /// Returns the owner window, if any.
    pub fn owner(&self) -> Option<Window> {
        // SAFETY: GetWindow only reads the window relationship.
        let owner = unsafe { GetWindow(self.hwnd, GW_OWNER) }.ok()?;
        non_null(owner)
    }

    /// Returns the root of the owner chain.
    pub fn root_owner(&self) -> Option<Window> {
        // SAFETY: GetAncestor returns null for invalid handles.
        non_null(unsafe { GetAncestor(self.hwnd, GA_ROOTOWNER) })
    }

    /// Returns the most recently active popup owned by this window, or
    /// the window itself if it owns none.
    pub fn last_active_popup(&self) -> Option<Window> {
        // SAFETY: GetLastActivePopup returns null for invalid handles.
        non_null(unsafe { GetLastActivePopup(self.hwnd) })
    }

    /// Returns whether DWM currently cloaks the window.
    ///
    /// `None` when the attribute cannot be read.
    pub fn is_cloaked(&self) -> Option<bool> {
        let mut cloaked: u32 = 0;
        // SAFETY: DWMWA_CLOAKED writes a DWORD into the provided buffer,
        // whose size we pass explicitly.
        let result = unsafe {
            DwmGetWindowAttribute(
                self.hwnd,
                DWMWA_CLOAKED,
                &mut cloaked as *mut u32 as *mut c_void,
                mem::size_of::<u32>() as u32,
            )
        };
        result.ok().map(|()| cloaked != 0)
    }

    /// Returns the window title.
    pub fn title(&self) -> String {
        // SAFETY: GetWindowTextLengthW and GetWindowTextW are safe to call
        // with any HWND. They read window text without modifying state.
        unsafe {
            let length = GetWindowTextLengthW(self.hwnd);
            if length <= 0 {
                return String::new();
            }

            // +1 for the null terminator that Windows requires
            let mut buffer = vec![0u16; (length + 1) as usize];
            let copied = GetWindowTextW(self.hwnd, &mut buffer).max(0);
            String::from_utf16_lossy(&buffer[..copied as usize])
        }
    }

    /// Returns the window class name.
    pub fn class(&self) -> String {
        // SAFETY: RealGetWindowClassW reads the window class name.
        // 256 is the maximum class name length in Win32.
        unsafe {
            let mut buffer = [0u16; 256];
            let length = RealGetWindowClassW(self.hwnd, &mut buffer);
            String::from_utf16_lossy(&buffer[..length as usize])
        }
    }
}

fn non_null(hwnd: HWND) -> Option<Window> {
    (!hwnd.is_invalid()).then(|| Window::new(hwnd))
}
