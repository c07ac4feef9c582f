use tessera_core::{Error, Result, WindowHandle};

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::EnumWindows;
use windows::core::BOOL;

/// Enumerates every top-level window, visible or not.
///
/// Eligibility is decided by the caller; this only collects handles.
pub fn top_level_windows() -> Result<Vec<WindowHandle>> {
    let mut handles: Vec<WindowHandle> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window.
    // We pass a pointer to our Vec as LPARAM (user data). The callback
    // casts it back to &mut Vec<WindowHandle>. EnumWindows runs
    // synchronously, so the Vec outlives the call.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut handles as *mut _ as isize),
        )
    }
    .map_err(|e| Error::Enumerate(e.to_string()))?;

    Ok(handles)
}

/// Callback invoked by `EnumWindows` for each top-level window.
///
/// Returns `TRUE` to continue enumeration.
unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is a pointer to our Vec, cast from top_level_windows().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<WindowHandle>) };
    handles.push(WindowHandle::from_raw(hwnd.0 as usize));
    BOOL(1)
}
