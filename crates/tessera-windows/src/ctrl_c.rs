//! Ctrl+C signal handler using `SetConsoleCtrlHandler`.

use std::sync::OnceLock;
use std::sync::mpsc::Sender;

use tessera_core::{Error, Result};
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};

/// Global sender, written once by `set_handler` and read by the callback.
static SENDER: OnceLock<Sender<()>> = OnceLock::new();

/// Registers a console handler that sends `()` on Ctrl+C or Ctrl+Break.
///
/// Only the first registration in a process takes effect.
pub fn set_handler(tx: Sender<()>) -> Result<()> {
    if SENDER.set(tx).is_err() {
        return Err(Error::EventLoop);
    }
    // SAFETY: `handler` is a plain extern fn that lives for the whole
    // process and only touches the OnceLock above.
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }.map_err(|e| {
        tracing::warn!("SetConsoleCtrlHandler failed: {e}");
        Error::EventLoop
    })
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(tx) = SENDER.get()
    {
        let _ = tx.send(());
    }
    windows::core::BOOL(1)
}
