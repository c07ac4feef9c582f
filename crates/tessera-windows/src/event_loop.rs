use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use tessera_core::{
    DesktopManager, Error, RegistryObserver, RegistryView, Result, ThreadTimers, TrackingConfig,
};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PM_NOREMOVE, PeekMessageW, PostThreadMessageW,
    TranslateMessage, WM_QUIT, WM_USER,
};

use crate::system::Win32System;

/// Starts the desktop manager on a dedicated hook thread.
///
/// The thread installs the notification hooks, populates the registry
/// and pumps messages until [`EventLoopHandle::stop`] is called. Returns
/// once startup has finished, with any startup error.
pub fn start(
    config: &TrackingConfig,
    observer: Arc<dyn RegistryObserver>,
) -> Result<EventLoopHandle> {
    let (ready_tx, ready_rx) = mpsc::channel::<Result<(u32, RegistryView)>>();
    let config = config.clone();

    let handle = thread::Builder::new()
        .name("tessera-hooks".into())
        .spawn(move || {
            // SAFETY: GetCurrentThreadId has no preconditions.
            let thread_id = unsafe { GetCurrentThreadId() };
            create_message_queue();

            let system = Win32System::new(config.skip_own_process);
            let manager =
                match DesktopManager::start(system, Arc::new(ThreadTimers), &config, observer) {
                    Ok(manager) => manager,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e));
                        return;
                    }
                };

            let _ = ready_tx.send(Ok((thread_id, manager.registry())));
            run_message_pump();

            // Hooks must be removed on the thread that installed them.
            drop(manager);
            tracing::debug!("Hook thread stopped");
        })
        .map_err(|e| {
            tracing::error!("Failed to spawn hook thread: {e}");
            Error::EventLoop
        })?;

    let (thread_id, registry) = ready_rx.recv().map_err(|_| Error::EventLoop)??;
    Ok(EventLoopHandle {
        thread_id,
        handle,
        registry,
    })
}

/// Handle for controlling the hook thread.
pub struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
    registry: RegistryView,
}

impl EventLoopHandle {
    /// Read access to the live registry.
    pub fn registry(&self) -> &RegistryView {
        &self.registry
    }

    /// Signals the hook thread to stop and waits for it to finish.
    ///
    /// Subscriptions are removed and move timers stopped before this
    /// returns.
    pub fn stop(self) {
        // SAFETY: posting WM_QUIT to a thread we own.
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// Forces creation of this thread's message queue so an early
/// `PostThreadMessageW` is not lost.
fn create_message_queue() {
    let mut msg = MSG::default();
    // SAFETY: PeekMessageW with PM_NOREMOVE only inspects the queue.
    unsafe {
        let _ = PeekMessageW(&mut msg, None, WM_USER, WM_USER, PM_NOREMOVE);
    }
}

/// The Win32 message pump. Blocks until WM_QUIT is received.
///
/// WinEvent callbacks are delivered from inside `GetMessageW`.
fn run_message_pump() {
    let mut msg = MSG::default();

    // GetMessageW returns -1 on error and 0 on WM_QUIT.
    while unsafe { GetMessageW(&mut msg, None, 0, 0) }.0 > 0 {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
