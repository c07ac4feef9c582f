use std::cell::RefCell;
use std::collections::HashMap;

use tessera_core::{
    Error, EventClass, EventSink, ExtendedStyle, HookEvent, Result, Style, Subscription,
    WindowHandle, WindowSystem,
};
use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Accessibility::{HWINEVENTHOOK, SetWinEventHook, UnhookWinEvent};
use windows::Win32::UI::WindowsAndMessaging::{WINEVENT_OUTOFCONTEXT, WINEVENT_SKIPOWNPROCESS};

use crate::enumerate;
use crate::event;
use crate::window::Window;

// Sinks for the hooks installed on this thread, keyed by hook handle.
// Out-of-context hooks deliver their callbacks on the installing thread,
// so subscribing, delivering and unsubscribing all happen here.
thread_local! {
    static SINKS: RefCell<HashMap<usize, EventSink>> = RefCell::new(HashMap::new());
}

/// The Win32 window system.
///
/// Hooks are bound to the thread that installs them and only fire while
/// that thread pumps messages. Start and drop the `DesktopManager` on the
/// same thread that runs the message pump (see [`crate::event_loop`]).
#[derive(Debug, Clone, Copy)]
pub struct Win32System {
    skip_own_process: bool,
}

impl Win32System {
    pub fn new(skip_own_process: bool) -> Self {
        Self { skip_own_process }
    }

    fn window(handle: WindowHandle) -> Window {
        Window::from_handle(handle)
    }

    fn related(window: Option<Window>) -> Option<WindowHandle> {
        window.map(|w| w.handle())
    }
}

impl WindowSystem for Win32System {
    fn enumerate_top_level_windows(&self) -> Result<Vec<WindowHandle>> {
        enumerate::top_level_windows()
    }

    fn subscribe_global(&self, class: EventClass, sink: EventSink) -> Result<Subscription> {
        let (min, max) = event::range(class);
        let flags = hook_flags(self.skip_own_process);

        // SAFETY: SetWinEventHook registers our callback for system-wide
        // window events. WINEVENT_OUTOFCONTEXT means the callback runs on
        // this thread while it pumps messages.
        let hook = unsafe { SetWinEventHook(min, max, None, Some(win_event_proc), 0, 0, flags) };
        if hook.is_invalid() {
            return Err(Error::Subscribe {
                class,
                reason: format!("SetWinEventHook({min:#06X}..={max:#06X}) returned null"),
            });
        }

        let id = hook.0 as usize;
        SINKS.with(|sinks| sinks.borrow_mut().insert(id, sink));
        tracing::debug!("Subscribed to {class} notifications (hook {id:#X})");
        Ok(Subscription { class, id })
    }

    fn unsubscribe(&self, subscription: Subscription) {
        SINKS.with(|sinks| sinks.borrow_mut().remove(&subscription.id));
        // SAFETY: the id is a hook handle returned by SetWinEventHook.
        let removed = unsafe { UnhookWinEvent(HWINEVENTHOOK(subscription.id as *mut _)) };
        if !removed.as_bool() {
            tracing::warn!(
                "UnhookWinEvent failed for {} hook {:#X}",
                subscription.class,
                subscription.id
            );
        }
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        Self::window(handle).is_visible()
    }

    fn style(&self, handle: WindowHandle) -> Option<Style> {
        Self::window(handle).style()
    }

    fn extended_style(&self, handle: WindowHandle) -> Option<ExtendedStyle> {
        Self::window(handle).extended_style()
    }

    fn owner_of(&self, handle: WindowHandle) -> Option<WindowHandle> {
        Self::related(Self::window(handle).owner())
    }

    fn root_owner_of(&self, handle: WindowHandle) -> Option<WindowHandle> {
        Self::related(Self::window(handle).root_owner())
    }

    fn last_active_popup_of(&self, handle: WindowHandle) -> Option<WindowHandle> {
        Self::related(Self::window(handle).last_active_popup())
    }

    fn is_cloaked(&self, handle: WindowHandle) -> Option<bool> {
        Self::window(handle).is_cloaked()
    }

    fn title(&self, handle: WindowHandle) -> Result<String> {
        let window = Self::window(handle);
        if !window.exists() {
            return Err(Error::WindowGone(handle));
        }
        Ok(window.title())
    }
}

/// Flags passed to `SetWinEventHook`.
fn hook_flags(skip_own_process: bool) -> u32 {
    if skip_own_process {
        WINEVENT_OUTOFCONTEXT | WINEVENT_SKIPOWNPROCESS
    } else {
        WINEVENT_OUTOFCONTEXT
    }
}

/// The WinEvent callback.
unsafe extern "system" fn win_event_proc(
    hook: HWINEVENTHOOK,
    event: u32,
    hwnd: HWND,
    id_object: i32,
    id_child: i32,
    event_thread: u32,
    event_time: u32,
) {
    let Some(kind) = event::translate(event) else {
        return;
    };
    // Clone out of the map so a sink may unsubscribe while it runs.
    let sink = SINKS.with(|sinks| sinks.borrow().get(&(hook.0 as usize)).cloned());
    if let Some(sink) = sink {
        sink(&HookEvent {
            kind,
            handle: WindowHandle::from_raw(hwnd.0 as usize),
            object_id: id_object,
            child_id: id_child,
            thread_id: event_thread,
            time_ms: event_time,
        });
    }
}
