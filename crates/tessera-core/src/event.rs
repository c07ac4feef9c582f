use std::fmt;

use crate::WindowHandle;

/// Object id carried by notifications that concern the window itself,
/// as opposed to a scrollbar, caret, or other child object.
pub const OBJECT_ID_WINDOW: i32 = 0;

/// Child id carried by notifications that concern the object itself
/// rather than one of its child elements.
pub const CHILD_ID_SELF: i32 = 0;

/// The four global notification streams the tracker subscribes to.
///
/// `MoveSize` is a single ranged subscription covering both the
/// move-start and move-end notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventClass {
    MoveSize,
    Show,
    Hide,
    Destroy,
}

impl EventClass {
    /// Every class, in the order subscriptions are installed.
    pub const ALL: [EventClass; 4] = [Self::MoveSize, Self::Show, Self::Hide, Self::Destroy];

    /// Returns whether a notification of `kind` belongs to this stream.
    pub fn covers(self, kind: HookEventKind) -> bool {
        kind.class() == self
    }
}

impl fmt::Display for EventClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MoveSize => "move-size",
            Self::Show => "show",
            Self::Hide => "hide",
            Self::Destroy => "destroy",
        };
        f.write_str(name)
    }
}

/// The kind of a raw window notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEventKind {
    /// The user started dragging or resizing the window.
    MoveSizeStart,
    /// The drag or resize finished.
    MoveSizeEnd,
    /// The window became visible.
    Show,
    /// The window was hidden.
    Hide,
    /// The window was destroyed.
    Destroy,
}

impl HookEventKind {
    /// Returns the subscription stream that delivers this kind.
    pub fn class(self) -> EventClass {
        match self {
            Self::MoveSizeStart | Self::MoveSizeEnd => EventClass::MoveSize,
            Self::Show => EventClass::Show,
            Self::Hide => EventClass::Hide,
            Self::Destroy => EventClass::Destroy,
        }
    }
}

/// A raw notification as delivered by the platform hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookEvent {
    pub kind: HookEventKind,
    pub handle: WindowHandle,
    pub object_id: i32,
    pub child_id: i32,
    /// Id of the thread that generated the notification.
    pub thread_id: u32,
    /// Time the notification was generated, in milliseconds.
    pub time_ms: u32,
}

impl HookEvent {
    /// Creates a notification about the window object itself.
    pub fn window(kind: HookEventKind, handle: WindowHandle) -> Self {
        Self {
            kind,
            handle,
            object_id: OBJECT_ID_WINDOW,
            child_id: CHILD_ID_SELF,
            thread_id: 0,
            time_ms: 0,
        }
    }

    /// Returns whether the notification targets the window itself.
    ///
    /// Show notifications fire for carets, cursors, menus and other child
    /// objects too; only window-level ones with a real handle count.
    pub fn targets_window_itself(&self) -> bool {
        self.object_id == OBJECT_ID_WINDOW && self.child_id == CHILD_ID_SELF && !self.handle.is_null()
    }
}
