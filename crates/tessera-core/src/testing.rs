//! In-memory window system and timers for unit tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::event::{EventClass, HookEvent, HookEventKind};
use crate::move_tracking::{PollTimer, Tick, TimerFactory};
use crate::style::{ExtendedStyle, Style};
use crate::window::{EventSink, Subscription, WindowHandle, WindowSystem};
use crate::{Error, Result};

/// Attributes of one fake window.
#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub visible: bool,
    pub style: Style,
    pub ex_style: ExtendedStyle,
    pub owner: Option<WindowHandle>,
    /// `None` means "unowned": the root owner is the window itself.
    pub root_owner: Option<WindowHandle>,
    /// `None` means "no popups": the last active popup is the window itself.
    pub last_active_popup: Option<WindowHandle>,
    pub cloaked: Option<bool>,
    pub title: String,
}

impl FakeWindow {
    /// A visible, unowned, uncloaked application window.
    pub fn app(title: &str) -> Self {
        Self {
            visible: true,
            style: Style::VISIBLE,
            ex_style: ExtendedStyle::default(),
            owner: None,
            root_owner: None,
            last_active_popup: None,
            cloaked: Some(false),
            title: title.into(),
        }
    }

    pub fn hidden(title: &str) -> Self {
        Self {
            visible: false,
            ..Self::app(title)
        }
    }
}

#[derive(Default)]
struct FakeState {
    windows: HashMap<WindowHandle, FakeWindow>,
    order: Vec<WindowHandle>,
    sinks: Vec<(Subscription, EventSink)>,
    next_subscription: usize,
    fail_class: Option<EventClass>,
    fail_enumerate: bool,
    title_queries: usize,
}

/// Shared, cloneable fake of the OS window subsystem.
#[derive(Clone, Default)]
pub struct FakeSystem {
    state: Arc<Mutex<FakeState>>,
}

impl FakeSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, raw: usize, window: FakeWindow) -> WindowHandle {
        let handle = WindowHandle::from_raw(raw);
        let mut state = self.state.lock().unwrap();
        if state.windows.insert(handle, window).is_none() {
            state.order.push(handle);
        }
        handle
    }

    pub fn remove(&self, handle: WindowHandle) {
        let mut state = self.state.lock().unwrap();
        state.windows.remove(&handle);
        state.order.retain(|&h| h != handle);
    }

    pub fn update(&self, handle: WindowHandle, f: impl FnOnce(&mut FakeWindow)) {
        let mut state = self.state.lock().unwrap();
        if let Some(window) = state.windows.get_mut(&handle) {
            f(window);
        }
    }

    /// Makes subscribing to `class` fail.
    pub fn fail_subscription(&self, class: EventClass) {
        self.state.lock().unwrap().fail_class = Some(class);
    }

    pub fn fail_enumeration(&self) {
        self.state.lock().unwrap().fail_enumerate = true;
    }

    pub fn subscription_count(&self) -> usize {
        self.state.lock().unwrap().sinks.len()
    }

    pub fn title_queries(&self) -> usize {
        self.state.lock().unwrap().title_queries
    }

    /// Delivers a window-level notification to every matching sink.
    pub fn emit(&self, kind: HookEventKind, handle: WindowHandle) {
        self.deliver(HookEvent::window(kind, handle));
    }

    pub fn deliver(&self, event: HookEvent) {
        let sinks: Vec<EventSink> = {
            let state = self.state.lock().unwrap();
            state
                .sinks
                .iter()
                .filter(|(sub, _)| sub.class.covers(event.kind))
                .map(|(_, sink)| sink.clone())
                .collect()
        };
        for sink in sinks {
            sink(&event);
        }
    }

    fn window(&self, handle: WindowHandle) -> Option<FakeWindow> {
        self.state.lock().unwrap().windows.get(&handle).cloned()
    }
}

impl WindowSystem for FakeSystem {
    fn enumerate_top_level_windows(&self) -> Result<Vec<WindowHandle>> {
        let state = self.state.lock().unwrap();
        if state.fail_enumerate {
            return Err(Error::Enumerate("fake enumeration failure".into()));
        }
        Ok(state.order.clone())
    }

    fn subscribe_global(&self, class: EventClass, sink: EventSink) -> Result<Subscription> {
        let mut state = self.state.lock().unwrap();
        if state.fail_class == Some(class) {
            return Err(Error::Subscribe {
                class,
                reason: "fake hook failure".into(),
            });
        }
        state.next_subscription += 1;
        let subscription = Subscription {
            class,
            id: state.next_subscription,
        };
        state.sinks.push((subscription, sink));
        Ok(subscription)
    }

    fn unsubscribe(&self, subscription: Subscription) {
        let mut state = self.state.lock().unwrap();
        state.sinks.retain(|(sub, _)| *sub != subscription);
    }

    fn is_visible(&self, handle: WindowHandle) -> bool {
        self.window(handle).is_some_and(|w| w.visible)
    }

    fn style(&self, handle: WindowHandle) -> Option<Style> {
        self.window(handle).map(|w| w.style)
    }

    fn extended_style(&self, handle: WindowHandle) -> Option<ExtendedStyle> {
        self.window(handle).map(|w| w.ex_style)
    }

    fn owner_of(&self, handle: WindowHandle) -> Option<WindowHandle> {
        self.window(handle).and_then(|w| w.owner)
    }

    fn root_owner_of(&self, handle: WindowHandle) -> Option<WindowHandle> {
        self.window(handle).map(|w| w.root_owner.unwrap_or(handle))
    }

    fn last_active_popup_of(&self, handle: WindowHandle) -> Option<WindowHandle> {
        self.window(handle)
            .map(|w| w.last_active_popup.unwrap_or(handle))
    }

    fn is_cloaked(&self, handle: WindowHandle) -> Option<bool> {
        self.window(handle).and_then(|w| w.cloaked)
    }

    fn title(&self, handle: WindowHandle) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.title_queries += 1;
        state
            .windows
            .get(&handle)
            .map(|w| w.title.clone())
            .ok_or(Error::WindowGone(handle))
    }
}

#[derive(Default)]
struct TimerLog {
    started: usize,
    stopped: usize,
    next_id: usize,
    active: HashMap<usize, Arc<dyn Fn() + Send + Sync>>,
    intervals: Vec<Duration>,
}

/// Timer factory whose timers only tick when the test says so.
#[derive(Clone, Default)]
pub struct ManualTimers {
    log: Arc<Mutex<TimerLog>>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> usize {
        self.log.lock().unwrap().started
    }

    pub fn stopped(&self) -> usize {
        self.log.lock().unwrap().stopped
    }

    pub fn active(&self) -> usize {
        self.log.lock().unwrap().active.len()
    }

    pub fn last_interval(&self) -> Option<Duration> {
        self.log.lock().unwrap().intervals.last().copied()
    }

    /// Fires every running timer once.
    pub fn tick_all(&self) {
        let ticks: Vec<_> = self.log.lock().unwrap().active.values().cloned().collect();
        for tick in ticks {
            tick();
        }
    }

    /// Captures the ticks of the running timers so a test can fire them
    /// after the timers are stopped, simulating an in-flight callback.
    pub fn capture_ticks(&self) -> Vec<Arc<dyn Fn() + Send + Sync>> {
        self.log.lock().unwrap().active.values().cloned().collect()
    }
}

impl TimerFactory for ManualTimers {
    fn start(&self, interval: Duration, tick: Tick) -> Box<dyn PollTimer> {
        let mut log = self.log.lock().unwrap();
        log.started += 1;
        log.next_id += 1;
        let id = log.next_id;
        log.active.insert(id, Arc::from(tick));
        log.intervals.push(interval);
        Box::new(ManualTimer {
            id,
            log: self.log.clone(),
            stopped: false,
        })
    }
}

struct ManualTimer {
    id: usize,
    log: Arc<Mutex<TimerLog>>,
    stopped: bool,
}

impl PollTimer for ManualTimer {
    fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        let mut log = self.log.lock().unwrap();
        log.stopped += 1;
        log.active.remove(&self.id);
    }
}

impl Drop for ManualTimer {
    fn drop(&mut self) {
        self.stop();
    }
}
