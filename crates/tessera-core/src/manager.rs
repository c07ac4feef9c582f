//! The desktop manager: owns the registry and the move sessions and
//! reconciles hook notifications, startup enumeration and move ticks
//! into one consistent state.
//!
//! # Threading
//!
//! Hook callbacks and startup enumeration run on the thread that called
//! [`DesktopManager::start`]. Move ticks run on timer threads. Both maps
//! live behind a single mutex; observers are notified and timers are
//! stopped only after that lock is released.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use crate::config::TrackingConfig;
use crate::eligibility::is_manageable;
use crate::event::{EventClass, HookEvent, HookEventKind};
use crate::move_tracking::{MoveSession, MoveSessions, TimerFactory};
use crate::observer::RegistryObserver;
use crate::registry::{Registry, WindowEntry};
use crate::window::{EventSink, Subscription, WindowHandle, WindowSystem};
use crate::Result;

#[derive(Default)]
struct State {
    registry: Registry,
    moves: MoveSessions,
}

/// State shared between the hook thread, timer threads and views.
struct Shared {
    state: Mutex<State>,
    observer: Arc<dyn RegistryObserver>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("registry lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Handles one tick of the move session `generation` for `handle`.
    ///
    /// Superseded sessions and windows that are not (or no longer)
    /// registered produce nothing.
    fn emit_moving(&self, handle: WindowHandle, generation: u64) {
        let entry = {
            let state = self.lock();
            if !state.moves.is_current(handle, generation) {
                return;
            }
            state.registry.get(handle).cloned()
        };
        if let Some(entry) = entry {
            self.observer.on_window_moving(&entry);
        }
    }
}

/// Everything the subscription sinks need to handle a notification.
struct Engine<S> {
    system: S,
    shared: Arc<Shared>,
    timers: Arc<dyn TimerFactory>,
    poll_interval: Duration,
}

impl<S: WindowSystem> Engine<S> {
    fn dispatch(&self, event: &HookEvent) {
        match event.kind {
            HookEventKind::Show => {
                if event.targets_window_itself() && is_manageable(&self.system, event.handle) {
                    self.register(event.handle);
                }
            }
            // A hidden window may come back; only destroy removes it.
            HookEventKind::Hide => {
                tracing::trace!("hide {} ignored", event.handle);
            }
            HookEventKind::Destroy => self.unregister(event.handle),
            HookEventKind::MoveSizeStart => self.begin_move(event.handle),
            HookEventKind::MoveSizeEnd => self.end_move(event.handle),
        }
    }

    /// Registers every eligible pre-existing window.
    fn populate(&self) {
        let handles = match self.system.enumerate_top_level_windows() {
            Ok(handles) => handles,
            Err(e) => {
                tracing::warn!("startup enumeration failed: {e}");
                return;
            }
        };

        let total = handles.len();
        for handle in handles {
            if is_manageable(&self.system, handle) {
                self.register(handle);
            }
        }
        tracing::info!(
            "Tracking {} of {total} top-level windows",
            self.shared.lock().registry.len()
        );
    }

    fn register(&self, handle: WindowHandle) {
        if self.shared.lock().registry.contains(handle) {
            return;
        }

        // Queried outside the lock so timer ticks never wait on the OS.
        let title = self.system.title(handle).unwrap_or_else(|e| {
            tracing::debug!("title of {handle} unavailable: {e}");
            String::new()
        });

        let inserted = self.shared.lock().registry.insert(handle, title).cloned();
        if let Some(entry) = inserted {
            self.shared.observer.on_window_registered(&entry);
        }
    }

    fn unregister(&self, handle: WindowHandle) {
        let removed = self.shared.lock().registry.remove(handle);
        if let Some(entry) = removed {
            self.shared.observer.on_window_unregistered(&entry);
        }
    }

    fn begin_move(&self, handle: WindowHandle) {
        let (previous, generation) = {
            let mut state = self.shared.lock();
            (state.moves.remove(handle), state.moves.next_generation())
        };
        if let Some(previous) = previous {
            tracing::debug!("move of {handle} restarted before it ended");
            previous.stop();
        }

        let shared = Arc::downgrade(&self.shared);
        let timer = self.timers.start(
            self.poll_interval,
            Box::new(move || {
                if let Some(shared) = shared.upgrade() {
                    shared.emit_moving(handle, generation);
                }
            }),
        );

        let replaced = self
            .shared
            .lock()
            .moves
            .insert(handle, MoveSession::new(generation, timer));
        if let Some(replaced) = replaced {
            replaced.stop();
        }
        tracing::debug!("move of {handle} started");
    }

    fn end_move(&self, handle: WindowHandle) {
        let session = self.shared.lock().moves.remove(handle);
        if let Some(session) = session {
            session.stop();
            tracing::debug!("move of {handle} ended");
        }
    }
}

/// The window registry service.
///
/// Construct once with [`DesktopManager::start`] on the thread that will
/// receive hook callbacks, and drop it on that same thread. Dropping
/// removes every subscription and stops every move timer.
pub struct DesktopManager<S: WindowSystem> {
    engine: Arc<Engine<S>>,
    subscriptions: Vec<Subscription>,
}

impl<S: WindowSystem> DesktopManager<S> {
    /// Subscribes to the four global notification streams, then registers
    /// every eligible existing window.
    ///
    /// Fails only if a subscription cannot be established; subscriptions
    /// installed before the failure are removed again.
    pub fn start(
        system: S,
        timers: Arc<dyn TimerFactory>,
        config: &TrackingConfig,
        observer: Arc<dyn RegistryObserver>,
    ) -> Result<Self> {
        let engine = Arc::new(Engine {
            system,
            shared: Arc::new(Shared {
                state: Mutex::new(State::default()),
                observer,
            }),
            timers,
            poll_interval: config.poll_interval(),
        });

        let mut subscriptions = Vec::with_capacity(EventClass::ALL.len());
        for class in EventClass::ALL {
            match engine.system.subscribe_global(class, sink(&engine, class)) {
                Ok(subscription) => subscriptions.push(subscription),
                Err(e) => {
                    for subscription in subscriptions {
                        engine.system.unsubscribe(subscription);
                    }
                    return Err(e);
                }
            }
        }
        tracing::debug!("Installed {} global subscriptions", subscriptions.len());

        engine.populate();

        Ok(Self {
            engine,
            subscriptions,
        })
    }

    /// Handles one notification exactly as a subscription callback would.
    pub fn handle_event(&self, event: &HookEvent) {
        self.engine.dispatch(event);
    }

    /// Returns a snapshot of every registered window, ordered by handle.
    pub fn registered_windows(&self) -> Vec<WindowEntry> {
        self.engine.shared.lock().registry.snapshot()
    }

    /// Returns a cloneable read-only view for other threads.
    pub fn registry(&self) -> RegistryView {
        RegistryView {
            shared: self.engine.shared.clone(),
        }
    }

    pub fn window_count(&self) -> usize {
        self.engine.shared.lock().registry.len()
    }

    pub fn is_registered(&self, handle: WindowHandle) -> bool {
        self.engine.shared.lock().registry.contains(handle)
    }

    /// Number of windows currently being moved or resized.
    pub fn active_moves(&self) -> usize {
        self.engine.shared.lock().moves.len()
    }

    pub fn is_moving(&self, handle: WindowHandle) -> bool {
        self.engine.shared.lock().moves.contains(handle)
    }
}

impl<S: WindowSystem> Drop for DesktopManager<S> {
    fn drop(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            self.engine.system.unsubscribe(subscription);
        }
        let sessions = self.engine.shared.lock().moves.drain();
        let count = sessions.len();
        sessions.into_iter().for_each(MoveSession::stop);
        tracing::debug!("Desktop manager stopped ({count} move sessions cancelled)");
    }
}

/// Builds the long-lived callback for one subscription.
///
/// Holds the engine weakly so a subscription outliving the manager is
/// inert.
fn sink<S: WindowSystem>(engine: &Arc<Engine<S>>, class: EventClass) -> EventSink {
    let engine: Weak<Engine<S>> = Arc::downgrade(engine);
    Arc::new(move |event: &HookEvent| {
        if !class.covers(event.kind) {
            return;
        }
        if let Some(engine) = engine.upgrade() {
            engine.dispatch(event);
        }
    })
}

/// Read-only, thread-safe view of the registry.
#[derive(Clone)]
pub struct RegistryView {
    shared: Arc<Shared>,
}

impl RegistryView {
    /// Returns a snapshot of every registered window, ordered by handle.
    pub fn registered_windows(&self) -> Vec<WindowEntry> {
        self.shared.lock().registry.snapshot()
    }

    pub fn get(&self, handle: WindowHandle) -> Option<WindowEntry> {
        self.shared.lock().registry.get(handle).cloned()
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.shared.lock().registry.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.shared.lock().registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.lock().registry.is_empty()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
