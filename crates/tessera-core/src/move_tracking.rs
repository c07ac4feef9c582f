//! Per-window polling while a drag or resize is in progress.
//!
//! A move session is opened by a move-start notification and closed by
//! the matching move-end. While open, a recurring timer ticks at a short
//! fixed interval; the desktop manager turns each tick into a "window
//! moving" callback.

use std::collections::HashMap;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::window::WindowHandle;

/// Default interval between move ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Callback invoked on every timer tick.
pub type Tick = Box<dyn Fn() + Send + Sync + 'static>;

/// A running recurring timer.
pub trait PollTimer: Send {
    /// Stops the timer. No tick starts after `stop` returns. Idempotent.
    fn stop(&mut self);
}

/// Creates recurring timers.
pub trait TimerFactory: Send + Sync {
    /// Starts a timer calling `tick` every `interval` until stopped.
    fn start(&self, interval: Duration, tick: Tick) -> Box<dyn PollTimer>;
}

/// Timers backed by one thread each, waiting on a channel between ticks.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadTimers;

impl TimerFactory for ThreadTimers {
    fn start(&self, interval: Duration, tick: Tick) -> Box<dyn PollTimer> {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let handle = thread::Builder::new()
            .name("tessera-move-poll".into())
            .spawn(move || {
                // Waking on the channel lets `stop` interrupt the wait.
                while let Err(RecvTimeoutError::Timeout) = stop_rx.recv_timeout(interval) {
                    tick();
                }
            });

        let handle = match handle {
            Ok(h) => Some(h),
            Err(e) => {
                tracing::warn!("failed to spawn move poll thread: {e}");
                None
            }
        };

        Box::new(ThreadTimer {
            stop: Some(stop_tx),
            handle,
        })
    }
}

struct ThreadTimer {
    stop: Option<Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl PollTimer for ThreadTimer {
    fn stop(&mut self) {
        // Dropping the sender disconnects the channel and wakes the thread.
        drop(self.stop.take());
        let Some(handle) = self.handle.take() else {
            return;
        };
        // A timer dropped from its own tick cannot wait for itself.
        if handle.thread().id() != thread::current().id() {
            let _ = handle.join();
        }
    }
}

impl Drop for ThreadTimer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// An active move session: the running timer plus a generation number
/// that lets stale ticks recognise they have been superseded.
pub struct MoveSession {
    generation: u64,
    timer: Box<dyn PollTimer>,
}

impl MoveSession {
    pub fn new(generation: u64, timer: Box<dyn PollTimer>) -> Self {
        Self { generation, timer }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Stops the session's timer.
    pub fn stop(mut self) {
        self.timer.stop();
    }
}

/// Active move sessions keyed by window handle. At most one per handle.
#[derive(Default)]
pub struct MoveSessions {
    sessions: HashMap<WindowHandle, MoveSession>,
    next_generation: u64,
}

impl MoveSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a generation number never handed out before.
    pub fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Records `session` for `handle`, returning the session it replaces.
    pub fn insert(&mut self, handle: WindowHandle, session: MoveSession) -> Option<MoveSession> {
        self.sessions.insert(handle, session)
    }

    pub fn remove(&mut self, handle: WindowHandle) -> Option<MoveSession> {
        self.sessions.remove(&handle)
    }

    /// Returns whether `generation` is the live session for `handle`.
    pub fn is_current(&self, handle: WindowHandle, generation: u64) -> bool {
        self.sessions
            .get(&handle)
            .is_some_and(|s| s.generation == generation)
    }

    pub fn contains(&self, handle: WindowHandle) -> bool {
        self.sessions.contains_key(&handle)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Removes every session, returning them so they can be stopped
    /// outside any lock.
    pub fn drain(&mut self) -> Vec<MoveSession> {
        self.sessions.drain().map(|(_, s)| s).collect()
    }
}
