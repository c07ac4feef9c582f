use std::sync::Arc;
use std::sync::mpsc::Sender;

use serde::Serialize;

use crate::registry::WindowEntry;

/// Receives registry changes and move ticks.
///
/// Callbacks run on the hook thread (registrations) or on a timer thread
/// (moves), never while the registry lock is held. Implementations must
/// return quickly.
pub trait RegistryObserver: Send + Sync {
    fn on_window_registered(&self, _entry: &WindowEntry) {}

    fn on_window_unregistered(&self, _entry: &WindowEntry) {}

    /// Fires at the poll interval while the window is being dragged or
    /// resized.
    fn on_window_moving(&self, _entry: &WindowEntry) {}
}

/// An observability event, for consumers that prefer a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "window", rename_all = "snake_case")]
pub enum RegistryEvent {
    Registered(WindowEntry),
    Unregistered(WindowEntry),
    Moving(WindowEntry),
}

impl RegistryEvent {
    pub fn entry(&self) -> &WindowEntry {
        match self {
            Self::Registered(e) | Self::Unregistered(e) | Self::Moving(e) => e,
        }
    }
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (verb, entry) = match self {
            Self::Registered(e) => ("registered", e),
            Self::Unregistered(e) => ("unregistered", e),
            Self::Moving(e) => ("moving", e),
        };
        write!(f, "{} [{}] {verb}", entry.handle, entry.title)
    }
}

/// Forwards every callback into a channel. Send errors (receiver gone)
/// are ignored.
impl RegistryObserver for Sender<RegistryEvent> {
    fn on_window_registered(&self, entry: &WindowEntry) {
        let _ = self.send(RegistryEvent::Registered(entry.clone()));
    }

    fn on_window_unregistered(&self, entry: &WindowEntry) {
        let _ = self.send(RegistryEvent::Unregistered(entry.clone()));
    }

    fn on_window_moving(&self, entry: &WindowEntry) {
        let _ = self.send(RegistryEvent::Moving(entry.clone()));
    }
}

/// Reports registry changes through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl RegistryObserver for LogObserver {
    fn on_window_registered(&self, entry: &WindowEntry) {
        tracing::info!("+window {} [{}] registered", entry.handle, entry.title);
    }

    fn on_window_unregistered(&self, entry: &WindowEntry) {
        tracing::info!("-window {} [{}] unregistered", entry.handle, entry.title);
    }

    fn on_window_moving(&self, entry: &WindowEntry) {
        tracing::trace!("window {} [{}] moving", entry.handle, entry.title);
    }
}

/// Fans each callback out to several observers, in insertion order.
#[derive(Default, Clone)]
pub struct Observers(Vec<Arc<dyn RegistryObserver>>);

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, observer: impl RegistryObserver + 'static) -> Self {
        self.0.push(Arc::new(observer));
        self
    }

    pub fn push(&mut self, observer: Arc<dyn RegistryObserver>) {
        self.0.push(observer);
    }
}

impl RegistryObserver for Observers {
    fn on_window_registered(&self, entry: &WindowEntry) {
        self.0.iter().for_each(|o| o.on_window_registered(entry));
    }

    fn on_window_unregistered(&self, entry: &WindowEntry) {
        self.0.iter().for_each(|o| o.on_window_unregistered(entry));
    }

    fn on_window_moving(&self, entry: &WindowEntry) {
        self.0.iter().for_each(|o| o.on_window_moving(entry));
    }
}
