pub mod config;
pub mod eligibility;
pub mod error;
pub mod event;
pub mod log;
pub mod manager;
pub mod move_tracking;
pub mod observer;
pub mod registry;
pub mod style;
pub mod window;

#[cfg(test)]
mod testing;

pub use config::{Config, TrackingConfig};
pub use eligibility::is_manageable;
pub use error::{Error, Result};
pub use event::{EventClass, HookEvent, HookEventKind};
pub use manager::{DesktopManager, RegistryView};
pub use move_tracking::{PollTimer, ThreadTimers, TimerFactory};
pub use observer::{LogObserver, Observers, RegistryEvent, RegistryObserver};
pub use registry::WindowEntry;
pub use style::{ExtendedStyle, Style};
pub use window::{EventSink, Subscription, WindowHandle, WindowSystem};
