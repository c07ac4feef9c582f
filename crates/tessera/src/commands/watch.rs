use clap::Args;

use tessera_core::RegistryEvent;

#[derive(Args)]
pub struct WatchArgs {
    /// Print one JSON object per event
    #[arg(long)]
    pub json: bool,
}

/// Runs the tracker and prints registry changes. Press Ctrl+C to stop.
#[cfg(windows)]
pub fn execute(args: &WatchArgs) {
    use std::sync::{Arc, mpsc};
    use std::time::Duration;

    use tessera_core::{LogObserver, Observers, config, log};

    let config = config::load();
    if log::init(&config.logging) {
        tracing::info!("tessera watch starting");
    }

    let (tx, rx) = mpsc::channel();
    let observer = Observers::new().with(LogObserver).with(tx);

    let event_loop = match tessera_windows::event_loop::start(&config.tracking, Arc::new(observer))
    {
        Ok(handle) => handle,
        Err(e) => super::fail(format_args!("failed to start tracking: {e}")),
    };

    let (stop_tx, stop_rx) = mpsc::channel();
    if let Err(e) = tessera_windows::ctrl_c::set_handler(stop_tx) {
        event_loop.stop();
        super::fail(format_args!("could not install Ctrl+C handler: {e}"));
    }

    if !args.json {
        println!("Watching windows (press Ctrl+C to stop)...\n");
    }

    loop {
        if stop_rx.try_recv().is_ok() {
            break;
        }

        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => match format_event(&event, args.json) {
                Ok(line) => println!("{line}"),
                Err(e) => tracing::warn!("Could not format {event}: {e}"),
            },
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    let tracked = event_loop.registry().len();
    event_loop.stop();
    tracing::info!("tessera watch stopped with {tracked} windows registered");

    if args.json {
        eprintln!("{tracked} windows registered");
    } else {
        println!("\n{tracked} windows registered");
    }
}

#[cfg(not(windows))]
pub fn execute(_args: &WatchArgs) {
    super::unsupported("watch");
}

#[cfg_attr(not(windows), allow(dead_code))]
fn format_event(event: &RegistryEvent, json: bool) -> serde_json::Result<String> {
    if json {
        serde_json::to_string(event)
    } else {
        Ok(event.to_string())
    }
}

#[cfg(test)]
mod tests {
    use tessera_core::{WindowEntry, WindowHandle};

    use super::*;

    fn notes() -> WindowEntry {
        WindowEntry {
            handle: WindowHandle::from_raw(0x2A),
            title: "Notes".into(),
        }
    }

    #[test]
    fn plain_output_uses_display() {
        let event = RegistryEvent::Moving(notes());

        let line = format_event(&event, false).unwrap();

        assert_eq!(line, event.to_string());
    }

    #[test]
    fn json_output_is_one_line() {
        // Arrange
        let event = RegistryEvent::Registered(notes());

        // Act
        let line = format_event(&event, true).unwrap();

        // Assert
        assert!(!line.contains('\n'));
        assert_eq!(
            line,
            r#"{"event":"registered","window":{"handle":42,"title":"Notes"}}"#
        );
    }
}
