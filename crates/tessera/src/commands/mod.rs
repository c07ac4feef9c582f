pub mod init;
pub mod list;
pub mod watch;

/// Prints `message` as an error and exits with status 1.
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Exits for commands that need a live Windows desktop.
#[cfg(not(windows))]
pub fn unsupported(command: &str) -> ! {
    fail(format_args!("`tessera {command}` requires Windows"))
}
