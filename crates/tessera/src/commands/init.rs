use std::path::Path;

use tessera_core::config;

use super::fail;

/// Creates the default configuration file at `~/.config/tessera/`.
///
/// An existing file is left untouched.
pub fn execute() {
    let Some(dir) = config::config_dir() else {
        fail("could not determine home directory.");
    };

    if let Err(e) = std::fs::create_dir_all(&dir) {
        fail(format_args!("could not create {}: {e}", dir.display()));
    }

    write_if_missing(
        &dir.join("config.toml"),
        &config::template::generate_config(),
    );
    println!("\nEdit config.toml to change the move poll interval and logging.");
}

/// Writes content to a file only if it doesn't already exist.
fn write_if_missing(path: &Path, content: &str) {
    if path.exists() {
        println!("Already exists: {}", path.display());
        return;
    }

    match std::fs::write(path, content) {
        Ok(()) => println!("Created {}", path.display()),
        Err(e) => eprintln!("Error: could not write {}: {e}", path.display()),
    }
}
