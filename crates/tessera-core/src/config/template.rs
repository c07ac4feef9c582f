/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `tessera init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Tessera configuration
# Location: ~/.config/tessera/config.toml

[tracking]
# Milliseconds between "window moving" updates while a window is dragged
# or resized (1 to 1000).
poll_interval_ms = 10
# Ignore notifications raised by Tessera's own windows.
skip_own_process = true

[logging]
# Enable file logging to ~/.config/tessera/logs/tessera.log.
enabled = false
# Minimum log level: "trace", "debug", "info", "warn", or "error".
# Per-module directives such as "info,tessera_core::manager=debug" also work.
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
