mod config;

pub use config::{BarPosition, Config};

use std::path::PathBuf;

/// Returns `~/.config/deadline-timer[-dev]/` based on DEADLINE_TIMER_ENV.
///
/// Set DEADLINE_TIMER_ENV=dev to use development data directory.
/// DEADLINE_TIMER_HOME, when set, replaces the directory entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("DEADLINE_TIMER_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env =
                std::env::var("DEADLINE_TIMER_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("deadline-timer-dev")
            } else {
                base_dir.join("deadline-timer")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
