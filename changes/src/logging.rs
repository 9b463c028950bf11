//! Tracing setup.
//!
//! The review owns the terminal in raw alternate-screen mode, so log lines go
//! to a file instead. The filter comes from `CHANGES_LOG` (same syntax as
//! `RUST_LOG`), defaulting to `info`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CHANGES_LOG";

/// Installs the global subscriber writing to `path`, creating parent directories.
///
/// A subscriber that is already installed is left in place.
///
/// # Errors
///
/// Returns `Err` if the directory or the log file cannot be created.
pub fn init_logging(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
