//! Tracing setup. The terminal belongs to the UI, so logs only go to a file.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber writing to `path`.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. With no path,
/// nothing is installed and tracing events are discarded.
pub fn init(path: Option<&Path>) -> Result<(), String> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path).map_err(|e| format!("cannot open log file: {e}"))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| format!("cannot install logger: {e}"))
}
