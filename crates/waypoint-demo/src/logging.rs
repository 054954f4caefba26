#![forbid(unsafe_code)]

//! File logging for the terminal app. The TUI owns stdout, so log lines go
//! to a file filtered by `RUST_LOG` (default `info`).

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Result;

/// Install the global subscriber. A subscriber installed earlier wins.
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
    {
        tracing::debug!(error = %err, "subscriber already installed, keeping it");
    }
    tracing::info!(log_file = %path.display(), "logging initialized");
    Ok(())
}
