#![forbid(unsafe_code)]

//! Waypoint demo: a one-screen app (navbar, hero, welcome text, start
//! button, footer) with a guided walkthrough over its sections.
//!
//! # Controls
//!
//! - `s` or click "Start Tour": start the walkthrough
//! - Enter / `n` / Right: next step (finishes on the last one)
//! - `p` / Left: previous step
//! - Esc: stop the walkthrough
//! - Up / Down / PageUp / PageDown / mouse wheel: scroll
//! - `q` / Ctrl+C: quit

pub mod app;
pub mod cli;
pub mod error;
pub mod logging;
pub mod screen;
pub mod theme;
pub mod tooltip;

pub use app::{AppContent, Msg};
pub use cli::Cli;
pub use error::{AppError, Result};

#[cfg(feature = "crossterm-compat")]
pub fn run_from_env() -> Result<()> {
    use clap::Parser;

    run(Cli::parse())
}

/// Run the app in the terminal until the user quits.
#[cfg(feature = "crossterm-compat")]
pub fn run(cli: Cli) -> Result<()> {
    use waypoint_runtime::{Program, ProgramConfig};

    logging::init(&cli.log_file)?;
    let config = cli.tour_config()?;
    tracing::info!(
        overlay = ?config.overlay,
        animated = config.animated,
        autostart = cli.autostart,
        "starting"
    );
    let app = AppContent::new(config)?.with_autostart(cli.autostart);
    let mut program = Program::with_config(app, ProgramConfig::fullscreen().with_mouse())?;
    program.run()?;
    Ok(())
}
