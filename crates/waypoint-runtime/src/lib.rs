#![forbid(unsafe_code)]

//! Waypoint runtime.
//!
//! [`Program`] drives a [`Model`] against a real terminal; the headless
//! [`ProgramSimulator`] drives the same model in tests.

pub mod program;
pub mod simulator;

#[cfg(feature = "crossterm-compat")]
pub use program::Program;
pub use program::{Cmd, Model, ProgramConfig};
pub use simulator::ProgramSimulator;
