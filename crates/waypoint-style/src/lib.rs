#![forbid(unsafe_code)]

//! Style types for Waypoint.
//!
//! # Role in Waypoint
//! `waypoint-style` is the shared vocabulary for colors and text styling.
//! Screen sections and walkthrough configuration describe their look with
//! these plain values; `waypoint-widgets` applies them to cells.
//!
//! - [`Style`]: optional fg/bg/attributes, merged with [`Style::patch`].
//! - [`Color`]: a parsed CSS-like color (`#2c3e50`, `rgba(0, 0, 0, 0.4)`).

pub mod color;
pub mod style;

pub use color::{Color, ColorParseError};
pub use style::Style;
pub use waypoint_render::cell::{CellFlags as StyleFlags, PackedRgba};
