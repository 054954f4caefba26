#![forbid(unsafe_code)]

//! Palette and section styles.

use waypoint_render::cell::PackedRgba;
use waypoint_style::{Color, Style};

/// Section backgrounds.
pub mod bg {
    use super::*;

    /// Navbar, footer and the start button.
    pub const BRAND: PackedRgba = PackedRgba::rgb(0x2c, 0x3e, 0x50);
    pub const PAGE: PackedRgba = PackedRgba::WHITE;
    pub const STATUS: PackedRgba = PackedRgba::rgb(0x1f, 0x2b, 0x38);
}

pub mod fg {
    use super::*;

    pub const ON_BRAND: PackedRgba = PackedRgba::WHITE;
    pub const BODY: PackedRgba = PackedRgba::rgb(0x33, 0x33, 0x33);
    pub const MUTED: PackedRgba = PackedRgba::rgb(0x9a, 0xa5, 0xb1);
}

/// Dimming laid over the hero placeholder: `rgba(0, 0, 0, 0.3)`.
pub fn hero_overlay() -> PackedRgba {
    Color::rgba(0, 0, 0, Color::alpha_byte(0.3)).packed()
}

pub fn brand_bar() -> Style {
    Style::new().fg(fg::ON_BRAND).bg(bg::BRAND)
}

pub fn logo() -> Style {
    brand_bar().bold()
}

pub fn hero_title() -> Style {
    Style::new().fg(fg::ON_BRAND).bold()
}

pub fn page() -> Style {
    Style::new().fg(fg::BODY).bg(bg::PAGE)
}

pub fn body() -> Style {
    Style::new().fg(fg::BODY)
}

pub fn start_button() -> Style {
    brand_bar().bold()
}

pub fn status_bar() -> Style {
    Style::new().fg(fg::MUTED).bg(bg::STATUS)
}
