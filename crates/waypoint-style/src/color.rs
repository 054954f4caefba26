#![forbid(unsafe_code)]

//! CSS-like color parsing.
//!
//! Accepted forms:
//! - `#rgb`, `#rrggbb`, `#rrggbbaa`
//! - `rgb(r, g, b)` and `rgba(r, g, b, a)` with `a` in `0.0..=1.0`
//! - the names `black`, `white`, `transparent`

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use waypoint_render::cell::PackedRgba;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("empty color string")]
    Empty,

    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    #[error("invalid color function: {0}")]
    InvalidFunction(String),

    #[error("unknown color: {0}")]
    Unknown(String),
}

/// A color as written in configuration, resolved to [`PackedRgba`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub PackedRgba);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(PackedRgba::rgb(r, g, b))
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(PackedRgba::rgba(r, g, b, a))
    }

    #[inline]
    pub const fn packed(self) -> PackedRgba {
        self.0
    }

    /// Convert a CSS alpha (`0.0..=1.0`) to a byte.
    pub fn alpha_byte(alpha: f32) -> u8 {
        (alpha.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}

impl From<Color> for PackedRgba {
    fn from(c: Color) -> Self {
        c.0
    }
}

impl From<PackedRgba> for Color {
    fn from(p: PackedRgba) -> Self {
        Self(p)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return parse_function(&lower)
                .ok_or_else(|| ColorParseError::InvalidFunction(s.to_string()));
        }
        match lower.as_str() {
            "black" => Ok(Color(PackedRgba::BLACK)),
            "white" => Ok(Color(PackedRgba::WHITE)),
            "transparent" => Ok(Color(PackedRgba::TRANSPARENT)),
            _ => Err(ColorParseError::Unknown(s.to_string())),
        }
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nib = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Color::rgb(nib(0)?, nib(1)?, nib(2)?))
        }
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_function(s: &str) -> Option<Color> {
    let (name, rest) = s.split_once('(')?;
    let args = rest.strip_suffix(')')?;
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |p: &str| p.parse::<u8>().ok();
    match (name.trim(), parts.as_slice()) {
        ("rgb", [r, g, b]) => Some(Color::rgb(channel(*r)?, channel(*g)?, channel(*b)?)),
        ("rgba", [r, g, b, a]) => {
            let alpha = a.parse::<f32>().ok()?;
            if !(0.0..=1.0).contains(&alpha) {
                return None;
            }
            Some(Color::rgba(
                channel(*r)?,
                channel(*g)?,
                channel(*b)?,
                Color::alpha_byte(alpha),
            ))
        }
        _ => None,
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        if p.a() == 255 {
            write!(f, "#{:02x}{:02x}{:02x}", p.r(), p.g(), p.b())
        } else {
            write!(
                f,
                "rgba({}, {}, {}, {:.2})",
                p.r(),
                p.g(),
                p.b(),
                p.a() as f32 / 255.0
            )
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
