#![forbid(unsafe_code)]

//! Cells and packed colors.

use bitflags::bitflags;

/// An RGBA color packed into a `u32` (`0xRRGGBBAA`).
///
/// Alpha 0 means "terminal default": the presenter emits no color for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PackedRgba(pub u32);

impl PackedRgba {
    pub const TRANSPARENT: Self = Self(0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Background assumed under a transparent cell when blending.
    pub const DEFAULT_BG: Self = Self::BLACK;
    /// Foreground assumed for a transparent cell when blending.
    pub const DEFAULT_FG: Self = Self::rgb(229, 229, 229);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32)
    }

    #[inline]
    pub const fn r(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    pub const fn g(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0 as u8
    }

    #[inline]
    pub const fn is_transparent(self) -> bool {
        self.a() == 0
    }

    /// Same color with a different alpha.
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::rgba(self.r(), self.g(), self.b(), a)
    }

    /// Source-over compositing of `self` onto `dst`. The result is opaque
    /// whenever `dst` is opaque.
    pub fn over(self, dst: PackedRgba) -> PackedRgba {
        let sa = self.a() as u32;
        if sa == 255 {
            return self;
        }
        if sa == 0 {
            return dst;
        }
        let da = dst.a() as u32;
        let inv = 255 - sa;
        let out_a = sa + da * inv / 255;
        if out_a == 0 {
            return Self::TRANSPARENT;
        }
        let mix = |s: u8, d: u8| -> u8 {
            let num = s as u32 * sa * 255 + d as u32 * da * inv;
            ((num + out_a * 255 / 2) / (out_a * 255)).min(255) as u8
        };
        Self::rgba(
            mix(self.r(), dst.r()),
            mix(self.g(), dst.g()),
            mix(self.b(), dst.b()),
            out_a as u8,
        )
    }
}

bitflags! {
    /// Text attributes stored per cell.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CellFlags: u8 {
        const BOLD      = 0b0000_0001;
        const DIM       = 0b0000_0010;
        const ITALIC    = 0b0000_0100;
        const UNDERLINE = 0b0000_1000;
        const REVERSE   = 0b0001_0000;
    }
}

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// The displayed character. [`Cell::CONTINUATION`] marks the trailing
    /// half of a wide character.
    pub symbol: char,
    pub fg: PackedRgba,
    pub bg: PackedRgba,
    pub flags: CellFlags,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            symbol: ' ',
            fg: PackedRgba::TRANSPARENT,
            bg: PackedRgba::TRANSPARENT,
            flags: CellFlags::empty(),
        }
    }
}

impl Cell {
    pub const CONTINUATION: char = '\0';

    #[inline]
    pub fn from_char(symbol: char) -> Self {
        Self {
            symbol,
            ..Self::default()
        }
    }

    #[inline]
    #[must_use]
    pub fn with_fg(mut self, fg: PackedRgba) -> Self {
        self.fg = fg;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_bg(mut self, bg: PackedRgba) -> Self {
        self.bg = bg;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_flags(mut self, flags: CellFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn is_continuation(&self) -> bool {
        self.symbol == Self::CONTINUATION
    }

    /// Blend `tint` over both colors of this cell, resolving transparent
    /// colors against the terminal defaults first.
    pub fn tint(&mut self, tint: PackedRgba) {
        let fg = if self.fg.is_transparent() {
            PackedRgba::DEFAULT_FG
        } else {
            self.fg
        };
        let bg = if self.bg.is_transparent() {
            PackedRgba::DEFAULT_BG
        } else {
            self.bg
        };
        self.fg = tint.over(fg);
        self.bg = tint.over(bg);
    }
}
