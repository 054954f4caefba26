#![forbid(unsafe_code)]

//! Text style with CSS-like cascading: unset fields inherit.

use waypoint_render::cell::{Cell, CellFlags, PackedRgba};

/// Optional foreground, background, and attributes.
///
/// `None` means "leave whatever is underneath", so a style with only `fg`
/// set can be drawn over a section background without erasing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<PackedRgba>,
    pub bg: Option<PackedRgba>,
    pub attrs: Option<CellFlags>,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            attrs: None,
        }
    }

    #[must_use]
    pub const fn fg(mut self, color: PackedRgba) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: PackedRgba) -> Self {
        self.bg = Some(color);
        self
    }

    #[must_use]
    pub const fn attrs(mut self, attrs: CellFlags) -> Self {
        self.attrs = Some(attrs);
        self
    }

    #[must_use]
    pub fn bold(self) -> Self {
        let attrs = self.attrs.unwrap_or_default() | CellFlags::BOLD;
        self.attrs(attrs)
    }

    /// Overlay `other` on top of `self`: fields set in `other` win.
    #[must_use]
    pub fn patch(self, other: Style) -> Style {
        Style {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            attrs: other.attrs.or(self.attrs),
        }
    }

    /// Apply the set fields to `cell`.
    pub fn apply_to(&self, cell: &mut Cell) {
        if let Some(fg) = self.fg {
            cell.fg = fg;
        }
        if let Some(bg) = self.bg {
            // Translucent backgrounds composite over what's already there.
            cell.bg = if bg.a() < 255 && !cell.bg.is_transparent() {
                bg.over(cell.bg)
            } else {
                bg
            };
        }
        if let Some(attrs) = self.attrs {
            cell.flags = attrs;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fg.is_none() && self.bg.is_none() && self.attrs.is_none()
    }
}
