#![forbid(unsafe_code)]

//! Anchored floating placement.
//!
//! [`Popover`] computes where a floating panel goes relative to an anchor
//! rectangle: preferably on the requested side, flipped to the opposite
//! side when there is not enough room, and always clamped into the
//! viewport. The tour tooltip is positioned this way relative to the
//! highlighted region.
//!
//! ```
//! use waypoint_core::geometry::Rect;
//! use waypoint_widgets::popover::{Placement, Popover};
//!
//! let anchor = Rect::new(10, 20, 20, 2);
//! let area = Popover::new(anchor, Placement::Below)
//!     .width(30)
//!     .height(5)
//!     .compute_area(Rect::from_size(80, 24))
//!     .expect("fits");
//! // No room below row 22, so the panel flips above the anchor.
//! assert!(area.bottom() <= anchor.y);
//! ```

use waypoint_core::geometry::Rect;
use waypoint_render::frame::Frame;

use crate::Widget;
use crate::block::Block;
use crate::borders::BorderType;

/// Side of the anchor to place the panel on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    Above,
    #[default]
    Below,
    /// Above, horizontally centered on the anchor.
    AboveCentered,
    /// Below, horizontally centered on the anchor.
    BelowCentered,
}

impl Placement {
    fn flip(self) -> Self {
        match self {
            Self::Above => Self::Below,
            Self::Below => Self::Above,
            Self::AboveCentered => Self::BelowCentered,
            Self::BelowCentered => Self::AboveCentered,
        }
    }

    fn is_above(self) -> bool {
        matches!(self, Self::Above | Self::AboveCentered)
    }

    fn is_centered(self) -> bool {
        matches!(self, Self::AboveCentered | Self::BelowCentered)
    }
}

#[derive(Debug, Clone)]
pub struct Popover {
    pub anchor: Rect,
    pub placement: Placement,
    /// Outer width. Defaults to the anchor width.
    pub width: Option<u16>,
    /// Outer height. Defaults to 1.
    pub height: Option<u16>,
    pub gap: u16,
    pub auto_flip: bool,
    pub border_type: Option<BorderType>,
}

impl Popover {
    pub fn new(anchor: Rect, placement: Placement) -> Self {
        Self {
            anchor,
            placement,
            width: None,
            height: None,
            gap: 0,
            auto_flip: true,
            border_type: None,
        }
    }

    #[must_use]
    pub fn width(mut self, w: u16) -> Self {
        self.width = Some(w);
        self
    }

    #[must_use]
    pub fn height(mut self, h: u16) -> Self {
        self.height = Some(h);
        self
    }

    #[must_use]
    pub fn gap(mut self, gap: u16) -> Self {
        self.gap = gap;
        self
    }

    #[must_use]
    pub fn auto_flip(mut self, flip: bool) -> Self {
        self.auto_flip = flip;
        self
    }

    #[must_use]
    pub fn border_type(mut self, border_type: Option<BorderType>) -> Self {
        self.border_type = border_type;
        self
    }

    /// The placement actually used inside `viewport`.
    pub fn resolve_placement(&self, viewport: Rect) -> Placement {
        let primary = self.placement;
        if !self.auto_flip {
            return primary;
        }
        let needed = self.outer_height().saturating_add(self.gap);
        let available = self.available_space(primary, viewport);
        if available >= needed {
            return primary;
        }
        let flipped = primary.flip();
        let flipped_available = self.available_space(flipped, viewport);
        if flipped_available >= needed || flipped_available > available {
            flipped
        } else {
            primary
        }
    }

    /// Where the panel goes, or `None` when it has no room at all.
    ///
    /// The result always lies inside `viewport`; when neither side has
    /// room the panel is clamped and may overlap the anchor.
    pub fn compute_area(&self, viewport: Rect) -> Option<Rect> {
        let width = self.width.unwrap_or(self.anchor.width).min(viewport.width);
        let height = self.outer_height().min(viewport.height);
        if width == 0 || height == 0 {
            return None;
        }
        let placement = self.resolve_placement(viewport);

        let x = if placement.is_centered() {
            let center = self.anchor.x.saturating_add(self.anchor.width / 2);
            center.saturating_sub(width / 2)
        } else {
            self.anchor.x
        };
        let y = if placement.is_above() {
            self.anchor
                .y
                .saturating_sub(self.gap)
                .saturating_sub(height)
        } else {
            self.anchor.bottom().saturating_add(self.gap)
        };
        Some(Rect::new(x, y, width, height).clamp_within(viewport))
    }

    /// Draw the border (if any) and hand the inner area to `render_content`.
    pub fn render_with<F>(&self, viewport: Rect, frame: &mut Frame, render_content: F)
    where
        F: FnOnce(Rect, &mut Frame),
    {
        let Some(area) = self.compute_area(viewport) else {
            return;
        };
        match self.border_type {
            Some(border_type) => {
                let block = Block::bordered().border_type(border_type);
                block.render(area, frame);
                render_content(block.inner(area), frame);
            }
            None => render_content(area, frame),
        }
    }

    fn outer_height(&self) -> u16 {
        self.height.unwrap_or(1)
    }

    fn available_space(&self, placement: Placement, viewport: Rect) -> u16 {
        if placement.is_above() {
            self.anchor.y.saturating_sub(viewport.y)
        } else {
            viewport.bottom().saturating_sub(self.anchor.bottom())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn below_basic_placement() {
        let anchor = Rect::new(10, 5, 20, 1);
        let area = Popover::new(anchor, Placement::Below)
            .width(20)
            .height(5)
            .compute_area(viewport())
            .expect("area");
        assert_eq!(area, Rect::new(10, 6, 20, 5));
    }

    #[test]
    fn flips_above_near_bottom() {
        let anchor = Rect::new(10, 22, 20, 1);
        let area = Popover::new(anchor, Placement::Below)
            .width(20)
            .height(5)
            .compute_area(viewport())
            .expect("area");
        assert_eq!(area.bottom(), 22);
    }

    #[test]
    fn flips_below_near_top() {
        let anchor = Rect::new(10, 1, 20, 1);
        let area = Popover::new(anchor, Placement::Above)
            .width(20)
            .height(5)
            .compute_area(viewport())
            .expect("area");
        assert_eq!(area.y, 2);
    }

    #[test]
    fn no_flip_when_disabled() {
        let anchor = Rect::new(10, 18, 20, 1);
        let popover = Popover::new(anchor, Placement::Below)
            .width(20)
            .height(8)
            .auto_flip(false);
        assert_eq!(popover.resolve_placement(viewport()), Placement::Below);
    }

    #[test]
    fn gap_creates_space() {
        let anchor = Rect::new(10, 5, 20, 1);
        let area = Popover::new(anchor, Placement::Below)
            .width(20)
            .height(3)
            .gap(1)
            .compute_area(viewport())
            .expect("area");
        assert_eq!(area.y, 7);
    }

    #[test]
    fn centered_on_anchor() {
        let anchor = Rect::new(30, 5, 20, 1);
        let area = Popover::new(anchor, Placement::BelowCentered)
            .width(10)
            .compute_area(viewport())
            .expect("area");
        assert_eq!(area.x, 35);
    }

    #[test]
    fn right_edge_is_clamped() {
        let anchor = Rect::new(75, 5, 5, 1);
        let area = Popover::new(anchor, Placement::Below)
            .width(20)
            .compute_area(viewport())
            .expect("area");
        assert_eq!(area.right(), 80);
    }

    #[test]
    fn zero_width_returns_none() {
        let anchor = Rect::new(10, 5, 0, 1);
        assert!(
            Popover::new(anchor, Placement::Below)
                .compute_area(viewport())
                .is_none()
        );
    }

    #[test]
    fn bordered_render_passes_inner_area() {
        let mut frame = Frame::new(40, 10);
        let mut inner = None;
        Popover::new(Rect::new(2, 1, 10, 1), Placement::Below)
            .width(12)
            .height(4)
            .border_type(Some(BorderType::Rounded))
            .render_with(frame.area(), &mut frame, |area, _| inner = Some(area));
        assert_eq!(inner, Some(Rect::new(3, 3, 10, 2)));
        assert_eq!(frame.buffer.get(2, 2).map(|c| c.symbol), Some('╭'));
    }

    proptest! {
        #[test]
        fn always_inside_viewport(
            ax in 0u16..80, ay in 0u16..24, aw in 1u16..40, ah in 1u16..10,
            w in 1u16..100, h in 1u16..30, above in any::<bool>(),
        ) {
            let placement = if above { Placement::Above } else { Placement::Below };
            let area = Popover::new(Rect::new(ax, ay, aw, ah), placement)
                .width(w)
                .height(h)
                .compute_area(viewport());
            if let Some(area) = area {
                prop_assert!(area.right() <= 80);
                prop_assert!(area.bottom() <= 24);
            }
        }
    }
}
