#![forbid(unsafe_code)]

//! Backdrop, spotlight, and tooltip placement.

use std::time::Duration;

use waypoint_core::geometry::Rect;
use waypoint_render::cell::PackedRgba;
use waypoint_render::frame::{Frame, HitId, HitRegion};
use waypoint_style::Style;
use waypoint_widgets::{Block, BorderType, Placement, Popover, Widget};

use crate::config::{OverlayMode, TourConfig};

/// Hit id of the dimmed area around the spotlight.
pub const BACKDROP: HitId = HitId::new(0x5750_0010);

const OUTLINE: PackedRgba = PackedRgba::WHITE;

/// Dims everything outside the highlighted rect.
///
/// The backdrop registers [`BACKDROP`] hits on the dimmed cells only, which
/// shadows widgets underneath them while leaving the spotlight clickable.
#[derive(Debug, Clone)]
pub struct Overlay<'a> {
    config: &'a TourConfig,
    highlight: Rect,
}

impl<'a> Overlay<'a> {
    pub fn new(config: &'a TourConfig, highlight: Rect) -> Self {
        Self { config, highlight }
    }

    /// The area the backdrop covers within `viewport`.
    pub fn backdrop_area(&self, viewport: Rect) -> Rect {
        if self.config.status_bar_visible && viewport.height > 1 {
            Rect::new(viewport.x, viewport.y, viewport.width, viewport.height - 1)
        } else {
            viewport
        }
    }

    /// The undimmed cut-out: the highlight grown by the margin.
    pub fn spotlight(&self, viewport: Rect) -> Rect {
        self.highlight
            .grow_within(self.config.margin, self.backdrop_area(viewport))
    }

    fn register_backdrop_hits(&self, backdrop: Rect, spot: Rect, frame: &mut Frame) {
        if spot.is_empty() {
            frame.register_hit(backdrop, BACKDROP, HitRegion::Backdrop, 0);
            return;
        }
        let bands = [
            Rect::new(backdrop.x, backdrop.y, backdrop.width, spot.y - backdrop.y),
            Rect::new(
                backdrop.x,
                spot.bottom(),
                backdrop.width,
                backdrop.bottom() - spot.bottom(),
            ),
            Rect::new(backdrop.x, spot.y, spot.x - backdrop.x, spot.height),
            Rect::new(
                spot.right(),
                spot.y,
                backdrop.right() - spot.right(),
                spot.height,
            ),
        ];
        for band in bands.into_iter().filter(|b| !b.is_empty()) {
            frame.register_hit(band, BACKDROP, HitRegion::Backdrop, 0);
        }
    }
}

impl Widget for Overlay<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let viewport = area.intersection(&frame.area());
        let backdrop = self.backdrop_area(viewport);
        let spot = self.spotlight(viewport);
        let tint = self.config.backdrop_color.packed();
        let _span = tracing::trace_span!(
            "overlay",
            x = spot.x,
            y = spot.y,
            w = spot.width,
            h = spot.height
        )
        .entered();

        for y in backdrop.y..backdrop.bottom() {
            for x in backdrop.x..backdrop.right() {
                if spot.contains(x, y) {
                    continue;
                }
                if let Some(cell) = frame.buffer.get_mut(x, y) {
                    cell.tint(tint);
                }
            }
        }
        self.register_backdrop_hits(backdrop, spot, frame);

        if self.config.overlay == OverlayMode::Svg && !spot.is_empty() {
            let ring = spot.grow_within(1, backdrop);
            if ring != spot {
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().fg(OUTLINE))
                    .render(ring, frame);
            }
        }
    }
}

/// Animates the spotlight between highlighted regions.
///
/// Retargeting starts a linear move from wherever the spotlight currently
/// is; with animation off, or with nothing shown yet, it jumps.
#[derive(Debug, Clone)]
pub struct Spotlight {
    animated: bool,
    duration: Duration,
    from: Option<Rect>,
    to: Option<Rect>,
    elapsed: Duration,
}

impl Spotlight {
    pub fn new(animated: bool, duration: Duration) -> Self {
        Self {
            animated: animated && !duration.is_zero(),
            duration,
            from: None,
            to: None,
            elapsed: Duration::ZERO,
        }
    }

    pub fn from_config(config: &TourConfig) -> Self {
        Self::new(config.animated, config.animation_duration())
    }

    pub fn retarget(&mut self, target: Rect) {
        if self.to == Some(target) {
            return;
        }
        self.from = match (self.animated, self.current()) {
            (true, Some(current)) => Some(current),
            _ => None,
        };
        self.to = Some(target);
        self.elapsed = Duration::ZERO;
    }

    /// Advance the animation. Returns `true` while still moving.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.is_animating() {
            return false;
        }
        self.elapsed = self.elapsed.saturating_add(delta).min(self.duration);
        if self.elapsed >= self.duration {
            self.from = None;
        }
        self.is_animating()
    }

    pub fn is_animating(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    pub fn target(&self) -> Option<Rect> {
        self.to
    }

    /// Where the spotlight is drawn now.
    pub fn current(&self) -> Option<Rect> {
        let to = self.to?;
        let Some(from) = self.from else {
            return Some(to);
        };
        let t = self.elapsed.as_secs_f32() / self.duration.as_secs_f32();
        Some(Rect::lerp(from, to, t))
    }

    pub fn clear(&mut self) {
        self.from = None;
        self.to = None;
        self.elapsed = Duration::ZERO;
    }
}

/// Widest tooltip allowed in `viewport`: 80% of its width.
pub fn tooltip_max_width(viewport: Rect) -> u16 {
    ((viewport.width as u32 * 4) / 5) as u16
}

/// Position a tooltip of `size` below `highlight`, above it when there is
/// no room below, and always inside `viewport`.
pub fn place_tooltip(highlight: Rect, size: (u16, u16), viewport: Rect) -> Option<Rect> {
    let (width, height) = size;
    Popover::new(highlight, Placement::Below)
        .width(width.min(tooltip_max_width(viewport)))
        .height(height)
        .gap(1)
        .compute_area(viewport)
}
