#![forbid(unsafe_code)]

//! Frame = Buffer + hit grid for a render pass.
//!
//! The `Frame` is what `Model::view()` writes to. Widgets that react to
//! clicks register their rectangles in the hit grid; the runtime keeps the
//! last presented frame so the model can resolve a click to a widget.
//!
//! ```
//! use waypoint_core::geometry::Rect;
//! use waypoint_render::frame::{Frame, HitId, HitRegion};
//!
//! let mut frame = Frame::new(20, 5);
//! frame.register_hit(Rect::new(2, 1, 6, 1), HitId::new(7), HitRegion::Button, 0);
//! assert_eq!(frame.hit_test(3, 1).map(|h| h.0), Some(HitId::new(7)));
//! ```

use waypoint_core::geometry::Rect;

use crate::buffer::Buffer;

/// Identifier for a clickable region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HitId(pub u32);

impl HitId {
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Opaque user data attached to a hit region.
pub type HitData = u64;

/// What kind of area a hit landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HitRegion {
    #[default]
    None,
    Content,
    Button,
    /// The dimmed area around a highlighted region.
    Backdrop,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct HitCell {
    widget_id: Option<HitId>,
    region: HitRegion,
    data: HitData,
}

/// Maps cell positions to the widget registered there. Later
/// registrations win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitGrid {
    width: u16,
    height: u16,
    cells: Vec<HitCell>,
}

impl HitGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![HitCell::default(); width as usize * height as usize],
        }
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn register(&mut self, rect: Rect, widget_id: HitId, region: HitRegion, data: HitData) {
        let rect = rect.intersection(&Rect::from_size(self.width, self.height));
        let hit = HitCell {
            widget_id: Some(widget_id),
            region,
            data,
        };
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(i) = self.index(x, y) {
                    self.cells[i] = hit;
                }
            }
        }
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        let cell = self.cells.get(self.index(x, y)?)?;
        cell.widget_id.map(|id| (id, cell.region, cell.data))
    }

    pub fn clear(&mut self) {
        self.cells.fill(HitCell::default());
    }
}

/// One render pass: the cell grid plus hit testing metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub buffer: Buffer,
    pub hit_grid: HitGrid,
}

impl Frame {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::new(width, height),
            hit_grid: HitGrid::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.buffer.width()
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.buffer.height()
    }

    #[inline]
    pub fn area(&self) -> Rect {
        self.buffer.area()
    }

    pub fn register_hit(&mut self, rect: Rect, id: HitId, region: HitRegion, data: HitData) {
        self.hit_grid.register(rect, id, region, data);
    }

    pub fn hit_test(&self, x: u16, y: u16) -> Option<(HitId, HitRegion, HitData)> {
        self.hit_grid.hit_test(x, y)
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.hit_grid.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_registration_wins() {
        let mut frame = Frame::new(10, 4);
        frame.register_hit(Rect::from_size(10, 4), HitId::new(1), HitRegion::Backdrop, 0);
        frame.register_hit(Rect::new(2, 1, 3, 1), HitId::new(2), HitRegion::Button, 9);
        assert_eq!(
            frame.hit_test(3, 1),
            Some((HitId::new(2), HitRegion::Button, 9))
        );
        assert_eq!(
            frame.hit_test(0, 0).map(|h| h.1),
            Some(HitRegion::Backdrop)
        );
    }

    #[test]
    fn hits_outside_grid_are_none() {
        let mut frame = Frame::new(4, 4);
        frame.register_hit(Rect::new(2, 2, 10, 10), HitId::new(1), HitRegion::Content, 0);
        assert!(frame.hit_test(9, 9).is_none());
        assert!(frame.hit_test(3, 3).is_some());
    }

    #[test]
    fn clear_resets_hits() {
        let mut frame = Frame::new(4, 4);
        frame.register_hit(Rect::from_size(4, 4), HitId::new(1), HitRegion::Content, 0);
        frame.clear();
        assert!(frame.hit_test(0, 0).is_none());
    }
}
