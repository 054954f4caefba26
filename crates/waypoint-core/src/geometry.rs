#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle in terminal cells: layout bounds, highlight regions, hit areas.
///
/// Uses terminal coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle at the origin with the given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn area(&self) -> u32 {
        self.width as u32 * self.height as u32
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Intersection with another rectangle, or an empty rect if disjoint.
    #[inline]
    pub fn intersection(&self, other: &Rect) -> Rect {
        self.intersection_opt(other).unwrap_or_default()
    }

    /// Intersection with another rectangle, `None` if they don't overlap.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(Rect::new(x, y, right - x, bottom - y))
        } else {
            None
        }
    }

    /// Shrink by the given margin on each side.
    pub fn inner(&self, margin: Sides) -> Rect {
        Rect {
            x: self.x.saturating_add(margin.left),
            y: self.y.saturating_add(margin.top),
            width: self.width.saturating_sub(margin.horizontal_sum()),
            height: self.height.saturating_sub(margin.vertical_sum()),
        }
    }

    /// Grow by `margin` cells on every side, never leaving `bounds`.
    ///
    /// Used to pad a spotlight around the region it highlights.
    pub fn grow_within(&self, margin: u16, bounds: Rect) -> Rect {
        let x = self.x.saturating_sub(margin).max(bounds.x);
        let y = self.y.saturating_sub(margin).max(bounds.y);
        let right = self.right().saturating_add(margin).min(bounds.right());
        let bottom = self.bottom().saturating_add(margin).min(bounds.bottom());
        Rect::new(
            x,
            y,
            right.saturating_sub(x),
            bottom.saturating_sub(y),
        )
    }

    /// Translate the rectangle so it lies inside `bounds`, shrinking it if it
    /// is larger than `bounds`.
    pub fn clamp_within(&self, bounds: Rect) -> Rect {
        let width = self.width.min(bounds.width);
        let height = self.height.min(bounds.height);
        let x = self
            .x
            .max(bounds.x)
            .min(bounds.right().saturating_sub(width));
        let y = self
            .y
            .max(bounds.y)
            .min(bounds.bottom().saturating_sub(height));
        Rect::new(x, y, width, height)
    }

    /// Smallest rectangle containing both.
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    /// Linear interpolation between two rectangles, `t` clamped to `[0, 1]`.
    pub fn lerp(from: Rect, to: Rect, t: f32) -> Rect {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u16, b: u16| -> u16 {
            let v = a as f32 + (b as f32 - a as f32) * t;
            v.round().clamp(0.0, u16::MAX as f32) as u16
        };
        Rect::new(
            mix(from.x, to.x),
            mix(from.y, to.y),
            mix(from.width, to.width),
            mix(from.height, to.height),
        )
    }
}

/// Sides for padding/margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sides {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Sides {
    pub const fn all(val: u16) -> Self {
        Self::new(val, val, val, val)
    }

    pub const fn horizontal(val: u16) -> Self {
        Self::new(0, val, 0, val)
    }

    pub const fn vertical(val: u16) -> Self {
        Self::new(val, 0, val, 0)
    }

    pub const fn new(top: u16, right: u16, bottom: u16, left: u16) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[inline]
    pub const fn horizontal_sum(&self) -> u16 {
        self.left.saturating_add(self.right)
    }

    #[inline]
    pub const fn vertical_sum(&self) -> u16 {
        self.top.saturating_add(self.bottom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn intersection_of_disjoint_is_empty() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(10, 10, 2, 2);
        assert!(a.intersection_opt(&b).is_none());
        assert!(a.intersection(&b).is_empty());
    }

    #[test]
    fn inner_saturates() {
        let r = Rect::new(2, 2, 3, 3);
        let inner = r.inner(Sides::all(2));
        assert_eq!(inner, Rect::new(4, 4, 0, 0));
    }

    #[test]
    fn grow_within_stops_at_bounds() {
        let bounds = Rect::from_size(20, 10);
        let r = Rect::new(0, 1, 5, 2);
        let grown = r.grow_within(2, bounds);
        assert_eq!(grown, Rect::new(0, 0, 7, 5));
    }

    #[test]
    fn clamp_within_moves_and_shrinks() {
        let bounds = Rect::new(0, 0, 10, 5);
        assert_eq!(
            Rect::new(8, 4, 4, 3).clamp_within(bounds),
            Rect::new(6, 2, 4, 3)
        );
        assert_eq!(
            Rect::new(0, 0, 30, 30).clamp_within(bounds),
            Rect::new(0, 0, 10, 5)
        );
    }

    #[test]
    fn lerp_endpoints() {
        let a = Rect::new(0, 0, 10, 2);
        let b = Rect::new(10, 8, 20, 4);
        assert_eq!(Rect::lerp(a, b, 0.0), a);
        assert_eq!(Rect::lerp(a, b, 1.0), b);
        assert_eq!(Rect::lerp(a, b, 0.5), Rect::new(5, 4, 15, 3));
        assert_eq!(Rect::lerp(a, b, f32::NAN), b);
    }

    #[test]
    fn union_covers_both() {
        let a = Rect::new(1, 1, 2, 2);
        let b = Rect::new(5, 0, 1, 6);
        assert_eq!(a.union(&b), Rect::new(1, 0, 5, 6));
    }

    proptest! {
        #[test]
        fn clamp_within_stays_inside(
            x in 0u16..200, y in 0u16..200, w in 0u16..200, h in 0u16..200,
            bw in 1u16..120, bh in 1u16..60,
        ) {
            let bounds = Rect::new(3, 2, bw, bh);
            let r = Rect::new(x, y, w, h).clamp_within(bounds);
            prop_assert!(r.x >= bounds.x && r.y >= bounds.y);
            prop_assert!(r.right() <= bounds.right());
            prop_assert!(r.bottom() <= bounds.bottom());
        }
    }
}
