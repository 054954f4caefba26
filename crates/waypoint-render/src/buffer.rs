#![forbid(unsafe_code)]

//! The cell grid widgets draw into.

use unicode_width::UnicodeWidthChar;
use waypoint_core::geometry::Rect;

use crate::cell::{Cell, PackedRgba};

/// A 2D grid of [`Cell`]s in row-major order.
///
/// Writes outside the grid are ignored, so widgets can draw into partially
/// visible areas without bounds checks of their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The whole buffer as a rectangle at the origin.
    #[inline]
    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.index(x, y).map(|i| &mut self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Fill `rect` (clipped to the buffer) with copies of `cell`.
    pub fn fill(&mut self, rect: Rect, cell: Cell) {
        let rect = rect.intersection(&self.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                self.set(x, y, cell);
            }
        }
    }

    /// Apply `f` to every cell in `rect` (clipped to the buffer).
    pub fn for_each_mut(&mut self, rect: Rect, mut f: impl FnMut(&mut Cell)) {
        let rect = rect.intersection(&self.area());
        for y in rect.y..rect.bottom() {
            for x in rect.x..rect.right() {
                if let Some(cell) = self.get_mut(x, y) {
                    f(cell);
                }
            }
        }
    }

    /// Blend `color` over every cell in `rect`.
    pub fn tint(&mut self, rect: Rect, color: PackedRgba) {
        self.for_each_mut(rect, |cell| cell.tint(color));
    }

    /// Write `text` starting at `(x, y)` using `template` for colors and
    /// flags, stopping at `max_x` (exclusive). Wide characters occupy two
    /// cells; one that would straddle `max_x` is dropped.
    ///
    /// Returns the column after the last written cell.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, template: Cell, max_x: u16) -> u16 {
        let max_x = max_x.min(self.width);
        let mut cx = x;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if w == 0 {
                continue;
            }
            if cx.saturating_add(w) > max_x {
                break;
            }
            self.set(cx, y, Cell { symbol: ch, ..template });
            if w == 2 {
                self.set(
                    cx + 1,
                    y,
                    Cell {
                        symbol: Cell::CONTINUATION,
                        ..template
                    },
                );
            }
            cx += w;
        }
        cx
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Positions of cells that differ from `prev`, row-major. A size change
    /// reports every cell.
    pub fn diff(&self, prev: &Buffer) -> Vec<(u16, u16)> {
        let mut changed = Vec::new();
        let same_size = prev.width == self.width && prev.height == self.height;
        for y in 0..self.height {
            for x in 0..self.width {
                let i = y as usize * self.width as usize + x as usize;
                if !same_size || self.cells[i] != prev.cells[i] {
                    changed.push((x, y));
                }
            }
        }
        changed
    }

    /// The symbols of row `y`, trailing spaces trimmed.
    pub fn row_text(&self, y: u16) -> String {
        let mut out = String::with_capacity(self.width as usize);
        for x in 0..self.width {
            if let Some(cell) = self.get(x, y) {
                if !cell.is_continuation() {
                    out.push(cell.symbol);
                }
            }
        }
        out.trim_end().to_string()
    }

    /// All rows joined by newlines. Handy for snapshot-style assertions.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether `needle` appears on any row.
    pub fn contains_text(&self, needle: &str) -> bool {
        (0..self.height).any(|y| self.row_text(y).contains(needle))
    }

    /// Location of the first occurrence of `needle`, in cell coordinates.
    pub fn find_text(&self, needle: &str) -> Option<(u16, u16)> {
        for y in 0..self.height {
            let row: Vec<(u16, char)> = (0..self.width)
                .filter_map(|x| {
                    self.get(x, y)
                        .filter(|c| !c.is_continuation())
                        .map(|c| (x, c.symbol))
                })
                .collect();
            let text: String = row.iter().map(|(_, c)| *c).collect();
            if let Some(byte_idx) = text.find(needle) {
                let char_idx = text[..byte_idx].chars().count();
                return Some((row[char_idx].0, y));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut buf = Buffer::new(2, 2);
        buf.set(5, 5, Cell::from_char('x'));
        assert!(buf.get(5, 5).is_none());
        assert_eq!(buf.to_text(), "\n");
    }

    #[test]
    fn set_string_clips_at_max_x() {
        let mut buf = Buffer::new(10, 1);
        let end = buf.set_string(2, 0, "Hello", Cell::default(), 5);
        assert_eq!(end, 5);
        assert_eq!(buf.row_text(0), "  Hel");
    }

    #[test]
    fn wide_chars_take_two_cells() {
        let mut buf = Buffer::new(6, 1);
        let end = buf.set_string(0, 0, "a界b", Cell::default(), 6);
        assert_eq!(end, 4);
        assert!(buf.get(2, 0).is_some_and(Cell::is_continuation));
        assert_eq!(buf.row_text(0), "a界b");
    }

    #[test]
    fn diff_reports_changed_cells_only() {
        let prev = Buffer::new(3, 2);
        let mut next = prev.clone();
        next.set(1, 1, Cell::from_char('z'));
        assert_eq!(next.diff(&prev), vec![(1, 1)]);
        assert_eq!(next.diff(&Buffer::new(2, 2)).len(), 6);
    }

    #[test]
    fn find_text_returns_cell_position() {
        let mut buf = Buffer::new(12, 3);
        buf.set_string(4, 2, "Next", Cell::default(), 12);
        assert_eq!(buf.find_text("Next"), Some((4, 2)));
        assert!(buf.contains_text("ext"));
        assert_eq!(buf.find_text("Prev"), None);
    }

    #[test]
    fn tint_is_clipped() {
        let mut buf = Buffer::new(2, 1);
        buf.tint(Rect::new(1, 0, 10, 10), PackedRgba::rgba(0, 0, 0, 100));
        assert!(buf.get(0, 0).is_some_and(|c| c.bg.is_transparent()));
        assert!(buf.get(1, 0).is_some_and(|c| !c.bg.is_transparent()));
    }

    fn writes() -> impl Strategy<Value = (u16, u16, Vec<(u16, u16)>)> {
        (1u16..20, 1u16..10).prop_flat_map(|(w, h)| {
            (
                Just(w),
                Just(h),
                prop::collection::vec((0..w, 0..h), 0..30),
            )
        })
    }

    proptest! {
        #[test]
        fn diff_lists_exactly_the_written_cells((w, h, points) in writes()) {
            let prev = Buffer::new(w, h);
            let mut next = prev.clone();
            for &(x, y) in &points {
                next.set(x, y, Cell::from_char('z'));
            }
            let mut expected = points.clone();
            expected.sort_by_key(|&(x, y)| (y, x));
            expected.dedup();
            prop_assert_eq!(next.diff(&prev), expected);
            prop_assert!(next.diff(&next).is_empty());
        }
    }
}
