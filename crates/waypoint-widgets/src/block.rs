#![forbid(unsafe_code)]

use waypoint_core::geometry::Rect;
use waypoint_render::buffer::Buffer;
use waypoint_render::cell::Cell;
use waypoint_render::frame::Frame;
use waypoint_style::Style;

use crate::borders::{BorderType, Borders};
use crate::{Widget, aligned_x, apply_style, draw_text_span, set_style_area};

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A box with optional borders, a title on the top edge, and a fill style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block<'a> {
    borders: Borders,
    border_style: Style,
    border_type: BorderType,
    title: Option<&'a str>,
    title_alignment: Alignment,
    style: Style,
}

impl<'a> Block<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block with all four borders.
    pub fn bordered() -> Self {
        Self::default().borders(Borders::ALL)
    }

    #[must_use]
    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }

    #[must_use]
    pub fn border_style(mut self, style: Style) -> Self {
        self.border_style = style;
        self
    }

    #[must_use]
    pub fn border_type(mut self, border_type: BorderType) -> Self {
        self.border_type = border_type;
        self
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn title_alignment(mut self, alignment: Alignment) -> Self {
        self.title_alignment = alignment;
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// The area left inside the borders.
    pub fn inner(&self, area: Rect) -> Rect {
        let mut inner = area;
        if self.borders.contains(Borders::LEFT) {
            inner.x = inner.x.saturating_add(1);
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::TOP) {
            inner.y = inner.y.saturating_add(1);
            inner.height = inner.height.saturating_sub(1);
        }
        if self.borders.contains(Borders::RIGHT) {
            inner.width = inner.width.saturating_sub(1);
        }
        if self.borders.contains(Borders::BOTTOM) {
            inner.height = inner.height.saturating_sub(1);
        }
        inner
    }

    fn border_cell(&self, buf: &Buffer, x: u16, y: u16, c: char) -> Cell {
        let mut cell = buf.get(x, y).copied().unwrap_or_default();
        cell.symbol = c;
        apply_style(&mut cell, self.border_style);
        cell
    }

    fn put(&self, buf: &mut Buffer, x: u16, y: u16, c: char) {
        let cell = self.border_cell(buf, x, y, c);
        buf.set(x, y, cell);
    }

    fn render_borders(&self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() || self.borders.is_empty() {
            return;
        }
        let set = self.border_type.to_border_set();
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        if self.borders.contains(Borders::LEFT) {
            for y in area.y..area.bottom() {
                self.put(buf, area.x, y, set.vertical);
            }
        }
        if self.borders.contains(Borders::RIGHT) {
            for y in area.y..area.bottom() {
                self.put(buf, right, y, set.vertical);
            }
        }
        if self.borders.contains(Borders::TOP) {
            for x in area.x..area.right() {
                self.put(buf, x, area.y, set.horizontal);
            }
        }
        if self.borders.contains(Borders::BOTTOM) {
            for x in area.x..area.right() {
                self.put(buf, x, bottom, set.horizontal);
            }
        }

        // Corners overwrite the edge glyphs.
        if self.borders.contains(Borders::LEFT | Borders::TOP) {
            self.put(buf, area.x, area.y, set.top_left);
        }
        if self.borders.contains(Borders::RIGHT | Borders::TOP) {
            self.put(buf, right, area.y, set.top_right);
        }
        if self.borders.contains(Borders::LEFT | Borders::BOTTOM) {
            self.put(buf, area.x, bottom, set.bottom_left);
        }
        if self.borders.contains(Borders::RIGHT | Borders::BOTTOM) {
            self.put(buf, right, bottom, set.bottom_right);
        }
    }

    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let Some(title) = self.title else { return };
        // Titles sit on the top edge, between the corners.
        let pad = u16::from(self.borders.contains(Borders::LEFT));
        let line = Rect::new(
            area.x + pad,
            area.y,
            area.width.saturating_sub(pad * 2),
            1,
        );
        if line.is_empty() {
            return;
        }
        let x = aligned_x(line, title, self.title_alignment);
        draw_text_span(buf, x, line.y, title, self.border_style, line.right());
    }
}

impl Widget for Block<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let area = area.intersection(&frame.area());
        if area.is_empty() {
            return;
        }
        let buf = &mut frame.buffer;
        if !self.style.is_empty() {
            buf.for_each_mut(area, |cell| cell.symbol = ' ');
            set_style_area(buf, area, self.style);
        }
        self.render_borders(area, buf);
        self.render_title(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_render::cell::PackedRgba;

    #[test]
    fn inner_shrinks_per_side() {
        let area = Rect::new(0, 0, 10, 5);
        assert_eq!(Block::bordered().inner(area), Rect::new(1, 1, 8, 3));
        assert_eq!(
            Block::new().borders(Borders::TOP).inner(area),
            Rect::new(0, 1, 10, 4)
        );
        assert_eq!(Block::new().inner(area), area);
    }

    #[test]
    fn rounded_corners_are_drawn() {
        let mut frame = Frame::new(6, 3);
        Block::bordered()
            .border_type(BorderType::Rounded)
            .render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "╭────╮");
        assert_eq!(frame.buffer.row_text(2), "╰────╯");
    }

    #[test]
    fn centered_title_on_top_edge() {
        let mut frame = Frame::new(12, 3);
        Block::bordered()
            .title("Hi")
            .title_alignment(Alignment::Center)
            .render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.find_text("Hi"), Some((5, 0)));
    }

    #[test]
    fn style_fills_background() {
        let bg = PackedRgba::rgb(0x2c, 0x3e, 0x50);
        let mut frame = Frame::new(4, 2);
        Block::new()
            .style(Style::new().bg(bg))
            .render(Rect::new(1, 0, 2, 2), &mut frame);
        assert_eq!(frame.buffer.get(1, 1).map(|c| c.bg), Some(bg));
        assert!(frame.buffer.get(0, 0).is_some_and(|c| c.bg.is_transparent()));
    }
}
