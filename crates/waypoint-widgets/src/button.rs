#![forbid(unsafe_code)]

//! Clickable labelled button.

use unicode_width::UnicodeWidthStr;
use waypoint_core::geometry::Rect;
use waypoint_render::frame::{Frame, HitData, HitId, HitRegion};
use waypoint_style::Style;

use crate::block::{Alignment, Block};
use crate::borders::BorderType;
use crate::{Widget, aligned_x, draw_text_span};

/// A button registers its whole rect as a [`HitRegion::Button`] so the
/// model can map a mouse click back to the action.
#[derive(Debug, Clone)]
pub struct Button<'a> {
    label: &'a str,
    style: Style,
    hit_id: HitId,
    data: HitData,
    border_type: Option<BorderType>,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str, hit_id: HitId) -> Self {
        Self {
            label,
            style: Style::default(),
            hit_id,
            data: 0,
            border_type: Some(BorderType::Rounded),
        }
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn data(mut self, data: HitData) -> Self {
        self.data = data;
        self
    }

    /// `None` draws the label on a single row without a frame.
    #[must_use]
    pub fn border_type(mut self, border_type: Option<BorderType>) -> Self {
        self.border_type = border_type;
        self
    }

    /// Width that fits the label with one cell of padding per side.
    pub fn preferred_width(&self) -> u16 {
        let frame = if self.border_type.is_some() { 2 } else { 0 };
        (self.label.width() as u16).saturating_add(2 + frame)
    }
}

impl Widget for Button<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let area = area.intersection(&frame.area());
        if area.is_empty() {
            return;
        }
        let label_area = match self.border_type {
            Some(border_type) if area.height >= 3 => {
                let block = Block::bordered()
                    .border_type(border_type)
                    .border_style(self.style)
                    .style(self.style);
                block.render(area, frame);
                block.inner(area)
            }
            _ => {
                Block::new().style(self.style).render(area, frame);
                area
            }
        };
        let y = label_area.y + label_area.height / 2;
        let x = aligned_x(label_area, self.label, Alignment::Center);
        draw_text_span(
            &mut frame.buffer,
            x,
            y,
            self.label,
            self.style,
            label_area.right(),
        );
        frame.register_hit(area, self.hit_id, HitRegion::Button, self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_render::cell::PackedRgba;

    #[test]
    fn registers_hit_over_whole_rect() {
        let mut frame = Frame::new(20, 5);
        let area = Rect::new(2, 1, 12, 3);
        Button::new("Start Tour", HitId::new(3))
            .data(7)
            .render(area, &mut frame);
        assert_eq!(
            frame.hit_test(2, 1),
            Some((HitId::new(3), HitRegion::Button, 7))
        );
        assert_eq!(frame.hit_test(13, 3).map(|h| h.0), Some(HitId::new(3)));
        assert!(frame.hit_test(14, 3).is_none());
    }

    #[test]
    fn label_is_centered_inside_frame() {
        let mut frame = Frame::new(14, 3);
        Button::new("Start Tour", HitId::new(1)).render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.find_text("Start Tour"), Some((2, 1)));
        assert_eq!(frame.buffer.get(0, 0).map(|c| c.symbol), Some('╭'));
    }

    #[test]
    fn single_row_without_border() {
        let bg = PackedRgba::rgb(0x2c, 0x3e, 0x50);
        let mut frame = Frame::new(8, 1);
        Button::new("Next", HitId::new(1))
            .border_type(None)
            .style(Style::new().bg(bg))
            .render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.find_text("Next"), Some((2, 0)));
        assert_eq!(frame.buffer.get(0, 0).map(|c| c.bg), Some(bg));
    }

    #[test]
    fn preferred_width_pads_label() {
        assert_eq!(Button::new("Next", HitId::new(1)).preferred_width(), 8);
        assert_eq!(
            Button::new("Next", HitId::new(1))
                .border_type(None)
                .preferred_width(),
            6
        );
    }
}
