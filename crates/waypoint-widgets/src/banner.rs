#![forbid(unsafe_code)]

//! Image banner placeholder.
//!
//! Terminals cannot show the remote image, so the banner paints a shaded
//! gradient standing in for it, keeps the source URI as a caption, then
//! applies the dimming overlay and the centered title on top.

use unicode_width::UnicodeWidthStr;
use waypoint_core::geometry::Rect;
use waypoint_render::cell::{Cell, PackedRgba};
use waypoint_render::frame::Frame;
use waypoint_style::Style;

use crate::block::Alignment;
use crate::{Widget, aligned_x, draw_text_span};

const SHADES: [char; 3] = ['░', '▒', '▓'];

#[derive(Debug, Clone)]
pub struct Banner<'a> {
    source: &'a str,
    title: Option<&'a str>,
    title_style: Style,
    overlay: Option<PackedRgba>,
    top: PackedRgba,
    bottom: PackedRgba,
}

impl<'a> Banner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            title: None,
            title_style: Style::default(),
            overlay: None,
            top: PackedRgba::rgb(0x5d, 0x8a, 0xa8),
            bottom: PackedRgba::rgb(0x2e, 0x4a, 0x3c),
        }
    }

    #[must_use]
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    #[must_use]
    pub fn title_style(mut self, style: Style) -> Self {
        self.title_style = style;
        self
    }

    /// Translucent color blended over the whole banner before the title.
    #[must_use]
    pub fn overlay(mut self, color: PackedRgba) -> Self {
        self.overlay = Some(color);
        self
    }

    #[must_use]
    pub fn gradient(mut self, top: PackedRgba, bottom: PackedRgba) -> Self {
        self.top = top;
        self.bottom = bottom;
        self
    }

    pub fn source(&self) -> &str {
        self.source
    }

    fn row_color(&self, row: u16, rows: u16) -> PackedRgba {
        let t = if rows <= 1 {
            0.0
        } else {
            row as f32 / (rows - 1) as f32
        };
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        PackedRgba::rgb(
            mix(self.top.r(), self.bottom.r()),
            mix(self.top.g(), self.bottom.g()),
            mix(self.top.b(), self.bottom.b()),
        )
    }
}

impl Widget for Banner<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let area = area.intersection(&frame.area());
        if area.is_empty() {
            return;
        }
        let buf = &mut frame.buffer;
        for (i, y) in (area.y..area.bottom()).enumerate() {
            let bg = self.row_color(i as u16, area.height);
            let fg = bg.with_alpha(160).over(PackedRgba::WHITE);
            for x in area.x..area.right() {
                let shade = SHADES[(x as usize + i) % SHADES.len()];
                buf.set(x, y, Cell::from_char(shade).with_fg(fg).with_bg(bg));
            }
        }

        // Caption in the bottom-right corner, under the overlay.
        if area.height >= 3 {
            let caption = self.source.trim_start_matches("https://");
            let caption_area = Rect::new(area.x, area.bottom() - 1, area.width, 1);
            let x = aligned_x(caption_area, caption, Alignment::Right);
            draw_text_span(
                buf,
                x,
                caption_area.y,
                caption,
                Style::new().fg(PackedRgba::WHITE),
                caption_area.right(),
            );
        }

        if let Some(overlay) = self.overlay {
            buf.tint(area, overlay);
        }

        if let Some(title) = self.title {
            let line = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
            let x = aligned_x(line, title, Alignment::Center);
            // Clear the pattern behind the title so it reads cleanly.
            let width = (title.width() as u16).min(line.right() - x);
            buf.for_each_mut(Rect::new(x, line.y, width, 1), |cell| cell.symbol = ' ');
            draw_text_span(buf, x, line.y, title, self.title_style, line.right());
        }
    }
}
