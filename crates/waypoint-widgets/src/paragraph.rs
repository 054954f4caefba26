#![forbid(unsafe_code)]

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use waypoint_core::geometry::Rect;
use waypoint_render::frame::Frame;
use waypoint_style::Style;

use crate::block::{Alignment, Block};
use crate::{Widget, aligned_x, draw_text_span, set_style_area};

/// Multi-line text with optional word wrapping.
#[derive(Debug, Clone, Default)]
pub struct Paragraph<'a> {
    text: &'a str,
    block: Option<Block<'a>>,
    style: Style,
    wrap: bool,
    alignment: Alignment,
}

impl<'a> Paragraph<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    #[must_use]
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Break lines at word boundaries to fit the area.
    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    #[must_use]
    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Visual lines this paragraph occupies at `width`, borders excluded.
    pub fn line_count(&self, width: u16) -> u16 {
        self.lines(width).len().min(u16::MAX as usize) as u16
    }

    fn lines(&self, width: u16) -> Vec<String> {
        if self.wrap {
            wrap_text(self.text, width as usize)
        } else {
            self.text.lines().map(str::to_string).collect()
        }
    }
}

/// Greedy word wrap. Words longer than `width` are split by character.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let mut out = Vec::new();
    for raw in text.lines() {
        let mut line = String::new();
        let mut line_width = 0usize;
        for word in raw.split_whitespace() {
            let word_width = word.width();
            let sep = usize::from(!line.is_empty());
            if line_width + sep + word_width <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_width += sep + word_width;
                continue;
            }
            if !line.is_empty() {
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
                continue;
            }
            for ch in word.chars() {
                let w = ch.width().unwrap_or(0);
                if line_width + w > width {
                    out.push(std::mem::take(&mut line));
                    line_width = 0;
                }
                line.push(ch);
                line_width += w;
            }
        }
        out.push(line);
    }
    out
}

impl Widget for Paragraph<'_> {
    fn render(&self, area: Rect, frame: &mut Frame) {
        let _span = tracing::trace_span!(
            "widget_render",
            widget = "Paragraph",
            x = area.x,
            y = area.y,
            w = area.width,
            h = area.height
        )
        .entered();

        set_style_area(&mut frame.buffer, area, self.style);

        let text_area = match self.block {
            Some(ref b) => {
                b.render(area, frame);
                b.inner(area)
            }
            None => area,
        };
        if text_area.is_empty() {
            return;
        }

        for (y, line) in (text_area.y..text_area.bottom()).zip(self.lines(text_area.width)) {
            let x = aligned_x(text_area, &line, self.alignment);
            draw_text_span(
                &mut frame.buffer,
                x,
                y,
                &line,
                self.style,
                text_area.right(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(
            wrap_text("Here's our beautiful hero section", 12),
            vec!["Here's our", "beautiful", "hero section"]
        );
    }

    #[test]
    fn splits_overlong_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn keeps_explicit_newlines() {
        assert_eq!(wrap_text("a\nb", 10), vec!["a", "b"]);
        assert!(wrap_text("anything", 0).is_empty());
    }

    #[test]
    fn renders_centered() {
        let mut frame = Frame::new(10, 1);
        Paragraph::new("ab")
            .alignment(Alignment::Center)
            .render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.find_text("ab"), Some((4, 0)));
    }

    #[test]
    fn truncates_to_area_height() {
        let mut frame = Frame::new(5, 2);
        Paragraph::new("one two three four")
            .wrap(true)
            .render(frame.area(), &mut frame);
        assert_eq!(frame.buffer.row_text(0), "one");
        assert_eq!(frame.buffer.row_text(1), "two");
    }

    proptest! {
        #[test]
        fn wrapped_lines_fit(text in "[a-z ]{0,60}", width in 1usize..20) {
            for line in wrap_text(&text, width) {
                prop_assert!(line.width() <= width);
            }
        }
    }
}
