#![forbid(unsafe_code)]

//! Widgets for Waypoint screens.
//!
//! Widgets render into a [`Frame`] rather than a bare buffer so that
//! interactive ones (buttons) can register hit regions as they draw.

pub mod banner;
pub mod block;
pub mod borders;
pub mod button;
pub mod paragraph;
pub mod popover;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};
use waypoint_core::geometry::Rect;
use waypoint_render::buffer::Buffer;
use waypoint_render::cell::Cell;
use waypoint_render::frame::Frame;
use waypoint_style::Style;

pub use banner::Banner;
pub use block::{Alignment, Block};
pub use borders::{BorderSet, BorderType, Borders};
pub use button::Button;
pub use paragraph::Paragraph;
pub use popover::{Placement, Popover};

/// A renderable component.
pub trait Widget {
    /// Render the widget into `frame` within `area`.
    fn render(&self, area: Rect, frame: &mut Frame);
}

/// Apply the set fields of `style` to `cell`.
pub(crate) fn apply_style(cell: &mut Cell, style: Style) {
    style.apply_to(cell);
}

/// Apply `style` to every cell in `area`, keeping symbols.
pub(crate) fn set_style_area(buf: &mut Buffer, area: Rect, style: Style) {
    if style.is_empty() {
        return;
    }
    buf.for_each_mut(area, |cell| apply_style(cell, style));
}

/// Draw `text` at `(x, y)` in `style`, stopping before `max_x`. Each cell
/// keeps its own background unless `style` sets one.
///
/// Returns the column after the last drawn cell.
pub(crate) fn draw_text_span(
    buf: &mut Buffer,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
    max_x: u16,
) -> u16 {
    let max_x = max_x.min(buf.width());
    let mut cx = x;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0) as u16;
        if w == 0 {
            continue;
        }
        if cx.saturating_add(w) > max_x {
            break;
        }
        let mut cell = buf.get(cx, y).copied().unwrap_or_default();
        apply_style(&mut cell, style);
        cell.symbol = ch;
        buf.set(cx, y, cell);
        if w == 2 {
            cell.symbol = Cell::CONTINUATION;
            buf.set(cx + 1, y, cell);
        }
        cx += w;
    }
    cx
}

/// Column at which `text` starts when aligned inside `area`.
pub(crate) fn aligned_x(area: Rect, text: &str, alignment: Alignment) -> u16 {
    let width = (text.width() as u16).min(area.width);
    match alignment {
        Alignment::Left => area.x,
        Alignment::Center => area.x + (area.width - width) / 2,
        Alignment::Right => area.right() - width,
    }
}
