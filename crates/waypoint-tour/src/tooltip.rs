#![forbid(unsafe_code)]

//! Tooltip rendering seam.
//!
//! The overlay decides where the tooltip goes; a [`TooltipRenderer`] decides
//! what it looks like and what its buttons do. Buttons register hit regions
//! with the ids below so a click can be mapped back to a [`TooltipAction`].

use unicode_width::UnicodeWidthStr;
use waypoint_core::geometry::Rect;
use waypoint_render::frame::{Frame, HitId};
use waypoint_style::Style;
use waypoint_widgets::paragraph::wrap_text;
use waypoint_widgets::{Block, BorderType, Button, Paragraph, Widget};

use crate::config::{Labels, TooltipStyle};
use crate::engine::TourControls;
use crate::step::StepSnapshot;

pub const NEXT_BUTTON: HitId = HitId::new(0x5750_0001);
pub const PREV_BUTTON: HitId = HitId::new(0x5750_0002);
pub const SKIP_BUTTON: HitId = HitId::new(0x5750_0003);

/// What a tooltip button asks the engine to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipAction {
    Next,
    Prev,
    Skip,
}

impl TooltipAction {
    pub fn from_hit(id: HitId) -> Option<Self> {
        match id {
            NEXT_BUTTON => Some(Self::Next),
            PREV_BUTTON => Some(Self::Prev),
            SKIP_BUTTON => Some(Self::Skip),
            _ => None,
        }
    }

    pub fn hit_id(self) -> HitId {
        match self {
            Self::Next => NEXT_BUTTON,
            Self::Prev => PREV_BUTTON,
            Self::Skip => SKIP_BUTTON,
        }
    }
}

/// Everything a renderer needs for the active step.
#[derive(Debug, Clone, Copy)]
pub struct TooltipProps<'a> {
    pub step: &'a StepSnapshot,
    pub labels: &'a Labels,
    pub style: &'a TooltipStyle,
}

impl TooltipProps<'_> {
    pub fn is_first_step(&self) -> bool {
        self.step.is_first()
    }

    pub fn is_last_step(&self) -> bool {
        self.step.is_last()
    }

    pub(crate) fn box_style(&self) -> Style {
        Style::new()
            .fg(self.style.foreground.packed())
            .bg(self.style.background.packed())
    }
}

pub trait TooltipRenderer {
    fn render(&self, props: &TooltipProps<'_>, area: Rect, frame: &mut Frame);

    /// Outer size for `props` when at most `max_width` cells are available.
    fn size_hint(&self, props: &TooltipProps<'_>, max_width: u16) -> (u16, u16) {
        let width = props.style.width.min(max_width);
        let lines = wrap_text(&props.step.text, width.saturating_sub(2) as usize).len() as u16;
        // Border, text, a spacer row, the button row.
        (width, lines.saturating_add(4))
    }

    /// Forward a button press to the engine. Called once per press.
    fn on_action(&self, action: TooltipAction, controls: &mut dyn TourControls) {
        tracing::debug!(?action, "tooltip action");
        match action {
            TooltipAction::Next => controls.next(),
            TooltipAction::Prev => controls.prev(),
            TooltipAction::Skip => controls.stop(),
        }
    }
}

/// Bordered tooltip with a step counter, wrapped text, and
/// Previous / Skip / Next buttons.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTooltip;

impl TooltipRenderer for DefaultTooltip {
    fn render(&self, props: &TooltipProps<'_>, area: Rect, frame: &mut Frame) {
        let style = props.box_style();
        let counter = format!(" {} of {} ", props.step.number, props.step.total);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(style)
            .title(&counter);
        block.render(area, frame);
        let inner = block.inner(area);
        if inner.height < 2 {
            return;
        }

        let text_area = Rect::new(inner.x, inner.y, inner.width, inner.height - 1);
        Paragraph::new(&props.step.text)
            .wrap(true)
            .style(style)
            .render(text_area, frame);

        let row = inner.bottom() - 1;
        let next_label = if props.is_last_step() {
            &props.labels.finish
        } else {
            &props.labels.next
        };
        let button_style = style.bold();
        let next_w = (next_label.width() as u16 + 2).min(inner.width);
        Button::new(next_label, NEXT_BUTTON)
            .border_type(None)
            .style(button_style)
            .render(Rect::new(inner.right() - next_w, row, next_w, 1), frame);

        let mut x = inner.x;
        if !props.is_first_step() {
            let w = props.labels.previous.width() as u16 + 2;
            Button::new(&props.labels.previous, PREV_BUTTON)
                .border_type(None)
                .style(style)
                .render(Rect::new(x, row, w, 1), frame);
            x += w;
        }
        if !props.is_last_step() {
            let w = props.labels.skip.width() as u16 + 2;
            if x + w + next_w <= inner.right() {
                Button::new(&props.labels.skip, SKIP_BUTTON)
                    .border_type(None)
                    .style(style)
                    .render(Rect::new(x, row, w, 1), frame);
            }
        }
    }
}
