#![forbid(unsafe_code)]

//! The screen's tooltip: the stock look, with a log line on Next.

use waypoint_core::geometry::Rect;
use waypoint_render::frame::Frame;
use waypoint_tour::{DefaultTooltip, TooltipAction, TooltipProps, TooltipRenderer, TourControls};

#[derive(Debug, Clone, Copy, Default)]
pub struct CustomTooltip {
    inner: DefaultTooltip,
}

impl TooltipRenderer for CustomTooltip {
    fn render(&self, props: &TooltipProps<'_>, area: Rect, frame: &mut Frame) {
        self.inner.render(props, area, frame);
    }

    fn size_hint(&self, props: &TooltipProps<'_>, max_width: u16) -> (u16, u16) {
        self.inner.size_hint(props, max_width)
    }

    fn on_action(&self, action: TooltipAction, controls: &mut dyn TourControls) {
        if action == TooltipAction::Next {
            tracing::info!("Next button pressed");
        }
        self.inner.on_action(action, controls);
    }
}
