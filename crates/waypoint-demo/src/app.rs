#![forbid(unsafe_code)]

//! The application model: the home screen with its walkthrough.
//!
//! Mounting ([`AppContent::mount`], run from `init`) subscribes one logging
//! listener per lifecycle event; unmounting (`on_shutdown`) drops exactly
//! those subscriptions. Clicks are resolved against the hit grid captured by
//! the previous `view`, which is what the user actually saw.

use std::cell::{Cell, RefCell};
use std::time::Duration;

use waypoint_core::event::{Event, KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use waypoint_core::geometry::Rect;
use waypoint_render::frame::{Frame, HitGrid, HitId};
use waypoint_runtime::{Cmd, Model};
use waypoint_tour::overlay::BACKDROP;
use waypoint_tour::{
    EventKind, Overlay, Spotlight, StartOutcome, Subscription, TooltipAction, TooltipProps,
    TooltipRenderer, TourConfig, TourEvent, Walkthrough, place_tooltip, tooltip_max_width,
};
use waypoint_widgets::{Paragraph, Widget};

use crate::error::Result;
use crate::screen::{self, ScreenLayout, compose};
use crate::theme;
use crate::tooltip::CustomTooltip;

/// Spotlight animation step per runtime tick.
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

/// `(region, order, text)` for each walkthrough step. Steps are named after
/// their region.
pub const STEPS: [(&str, i32, &str); 4] = [
    (screen::NAVBAR, 1, "This is our navigation bar"),
    (screen::HERO, 2, "Here's our beautiful hero section"),
    (screen::WELCOME, 3, "Welcome to the app!"),
    (screen::FOOTER, 4, "Our footer section"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    Event(Event),
    StartTour,
    StopTour,
    Tooltip(TooltipAction),
    /// Scroll by this many rows; negative scrolls up.
    Scroll(i32),
    Quit,
}

impl From<Event> for Msg {
    fn from(event: Event) -> Self {
        Self::Event(event)
    }
}

pub struct AppContent {
    tour: Walkthrough,
    config: TourConfig,
    tooltip: CustomTooltip,
    spotlight: Spotlight,
    scroll: u16,
    autostart: bool,
    subscriptions: Vec<Subscription>,
    /// Terminal size as of the last resize or render. Until the first frame
    /// this is the 80x24 default.
    viewport: Cell<Rect>,
    /// Hit regions of the last rendered frame.
    hits: RefCell<HitGrid>,
}

impl AppContent {
    pub fn new(config: TourConfig) -> Result<Self> {
        let mut tour = Walkthrough::new();
        for (region, order, text) in STEPS {
            tour.register_step(region, order, text, region)?;
        }
        Ok(Self {
            tour,
            spotlight: Spotlight::from_config(&config),
            config,
            tooltip: CustomTooltip::default(),
            scroll: 0,
            autostart: false,
            subscriptions: Vec::new(),
            viewport: Cell::new(Rect::from_size(80, 24)),
            hits: RefCell::new(HitGrid::new(0, 0)),
        })
    }

    #[must_use]
    pub fn with_autostart(mut self, autostart: bool) -> Self {
        self.autostart = autostart;
        self
    }

    /// Subscribe the lifecycle loggers. Calling it again while mounted does
    /// nothing.
    pub fn mount(&mut self) {
        if self.is_mounted() {
            return;
        }
        let events = self.tour.events().clone();
        self.subscriptions = vec![
            events.subscribe(EventKind::Start, |_| tracing::info!("Tour started")),
            events.subscribe(EventKind::Stop, |event| {
                if let TourEvent::Stop { reason } = event {
                    tracing::info!(?reason, "Tour stopped");
                }
            }),
            events.subscribe(EventKind::StepChange, |event| {
                if let TourEvent::StepChange(step) = event {
                    tracing::info!(
                        step = %step.name,
                        number = step.number,
                        total = step.total,
                        "Step changed"
                    );
                }
            }),
        ];
        tracing::debug!("screen mounted");
    }

    /// Release the listeners added by [`mount`](Self::mount).
    pub fn unmount(&mut self) {
        if self.subscriptions.is_empty() {
            return;
        }
        self.subscriptions.clear();
        tracing::debug!("screen unmounted");
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    pub fn tour(&self) -> &Walkthrough {
        &self.tour
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    pub fn spotlight(&self) -> &Spotlight {
        &self.spotlight
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Screen layout for the current viewport and scroll offset.
    pub fn layout(&self) -> ScreenLayout {
        compose(self.content_area(self.viewport.get()), self.scroll)
    }

    fn content_area(&self, area: Rect) -> Rect {
        if self.config.status_bar_visible && area.height > 1 {
            Rect::new(area.x, area.y, area.width, area.height - 1)
        } else {
            area
        }
    }

    fn start_tour(&mut self) {
        match self.tour.start() {
            Ok(StartOutcome::Started) => self.follow_step(),
            Ok(StartOutcome::AlreadyRunning) => {}
            Err(err) => tracing::warn!(error = %err, "cannot start tour"),
        }
    }

    /// Scroll the active region into view and move the spotlight onto it.
    fn follow_step(&mut self) {
        if let Some(step) = self.tour.current_step() {
            self.scroll = self.layout().scroll_to_reveal(&step.region);
        }
        self.place_spotlight(true);
    }

    fn place_spotlight(&mut self, animate: bool) {
        let target = self
            .tour
            .current_step()
            .and_then(|step| self.layout().visible_rect(&step.region));
        match target {
            Some(rect) => {
                if !animate {
                    self.spotlight.clear();
                }
                self.spotlight.retarget(rect);
            }
            None => self.spotlight.clear(),
        }
    }

    /// Re-aim the spotlight when the viewport the active step was placed for
    /// is not the one last rendered. Covers a start issued before the first
    /// frame revealed the real terminal size.
    fn sync_spotlight(&mut self) {
        let Some(step) = self.tour.current_step() else {
            return;
        };
        let layout = self.layout();
        if self.spotlight.target() == layout.visible_rect(&step.region) {
            return;
        }
        self.scroll = layout.scroll_to_reveal(&step.region);
        self.place_spotlight(false);
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = i32::from(self.layout().max_scroll());
        let next = (i32::from(self.scroll) + delta).clamp(0, max) as u16;
        if next != self.scroll {
            self.scroll = next;
            self.place_spotlight(false);
        }
    }

    fn handle_event(&mut self, event: Event) -> Cmd<Msg> {
        match event {
            Event::Key(key) if key.is_press() => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize { width, height } => {
                self.viewport.set(Rect::from_size(width, height));
                self.scroll = self.scroll.min(self.layout().max_scroll());
                self.place_spotlight(false);
                Cmd::none()
            }
            Event::Tick => {
                self.sync_spotlight();
                self.spotlight.tick(TICK_INTERVAL);
                Cmd::none()
            }
            _ => Cmd::none(),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Cmd<Msg> {
        let running = self.tour.is_running();
        let page = i32::from(self.layout().viewport().height.max(1));
        match key.code {
            KeyCode::Char('c') if key.ctrl() => Cmd::msg(Msg::Quit),
            KeyCode::Char('q') => Cmd::msg(Msg::Quit),
            KeyCode::Char('s') if !running => Cmd::msg(Msg::StartTour),
            KeyCode::Enter | KeyCode::Right | KeyCode::Char('n') if running => {
                Cmd::msg(Msg::Tooltip(TooltipAction::Next))
            }
            KeyCode::Left | KeyCode::Char('p') if running => {
                Cmd::msg(Msg::Tooltip(TooltipAction::Prev))
            }
            KeyCode::Escape if running => Cmd::msg(Msg::StopTour),
            KeyCode::Up => Cmd::msg(Msg::Scroll(-1)),
            KeyCode::Down => Cmd::msg(Msg::Scroll(1)),
            KeyCode::PageUp => Cmd::msg(Msg::Scroll(-page)),
            KeyCode::PageDown => Cmd::msg(Msg::Scroll(page)),
            _ => Cmd::none(),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Cmd<Msg> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Cmd::msg(Msg::Scroll(-1)),
            MouseEventKind::ScrollDown => Cmd::msg(Msg::Scroll(1)),
            _ if mouse.is_left_click() => {
                let hit = self.hits.borrow().hit_test(mouse.x, mouse.y);
                match hit {
                    Some((id, _, _)) => self.click(id),
                    None => Cmd::none(),
                }
            }
            _ => Cmd::none(),
        }
    }

    fn click(&self, id: HitId) -> Cmd<Msg> {
        if id == screen::START_TOUR {
            return Cmd::msg(Msg::StartTour);
        }
        if id == BACKDROP {
            return if self.config.stop_on_outside_click {
                Cmd::msg(Msg::StopTour)
            } else {
                Cmd::none()
            };
        }
        match TooltipAction::from_hit(id) {
            Some(action) => Cmd::msg(Msg::Tooltip(action)),
            None => Cmd::none(),
        }
    }

    fn render_status(&self, area: Rect, frame: &mut Frame) {
        if area.height < 2 {
            return;
        }
        let row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let text = match self.tour.snapshot() {
            Some(step) => format!(
                " Step {} of {} ({})  Enter next  p back  Esc stop",
                step.number, step.total, step.name
            ),
            None => " s start tour  ↑↓ scroll  q quit".to_string(),
        };
        Paragraph::new(&text)
            .style(theme::status_bar())
            .render(row, frame);
    }

    fn render_tour(&self, layout: &ScreenLayout, area: Rect, frame: &mut Frame) {
        let Some(step) = self.tour.snapshot() else {
            return;
        };
        let target = layout.visible_rect(&step.region);
        // The spotlight only applies to the layout it was aimed at.
        let highlight = if self.spotlight.target() == target {
            self.spotlight.current().or(target)
        } else {
            target
        }
        .unwrap_or_default();
        Overlay::new(&self.config, highlight).render(area, frame);

        let props = TooltipProps {
            step: &step,
            labels: &self.config.labels,
            style: &self.config.tooltip_style,
        };
        let size = self.tooltip.size_hint(&props, tooltip_max_width(area));
        if let Some(rect) = place_tooltip(target.unwrap_or(highlight), size, layout.viewport()) {
            self.tooltip.render(&props, rect, frame);
        }
    }
}

impl Model for AppContent {
    type Message = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        self.mount();
        let tick = Cmd::tick(TICK_INTERVAL);
        if self.autostart {
            Cmd::batch(vec![tick, Cmd::msg(Msg::StartTour)])
        } else {
            tick
        }
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::Event(event) => self.handle_event(event),
            Msg::StartTour => {
                self.start_tour();
                Cmd::none()
            }
            Msg::StopTour => {
                self.tour.stop();
                self.spotlight.clear();
                Cmd::none()
            }
            Msg::Tooltip(action) => {
                self.tooltip.on_action(action, &mut self.tour);
                self.follow_step();
                Cmd::none()
            }
            Msg::Scroll(delta) => {
                self.scroll_by(delta);
                Cmd::none()
            }
            Msg::Quit => {
                tracing::debug!(running = self.tour.is_running(), "quit requested");
                Cmd::quit()
            }
        }
    }

    fn view(&self, frame: &mut Frame) {
        let area = frame.area();
        self.viewport.set(area);
        let layout = compose(self.content_area(area), self.scroll);
        layout.render(frame);
        if self.config.status_bar_visible {
            self.render_status(area, frame);
        }
        self.render_tour(&layout, area, frame);
        *self.hits.borrow_mut() = frame.hit_grid.clone();
    }

    fn on_shutdown(&mut self) {
        self.unmount();
    }
}
