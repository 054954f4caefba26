#![forbid(unsafe_code)]

//! The home screen: navbar, hero, welcome text, start button, footer.
//!
//! [`compose`] is a pure function of the viewport and scroll offset. The
//! sections stack top to bottom at fixed heights; each walkthrough target
//! is followed by one blank row. Content taller than the viewport scrolls.

use waypoint_core::geometry::Rect;
use waypoint_render::frame::{Frame, HitId, HitRegion};
use waypoint_tour::RegionId;
use waypoint_widgets::{Alignment, Banner, Block, Button, Paragraph, Widget};

use crate::theme;

pub const NAVBAR: &str = "navbar";
pub const HERO: &str = "hero";
pub const WELCOME: &str = "welcome";
pub const FOOTER: &str = "footer";

pub const START_TOUR: HitId = HitId::new(0x5750_0100);

pub const LOGO: &str = "MyApp";
pub const NAV_LINKS: [&str; 2] = ["Home", "About"];
pub const HERO_IMAGE: &str = "https://picsum.photos/800/400";
pub const HERO_TITLE: &str = "Welcome to Our App";
pub const WELCOME_TEXT: &str = "Hello, Welcome to our App!";
pub const START_LABEL: &str = "Start Tour";
pub const FOOTER_TEXT: &str = "© 2025 MyApp. All rights reserved.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Navbar,
    Hero,
    Welcome,
    StartButton,
    Footer,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Navbar,
        Section::Hero,
        Section::Welcome,
        Section::StartButton,
        Section::Footer,
    ];

    const fn height(self) -> u16 {
        match self {
            Section::Hero => 8,
            _ => 3,
        }
    }

    /// The walkthrough region this section is registered as, if any.
    pub const fn region(self) -> Option<&'static str> {
        match self {
            Section::Navbar => Some(NAVBAR),
            Section::Hero => Some(HERO),
            Section::Welcome => Some(WELCOME),
            Section::Footer => Some(FOOTER),
            Section::StartButton => None,
        }
    }
}

/// Section rects for one viewport, in content coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    viewport: Rect,
    scroll: u16,
    content_height: u16,
    sections: Vec<(Section, Rect)>,
}

/// Lay the screen out in `viewport`, scrolled down by `scroll` rows.
/// Scroll is clamped so the last content row never rises above the
/// bottom of the viewport.
pub fn compose(viewport: Rect, scroll: u16) -> ScreenLayout {
    let mut sections = Vec::with_capacity(Section::ALL.len());
    let mut y = 0u16;
    for section in Section::ALL {
        let rect = if section == Section::StartButton {
            let width = Button::new(START_LABEL, START_TOUR)
                .preferred_width()
                .min(viewport.width);
            Rect::new((viewport.width - width) / 2, y, width, section.height())
        } else {
            Rect::new(0, y, viewport.width, section.height())
        };
        sections.push((section, rect));
        y = y.saturating_add(section.height());
        if section.region().is_some() {
            y = y.saturating_add(1);
        }
    }
    let content_height = y;
    let scroll = scroll.min(content_height.saturating_sub(viewport.height));
    ScreenLayout {
        viewport,
        scroll,
        content_height,
        sections,
    }
}

impl ScreenLayout {
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn content_height(&self) -> u16 {
        self.content_height
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport.height)
    }

    pub fn sections(&self) -> &[(Section, Rect)] {
        &self.sections
    }

    fn section(&self, section: Section) -> Option<Rect> {
        self.sections
            .iter()
            .find(|(s, _)| *s == section)
            .map(|(_, r)| *r)
    }

    /// Rect of a walkthrough region in content coordinates.
    pub fn content_rect(&self, region: &RegionId) -> Option<Rect> {
        self.sections
            .iter()
            .find(|(s, _)| s.region() == Some(region.as_str()))
            .map(|(_, r)| *r)
    }

    fn to_viewport(&self, rect: Rect) -> Option<Rect> {
        let top = self.scroll;
        let bottom = self.scroll.saturating_add(self.viewport.height);
        if rect.bottom() <= top || rect.y >= bottom {
            return None;
        }
        let y = rect.y.max(top);
        let visible = Rect::new(rect.x, y, rect.width, rect.bottom().min(bottom) - y);
        Some(Rect::new(
            self.viewport.x + visible.x,
            self.viewport.y + (visible.y - top),
            visible.width,
            visible.height,
        ))
    }

    /// On-screen part of a walkthrough region; `None` when scrolled out.
    pub fn visible_rect(&self, region: &RegionId) -> Option<Rect> {
        self.to_viewport(self.content_rect(region)?)
    }

    pub fn start_button_rect(&self) -> Option<Rect> {
        self.to_viewport(self.section(Section::StartButton)?)
    }

    /// Scroll offset that brings `region` fully into view, moving as
    /// little as possible. Regions taller than the viewport align to
    /// their top row.
    pub fn scroll_to_reveal(&self, region: &RegionId) -> u16 {
        let Some(rect) = self.content_rect(region) else {
            return self.scroll;
        };
        let height = self.viewport.height;
        let scroll = if rect.y < self.scroll || rect.height >= height {
            rect.y
        } else if rect.bottom() > self.scroll.saturating_add(height) {
            rect.bottom() - height
        } else {
            self.scroll
        };
        scroll.min(self.max_scroll())
    }

    /// Draw the whole screen, then copy the visible rows into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let _span = tracing::trace_span!(
            "screen",
            scroll = self.scroll,
            content_height = self.content_height
        )
        .entered();
        let mut content = Frame::new(self.viewport.width, self.content_height);
        Block::new()
            .style(theme::page())
            .render(content.area(), &mut content);
        for &(section, rect) in &self.sections {
            render_section(section, rect, &mut content);
        }

        for row in 0..self.viewport.height {
            let src_y = self.scroll.saturating_add(row);
            if src_y >= self.content_height {
                break;
            }
            for col in 0..self.viewport.width {
                if let Some(cell) = content.buffer.get(col, src_y) {
                    frame
                        .buffer
                        .set(self.viewport.x + col, self.viewport.y + row, *cell);
                }
            }
        }
        if let Some(button) = self.start_button_rect() {
            frame.register_hit(button, START_TOUR, HitRegion::Button, 0);
        }
    }
}

fn render_section(section: Section, area: Rect, frame: &mut Frame) {
    match section {
        Section::Navbar => render_navbar(area, frame),
        Section::Hero => Banner::new(HERO_IMAGE)
            .overlay(theme::hero_overlay())
            .title(HERO_TITLE)
            .title_style(theme::hero_title())
            .render(area, frame),
        Section::Welcome => Paragraph::new(WELCOME_TEXT)
            .style(theme::body())
            .alignment(Alignment::Center)
            .render(middle_row(area), frame),
        Section::StartButton => Button::new(START_LABEL, START_TOUR)
            .style(theme::start_button())
            .render(area, frame),
        Section::Footer => {
            Block::new().style(theme::brand_bar()).render(area, frame);
            Paragraph::new(FOOTER_TEXT)
                .style(theme::brand_bar())
                .alignment(Alignment::Center)
                .render(middle_row(area), frame);
        }
    }
}

fn render_navbar(area: Rect, frame: &mut Frame) {
    Block::new().style(theme::brand_bar()).render(area, frame);
    let row = middle_row(area);
    let padded = Rect::new(
        row.x.saturating_add(2),
        row.y,
        row.width.saturating_sub(4),
        row.height,
    );
    let links = NAV_LINKS.join("  ");
    Paragraph::new(&links)
        .style(theme::brand_bar())
        .alignment(Alignment::Right)
        .render(padded, frame);
    let logo = Rect::new(
        padded.x,
        padded.y,
        (LOGO.len() as u16).min(padded.width),
        padded.height,
    );
    Paragraph::new(LOGO).style(theme::logo()).render(logo, frame);
}

fn middle_row(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, area.height.min(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn region(id: &str) -> RegionId {
        RegionId::new(id)
    }

    #[test]
    fn sections_stack_with_gaps_after_targets() {
        let layout = compose(Rect::from_size(80, 40), 0);
        let rects: Vec<(Section, u16, u16)> = layout
            .sections()
            .iter()
            .map(|(s, r)| (*s, r.y, r.height))
            .collect();
        assert_eq!(
            rects,
            [
                (Section::Navbar, 0, 3),
                (Section::Hero, 4, 8),
                (Section::Welcome, 13, 3),
                (Section::StartButton, 17, 3),
                (Section::Footer, 20, 3),
            ]
        );
        assert_eq!(layout.content_height(), 24);
        assert_eq!(layout.max_scroll(), 0);
    }

    #[test]
    fn start_button_is_centered() {
        let layout = compose(Rect::from_size(80, 24), 0);
        assert_eq!(layout.start_button_rect(), Some(Rect::new(33, 17, 14, 3)));
    }

    #[test]
    fn renders_every_section() {
        let layout = compose(Rect::from_size(80, 24), 0);
        let mut frame = Frame::new(80, 24);
        layout.render(&mut frame);
        for text in [
            LOGO,
            "Home",
            "About",
            HERO_TITLE,
            WELCOME_TEXT,
            START_LABEL,
            FOOTER_TEXT,
            "picsum.photos/800/400",
        ] {
            assert!(frame.buffer.contains_text(text), "missing {text}");
        }
        let (x, y) = frame.buffer.find_text(START_LABEL).unwrap();
        assert_eq!(frame.hit_test(x, y).map(|h| h.0), Some(START_TOUR));
        assert_eq!(frame.buffer.get(0, 0).map(|c| c.bg), Some(theme::bg::BRAND));
    }

    #[test]
    fn scroll_is_clamped_and_shifts_regions() {
        let layout = compose(Rect::from_size(80, 10), 99);
        assert_eq!(layout.scroll(), 14);
        assert_eq!(layout.visible_rect(&region(NAVBAR)), None);
        assert_eq!(
            layout.visible_rect(&region(FOOTER)),
            Some(Rect::new(0, 6, 80, 3))
        );
        assert_eq!(layout.visible_rect(&region(HERO)), None);
    }

    #[test]
    fn partially_visible_region_is_clipped() {
        let layout = compose(Rect::from_size(80, 10), 6);
        assert_eq!(
            layout.visible_rect(&region(HERO)),
            Some(Rect::new(0, 0, 80, 6))
        );
    }

    #[test]
    fn reveal_moves_minimally() {
        let layout = compose(Rect::from_size(80, 10), 0);
        assert_eq!(layout.scroll_to_reveal(&region(NAVBAR)), 0);
        assert_eq!(layout.scroll_to_reveal(&region(WELCOME)), 6);
        assert_eq!(layout.scroll_to_reveal(&region(FOOTER)), 13);
        let scrolled = compose(Rect::from_size(80, 10), 14);
        assert_eq!(scrolled.scroll_to_reveal(&region(HERO)), 4);
        assert_eq!(scrolled.scroll_to_reveal(&region("sidebar")), 14);
    }

    #[test]
    fn scrolled_render_shows_lower_content() {
        let layout = compose(Rect::from_size(80, 10), 14);
        let mut frame = Frame::new(80, 10);
        layout.render(&mut frame);
        assert!(frame.buffer.contains_text(FOOTER_TEXT));
        assert!(!frame.buffer.contains_text("About"));
        let (x, y) = frame.buffer.find_text(START_LABEL).unwrap();
        assert_eq!(y, 4);
        assert_eq!(frame.hit_test(x, y).map(|h| h.0), Some(START_TOUR));
    }

    proptest! {
        #[test]
        fn regions_clip_to_viewport_and_reveal_fully(
            w in 1u16..200, h in 1u16..60, scroll in 0u16..40,
        ) {
            let viewport = Rect::from_size(w, h);
            let layout = compose(viewport, scroll);
            for id in [NAVBAR, HERO, WELCOME, FOOTER] {
                if let Some(rect) = layout.visible_rect(&region(id)) {
                    prop_assert!(rect.right() <= viewport.right());
                    prop_assert!(rect.bottom() <= viewport.bottom());
                }
                let full = layout.content_rect(&region(id)).unwrap();
                if full.height <= h {
                    let revealed = compose(viewport, layout.scroll_to_reveal(&region(id)));
                    let shown = revealed.visible_rect(&region(id));
                    prop_assert_eq!(shown.map(|r| r.height), Some(full.height), "{}", id);
                }
            }
        }
    }
}
