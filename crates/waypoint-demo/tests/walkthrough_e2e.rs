//! Drives the home screen through the headless simulator the way a user
//! would: clicks on what is drawn, keys, ticks, resizes.

use std::cell::RefCell;
use std::rc::Rc;

use tracing_test::traced_test;
use waypoint_core::event::{Event, KeyCode};
use waypoint_core::geometry::Rect;
use waypoint_render::frame::{Frame, HitId};
use waypoint_runtime::ProgramSimulator;
use waypoint_tour::tooltip::NEXT_BUTTON;
use waypoint_tour::{EventKind, Subscription, TourConfig, TourEvent, TourEvents};

use waypoint_demo::AppContent;
use waypoint_demo::app::TICK_INTERVAL;
use waypoint_demo::screen::{START_LABEL, START_TOUR};

type Journal = Rc<RefCell<Vec<String>>>;

fn record(events: &TourEvents) -> (Journal, Vec<Subscription>) {
    let journal: Journal = Rc::default();
    let subs = EventKind::ALL
        .into_iter()
        .map(|kind| {
            let journal = Rc::clone(&journal);
            events.subscribe(kind, move |event| {
                journal.borrow_mut().push(match event {
                    TourEvent::Start => "start".to_string(),
                    TourEvent::Stop { .. } => "stop".to_string(),
                    TourEvent::StepChange(step) => format!("stepChange:{}", step.name),
                });
            })
        })
        .collect();
    (journal, subs)
}

fn find_hit(frame: &Frame, id: HitId) -> Option<(u16, u16)> {
    (0..frame.height())
        .flat_map(|y| (0..frame.width()).map(move |x| (x, y)))
        .find(|&(x, y)| frame.hit_test(x, y).map(|h| h.0) == Some(id))
}

fn click_hit(sim: &mut ProgramSimulator<AppContent>, id: HitId) {
    let frame = sim.last_frame().expect("a rendered frame");
    let (x, y) = find_hit(frame, id).expect("hit region on screen");
    sim.click(x, y);
}

fn simulator(width: u16, height: u16) -> ProgramSimulator<AppContent> {
    let app = AppContent::new(TourConfig::default()).unwrap();
    let mut sim = ProgramSimulator::with_size(app, width, height);
    sim.init();
    sim
}

#[test]
#[traced_test]
fn full_tour_by_mouse() {
    let mut sim = simulator(80, 24);
    let (journal, _subs) = record(sim.model().tour().events());

    let (x, y) = sim
        .last_buffer()
        .unwrap()
        .find_text(START_LABEL)
        .expect("start button drawn");
    sim.click(x, y);
    assert_eq!(*journal.borrow(), ["start", "stepChange:navbar"]);

    for _ in 0..3 {
        click_hit(&mut sim, NEXT_BUTTON);
    }
    assert_eq!(
        journal.borrow()[2..],
        ["stepChange:hero", "stepChange:welcome", "stepChange:footer"]
    );
    assert!(sim.model().tour().is_last_step());

    click_hit(&mut sim, NEXT_BUTTON);
    assert_eq!(journal.borrow().last().map(String::as_str), Some("stop"));
    assert_eq!(journal.borrow().iter().filter(|e| *e == "start").count(), 1);
    assert_eq!(journal.borrow().iter().filter(|e| *e == "stop").count(), 1);
    assert!(!sim.model().tour().is_running());

    assert!(logs_contain("Tour started"));
    assert!(logs_contain("Step changed"));
    assert!(logs_contain("Next button pressed"));
    assert!(logs_contain("Tour stopped"));
}

#[test]
fn mount_and_unmount_balance_listeners() {
    let mut sim = simulator(80, 24);
    let events = sim.model().tour().events().clone();
    for kind in EventKind::ALL {
        assert_eq!(events.listener_count(kind), 1, "{kind}");
    }
    sim.shutdown();
    assert_eq!(events.total_listeners(), 0);
    assert!(!sim.model().is_mounted());
}

#[test]
fn start_while_running_changes_nothing() {
    let mut sim = simulator(80, 24);
    let (journal, _subs) = record(sim.model().tour().events());
    sim.press(KeyCode::Char('s'));
    sim.press(KeyCode::Enter);
    sim.press(KeyCode::Char('s'));
    sim.send(waypoint_demo::Msg::StartTour);
    assert_eq!(
        *journal.borrow(),
        ["start", "stepChange:navbar", "stepChange:hero"]
    );
    assert_eq!(sim.model().tour().events().total_listeners(), 6);
}

#[test]
fn start_button_is_covered_while_touring() {
    let mut sim = simulator(80, 24);
    sim.press(KeyCode::Char('s'));
    let frame = sim.last_frame().unwrap();
    assert_eq!(find_hit(frame, START_TOUR), None);
}

#[test]
fn tooltip_shows_step_text_and_next() {
    let mut sim = simulator(80, 24);
    sim.press(KeyCode::Char('s'));
    sim.press(KeyCode::Char('n'));
    sim.press(KeyCode::Right);
    let buffer = sim.last_buffer().unwrap();
    assert!(buffer.contains_text("Welcome to the app!"));
    assert!(buffer.contains_text("3 of 4"));
    let (x, y) = buffer.find_text("Next").unwrap();
    assert_eq!(
        sim.last_frame().unwrap().hit_test(x, y).map(|h| h.0),
        Some(NEXT_BUTTON)
    );
}

#[test]
fn escape_dismisses_and_clears_overlay() {
    let mut sim = simulator(80, 24);
    sim.press(KeyCode::Char('s'));
    sim.press(KeyCode::Escape);
    assert!(!sim.model().tour().is_running());
    assert!(sim.model().spotlight().current().is_none());
    assert!(!sim.last_buffer().unwrap().contains_text("1 of 4"));
}

#[test]
fn spotlight_settles_on_target_after_ticks() {
    let mut sim = simulator(80, 24);
    sim.press(KeyCode::Char('s'));
    sim.press(KeyCode::Enter);
    assert!(sim.model().spotlight().is_animating());

    let duration = sim.model().config().animation_duration();
    let ticks = (duration.as_millis() / TICK_INTERVAL.as_millis()) as usize + 1;
    sim.tick(ticks);
    assert!(!sim.model().spotlight().is_animating());
    assert_eq!(
        sim.model().spotlight().current(),
        Some(Rect::new(0, 4, 80, 8))
    );
}

#[test]
fn short_viewport_scrolls_to_each_step() {
    let mut sim = simulator(80, 12);
    sim.press(KeyCode::Char('s'));
    for _ in 0..3 {
        sim.press(KeyCode::Enter);
    }
    let layout = sim.model().layout();
    let footer = layout
        .visible_rect(&waypoint_tour::RegionId::new("footer"))
        .expect("footer scrolled into view");
    assert_eq!(footer.height, 3);
    assert!(sim.model().scroll() > 0);
    assert!(sim.last_buffer().unwrap().contains_text("Our footer section"));

    sim.press(KeyCode::Left);
    sim.press(KeyCode::Left);
    sim.press(KeyCode::Left);
    assert_eq!(sim.model().scroll(), 0);
}

#[test]
fn resize_keeps_tooltip_on_screen() {
    let mut sim = simulator(80, 24);
    sim.press(KeyCode::Char('s'));
    sim.inject_event(Event::Resize {
        width: 40,
        height: 10,
    });
    let frame = sim.last_frame().unwrap();
    let (x, y) = find_hit(frame, NEXT_BUTTON).expect("next button visible");
    assert!(x < 40 && y < 10);
    assert!(sim.model().spotlight().current().is_some());
}

#[test]
fn quit_stops_the_program() {
    let mut sim = simulator(80, 24);
    sim.press(KeyCode::Char('q'));
    assert!(!sim.is_running());
}

fn settle(sim: &mut ProgramSimulator<AppContent>) {
    let duration = sim.model().config().animation_duration();
    sim.tick((duration.as_millis() / TICK_INTERVAL.as_millis()) as usize + 1);
}

/// Every cell of the active region matches an undimmed render of the screen.
fn assert_region_lit(sim: &ProgramSimulator<AppContent>) {
    let model = sim.model();
    let step = model.tour().snapshot().expect("tour running");
    let layout = model.layout();
    let target = layout
        .visible_rect(&step.region)
        .expect("active region on screen");
    assert_eq!(model.spotlight().current(), Some(target), "{}", step.name);

    let (width, height) = sim.size();
    let mut plain = Frame::new(width, height);
    layout.render(&mut plain);
    let frame = sim.last_frame().unwrap();
    for y in target.y..target.bottom() {
        for x in target.x..target.right() {
            assert_eq!(
                frame.buffer.get(x, y),
                plain.buffer.get(x, y),
                "{} dimmed at ({x}, {y}) in {width}x{height}",
                step.name
            );
        }
    }
}

#[test]
fn highlighted_region_is_never_dimmed_at_any_size() {
    for (width, height) in [(80, 24), (120, 30), (60, 26), (200, 50)] {
        for autostart in [false, true] {
            let app = AppContent::new(TourConfig::default())
                .unwrap()
                .with_autostart(autostart);
            let mut sim = ProgramSimulator::with_size(app, width, height);
            sim.init();
            if !autostart {
                sim.press(KeyCode::Char('s'));
            }
            settle(&mut sim);
            assert_region_lit(&sim);
            for _ in 0..3 {
                sim.press(KeyCode::Enter);
                settle(&mut sim);
                assert_region_lit(&sim);
            }
        }
    }
}

#[test]
fn tooltip_stays_inside_viewport_at_any_size() {
    for (width, height) in [(80, 24), (120, 30), (40, 12), (30, 10), (200, 50)] {
        let app = AppContent::new(TourConfig::default())
            .unwrap()
            .with_autostart(true);
        let mut sim = ProgramSimulator::with_size(app, width, height);
        sim.init();
        while sim.model().tour().is_running() {
            settle(&mut sim);
            let frame = sim.last_frame().unwrap();
            let (x, y) = find_hit(frame, NEXT_BUTTON).expect("next button visible");
            assert!(x < width && y < height, "{width}x{height}");
            click_hit(&mut sim, NEXT_BUTTON);
        }
    }
}
