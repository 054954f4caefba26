#![forbid(unsafe_code)]

//! Headless program driver for tests.
//!
//! [`ProgramSimulator`] runs a [`Model`] through the same command semantics
//! as the terminal loop without touching a terminal: events are injected by
//! the test, frames are rendered on demand, and `Cmd::Log` lines are kept.
//! Like the terminal loop, quitting runs `Model::on_shutdown`.

use std::time::Duration;

use waypoint_core::event::{Event, KeyCode, KeyEvent, MouseEvent};
use waypoint_render::buffer::Buffer;
use waypoint_render::frame::Frame;

use crate::program::{Cmd, Model};

pub struct ProgramSimulator<M: Model> {
    model: M,
    width: u16,
    height: u16,
    running: bool,
    shut_down: bool,
    tick_rate: Option<Duration>,
    logs: Vec<String>,
    last_frame: Option<Frame>,
    frames_rendered: usize,
}

impl<M: Model> ProgramSimulator<M> {
    /// A simulator with an 80x24 viewport.
    pub fn new(model: M) -> Self {
        Self::with_size(model, 80, 24)
    }

    pub fn with_size(model: M, width: u16, height: u16) -> Self {
        Self {
            model,
            width,
            height,
            running: true,
            shut_down: false,
            tick_rate: None,
            logs: Vec::new(),
            last_frame: None,
            frames_rendered: 0,
        }
    }

    /// Run `Model::init`, then render the first frame.
    pub fn init(&mut self) {
        let cmd = self.model.init();
        self.execute(cmd);
        self.capture_frame();
    }

    /// Deliver a terminal event, then re-render.
    pub fn inject_event(&mut self, event: Event) {
        if !self.running {
            return;
        }
        if let Event::Resize { width, height } = event {
            self.width = width;
            self.height = height;
        }
        let cmd = self.model.update(M::Message::from(event));
        self.execute(cmd);
        self.capture_frame();
    }

    pub fn inject_events(&mut self, events: impl IntoIterator<Item = Event>) {
        for event in events {
            self.inject_event(event);
        }
    }

    pub fn press(&mut self, code: KeyCode) {
        self.inject_event(Event::Key(KeyEvent::new(code)));
    }

    pub fn click(&mut self, x: u16, y: u16) {
        self.inject_event(Event::Mouse(MouseEvent::click(x, y)));
    }

    /// Deliver `n` ticks.
    pub fn tick(&mut self, n: usize) {
        for _ in 0..n {
            self.inject_event(Event::Tick);
        }
    }

    /// Send a message directly, bypassing event conversion.
    pub fn send(&mut self, msg: M::Message) {
        if !self.running {
            return;
        }
        let cmd = self.model.update(msg);
        self.execute(cmd);
        self.capture_frame();
    }

    /// Render the current state into a fresh frame and keep it.
    pub fn capture_frame(&mut self) -> &Frame {
        let mut frame = Frame::new(self.width, self.height);
        self.model.view(&mut frame);
        self.frames_rendered += 1;
        self.last_frame.insert(frame)
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }

    pub fn last_buffer(&self) -> Option<&Buffer> {
        self.last_frame.as_ref().map(|f| &f.buffer)
    }

    /// Stop accepting input and run `Model::on_shutdown` once.
    pub fn shutdown(&mut self) {
        self.running = false;
        if !self.shut_down {
            self.shut_down = true;
            self.model.on_shutdown();
        }
    }

    fn execute(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.shutdown(),
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.execute(cmd);
            }
            Cmd::Batch(cmds) | Cmd::Sequence(cmds) => {
                for c in cmds {
                    self.execute(c);
                    if !self.running {
                        break;
                    }
                }
            }
            Cmd::Tick(rate) => self.tick_rate = Some(rate),
            Cmd::Log(line) => self.logs.push(line),
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn logs(&self) -> &[String] {
        &self.logs
    }

    pub fn tick_rate(&self) -> Option<Duration> {
        self.tick_rate
    }

    pub fn frames_rendered(&self) -> usize {
        self.frames_rendered
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }
}
