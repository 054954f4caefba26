#![forbid(unsafe_code)]

//! Elm-style runtime for terminal applications.
//!
//! A [`Model`] owns application state. The runtime converts terminal input
//! into messages, feeds them to [`Model::update`], executes the returned
//! [`Cmd`], and redraws with [`Model::view`] whenever something changed.
//!
//! # Example
//!
//! ```
//! use waypoint_core::event::Event;
//! use waypoint_render::frame::Frame;
//! use waypoint_runtime::program::{Cmd, Model};
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             _ => Msg::Increment,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Increment => {
//!                 self.count += 1;
//!                 Cmd::none()
//!             }
//!             Msg::Quit => Cmd::quit(),
//!         }
//!     }
//!
//!     fn view(&self, _frame: &mut Frame) {}
//! }
//! ```

use std::time::Duration;

use waypoint_core::event::Event;
use waypoint_render::frame::Frame;

/// Application state and behavior.
pub trait Model: Sized {
    /// Messages that drive state changes. Terminal events convert into them.
    type Message: From<Event> + Send + 'static;

    /// Called once before the first frame.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// The state transition function.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state.
    fn view(&self, frame: &mut Frame);

    /// Called once after the loop ends, before the terminal is restored.
    fn on_shutdown(&mut self) {}
}

/// Side effects requested by `init` and `update`.
#[derive(Debug)]
pub enum Cmd<M> {
    None,
    Quit,
    /// Run each command in order; a `Quit` stops the rest.
    Batch(Vec<Cmd<M>>),
    Sequence(Vec<Cmd<M>>),
    /// Feed a message straight back into `update`.
    Msg(M),
    /// Deliver [`Event::Tick`] at this interval until changed.
    Tick(Duration),
    /// A diagnostic line. The terminal loop routes it to `tracing`; the
    /// simulator records it.
    Log(String),
}

impl<M> Cmd<M> {
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    #[inline]
    pub fn quit() -> Self {
        Self::Quit
    }

    #[inline]
    pub fn msg(m: M) -> Self {
        Self::Msg(m)
    }

    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    #[inline]
    pub fn tick(duration: Duration) -> Self {
        Self::Tick(duration)
    }

    pub fn batch(cmds: Vec<Self>) -> Self {
        Self::collapse(cmds, Self::Batch)
    }

    pub fn sequence(cmds: Vec<Self>) -> Self {
        Self::collapse(cmds, Self::Sequence)
    }

    fn collapse(mut cmds: Vec<Self>, wrap: fn(Vec<Self>) -> Self) -> Self {
        cmds.retain(|c| !matches!(c, Self::None));
        match cmds.len() {
            0 => Self::None,
            1 => cmds.pop().unwrap_or(Self::None),
            _ => wrap(cmds),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl<M> Default for Cmd<M> {
    fn default() -> Self {
        Self::None
    }
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct ProgramConfig {
    pub alternate_screen: bool,
    pub mouse: bool,
    /// Upper bound on how long the loop waits for input when no tick is due.
    pub poll_timeout: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alternate_screen: false,
            mouse: false,
            poll_timeout: Duration::from_millis(100),
        }
    }
}

impl ProgramConfig {
    pub fn fullscreen() -> Self {
        Self {
            alternate_screen: true,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_mouse(mut self) -> Self {
        self.mouse = true;
        self
    }
}

#[cfg(feature = "crossterm-compat")]
pub use terminal::Program;

#[cfg(feature = "crossterm-compat")]
mod terminal {
    use std::io::{self, Stdout};
    use std::time::{Duration, Instant};

    use waypoint_core::event::Event;
    use waypoint_core::terminal_session::{SessionOptions, TerminalSession};
    use waypoint_render::frame::Frame;
    use waypoint_render::presenter::Presenter;

    use super::{Cmd, Model, ProgramConfig};

    /// The terminal update/view loop.
    pub struct Program<M: Model> {
        model: M,
        session: TerminalSession,
        presenter: Presenter<Stdout>,
        poll_timeout: Duration,
        running: bool,
        tick_rate: Option<Duration>,
        last_tick: Instant,
        dirty: bool,
        size: (u16, u16),
        prev_frame: Option<Frame>,
    }

    impl<M: Model> Program<M> {
        pub fn new(model: M) -> io::Result<Self> {
            Self::with_config(model, ProgramConfig::default())
        }

        pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
            let session = TerminalSession::new(SessionOptions {
                alternate_screen: config.alternate_screen,
                mouse_capture: config.mouse,
            })?;
            let size = session.size()?;
            Ok(Self {
                model,
                session,
                presenter: Presenter::new(io::stdout()),
                poll_timeout: config.poll_timeout,
                running: true,
                tick_rate: None,
                last_tick: Instant::now(),
                dirty: true,
                size,
                prev_frame: None,
            })
        }

        /// Run until the model returns [`Cmd::Quit`].
        pub fn run(&mut self) -> io::Result<()> {
            let cmd = self.model.init();
            self.execute_cmd(cmd)?;
            self.render_frame()?;

            while self.running {
                if self.session.poll_event(self.effective_timeout())? {
                    if let Some(event) = self.session.read_event()? {
                        self.handle_event(event)?;
                    }
                }
                if self.running && self.should_tick() {
                    self.dispatch(Event::Tick)?;
                }
                if self.dirty {
                    self.render_frame()?;
                }
            }

            self.model.on_shutdown();
            tracing::info!("program loop finished");
            Ok(())
        }

        fn handle_event(&mut self, event: Event) -> io::Result<()> {
            if let Event::Resize { width, height } = event {
                self.size = (width, height);
                self.prev_frame = None;
                self.presenter.clear_screen()?;
            }
            self.dispatch(event)
        }

        fn dispatch(&mut self, event: Event) -> io::Result<()> {
            let cmd = self.model.update(M::Message::from(event));
            self.dirty = true;
            self.execute_cmd(cmd)
        }

        fn execute_cmd(&mut self, cmd: Cmd<M::Message>) -> io::Result<()> {
            match cmd {
                Cmd::None => {}
                Cmd::Quit => self.running = false,
                Cmd::Msg(m) => {
                    let cmd = self.model.update(m);
                    self.dirty = true;
                    self.execute_cmd(cmd)?;
                }
                Cmd::Batch(cmds) | Cmd::Sequence(cmds) => {
                    for c in cmds {
                        self.execute_cmd(c)?;
                        if !self.running {
                            break;
                        }
                    }
                }
                Cmd::Tick(duration) => {
                    self.tick_rate = Some(duration);
                    self.last_tick = Instant::now();
                }
                Cmd::Log(text) => tracing::info!(target: "waypoint::log", "{text}"),
            }
            Ok(())
        }

        fn render_frame(&mut self) -> io::Result<()> {
            let (width, height) = self.size;
            let mut frame = Frame::new(width, height);
            self.model.view(&mut frame);
            let prev = self.prev_frame.as_ref().map(|f| &f.buffer);
            self.presenter.present(&frame.buffer, prev)?;
            self.prev_frame = Some(frame);
            self.dirty = false;
            Ok(())
        }

        fn effective_timeout(&self) -> Duration {
            match self.tick_rate {
                Some(rate) => rate.saturating_sub(self.last_tick.elapsed()),
                None => self.poll_timeout,
            }
        }

        fn should_tick(&mut self) -> bool {
            match self.tick_rate {
                Some(rate) if self.last_tick.elapsed() >= rate => {
                    self.last_tick = Instant::now();
                    true
                }
                _ => false,
            }
        }

        pub fn model(&self) -> &M {
            &self.model
        }

        pub fn is_running(&self) -> bool {
            self.running
        }
    }
}
