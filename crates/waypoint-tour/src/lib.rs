#![forbid(unsafe_code)]

//! Guided walkthroughs for Waypoint screens.
//!
//! # Role in Waypoint
//! A screen registers [`Step`]s against named regions, then drives a
//! [`Walkthrough`] with start/next/stop. The engine announces every
//! transition on its [`TourEvents`] table (`start`, `stop`, `stepChange`).
//! Rendering is separate: [`Overlay`] dims everything outside the active
//! region, and a [`TooltipRenderer`] draws the step text and buttons next
//! to it. Presentation knobs live in [`TourConfig`].
//!
//! ```
//! use waypoint_tour::{Walkthrough, StartOutcome};
//!
//! let mut tour = Walkthrough::new();
//! tour.register_step("navbar", 1, "This is our navigation bar", "navbar")?;
//! tour.register_step("footer", 4, "Our footer section", "footer")?;
//!
//! assert_eq!(tour.start()?, StartOutcome::Started);
//! assert_eq!(tour.current_step().map(|s| s.name.as_str()), Some("navbar"));
//! tour.next_step();
//! tour.next_step();
//! assert!(!tour.is_running());
//! # Ok::<(), waypoint_tour::TourError>(())
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod overlay;
pub mod registry;
pub mod step;
pub mod tooltip;

pub use config::{Labels, OverlayMode, TooltipStyle, TourConfig};
pub use engine::{StartOutcome, TourControls, Walkthrough};
pub use error::{ConfigError, TourError};
pub use events::{EventKind, ListenerId, StopReason, Subscription, TourEvent, TourEvents};
pub use overlay::{Overlay, Spotlight, place_tooltip, tooltip_max_width};
pub use registry::StepRegistry;
pub use step::{RegionId, Step, StepSnapshot};
pub use tooltip::{DefaultTooltip, TooltipAction, TooltipProps, TooltipRenderer};
