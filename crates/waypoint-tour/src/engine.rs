#![forbid(unsafe_code)]

//! The walkthrough state machine.
//!
//! `idle -> running` on [`Walkthrough::start`], `running -> running` on each
//! move between steps, `running -> idle` when advancing past the last step
//! or on [`Walkthrough::stop`]. Every transition is announced through the
//! engine's [`TourEvents`]: `start` then `stepChange` when a tour begins,
//! `stepChange` on each move, `stop` when it ends.

use crate::error::TourError;
use crate::events::{StopReason, TourEvent, TourEvents};
use crate::registry::StepRegistry;
use crate::step::{RegionId, Step, StepSnapshot};

/// Result of a start request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A tour was already running; nothing changed and nothing was emitted.
    AlreadyRunning,
}

/// The controls a tooltip may drive.
pub trait TourControls {
    /// Advance, or finish the tour on the last step.
    fn next(&mut self);
    fn prev(&mut self);
    fn stop(&mut self);
}

#[derive(Debug, Default)]
pub struct Walkthrough {
    registry: StepRegistry,
    events: TourEvents,
    running: bool,
    current: Option<String>,
}

impl Walkthrough {
    pub fn new() -> Self {
        Self::default()
    }

    /// An engine that announces on an existing listener table.
    pub fn with_events(events: TourEvents) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }

    /// The listener table. Clone it to subscribe from elsewhere.
    pub fn events(&self) -> &TourEvents {
        &self.events
    }

    pub fn register_step(
        &mut self,
        region: impl Into<RegionId>,
        order: i32,
        text: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<(), TourError> {
        self.registry.register(Step::new(region, order, text, name))
    }

    pub fn register(&mut self, step: Step) -> Result<(), TourError> {
        self.registry.register(step)
    }

    /// Remove a step. The step currently shown cannot be removed.
    pub fn unregister_step(&mut self, name: &str) -> Result<Step, TourError> {
        if self.running && self.current.as_deref() == Some(name) {
            return Err(TourError::StepActive(name.to_string()));
        }
        self.registry.unregister(name)
    }

    /// Registered steps in traversal order.
    pub fn steps(&self) -> Vec<&Step> {
        self.registry.ordered()
    }

    /// Begin at the lowest-order step.
    pub fn start(&mut self) -> Result<StartOutcome, TourError> {
        if self.running {
            tracing::debug!("start ignored, tour already running");
            return Ok(StartOutcome::AlreadyRunning);
        }
        let first = self
            .registry
            .ordered()
            .first()
            .map(|s| s.name.clone())
            .ok_or(TourError::NoSteps)?;
        self.begin(first);
        Ok(StartOutcome::Started)
    }

    /// Begin at the named step.
    pub fn start_from(&mut self, name: &str) -> Result<StartOutcome, TourError> {
        if self.running {
            tracing::debug!(step = name, "start ignored, tour already running");
            return Ok(StartOutcome::AlreadyRunning);
        }
        if !self.registry.contains(name) {
            return Err(TourError::UnknownStep(name.to_string()));
        }
        self.begin(name.to_string());
        Ok(StartOutcome::Started)
    }

    fn begin(&mut self, step: String) {
        self.running = true;
        self.current = Some(step);
        tracing::debug!(total = self.registry.len(), "tour running");
        self.events.emit(&TourEvent::Start);
        self.announce_step();
    }

    /// Move to the next step, or finish with [`StopReason::Completed`] on the
    /// last one. Returns `false` when idle.
    pub fn next_step(&mut self) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        let ordered = self.registry.ordered();
        match ordered.get(index + 1).map(|s| s.name.clone()) {
            Some(next) => {
                self.current = Some(next);
                self.announce_step();
            }
            None => self.finish(StopReason::Completed),
        }
        true
    }

    /// Move back one step. Returns `false` when idle or on the first step.
    pub fn prev_step(&mut self) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        if index == 0 {
            return false;
        }
        self.current = self
            .registry
            .ordered()
            .get(index - 1)
            .map(|s| s.name.clone());
        self.announce_step();
        true
    }

    /// Jump to the `n`th step (1-based). Returns `Ok(false)` when idle or
    /// already there.
    pub fn go_to_nth(&mut self, n: usize) -> Result<bool, TourError> {
        let Some(index) = self.current_index() else {
            return Ok(false);
        };
        let total = self.registry.len();
        if n == 0 || n > total {
            return Err(TourError::StepOutOfRange {
                requested: n,
                total,
            });
        }
        if n - 1 == index {
            return Ok(false);
        }
        self.current = self.registry.ordered().get(n - 1).map(|s| s.name.clone());
        self.announce_step();
        Ok(true)
    }

    /// End the tour early. Returns `false` when idle.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.finish(StopReason::Dismissed);
        true
    }

    fn finish(&mut self, reason: StopReason) {
        self.running = false;
        self.current = None;
        tracing::debug!(?reason, "tour stopped");
        self.events.emit(&TourEvent::Stop { reason });
    }

    fn announce_step(&self) {
        if let Some(snapshot) = self.snapshot() {
            tracing::debug!(
                step = %snapshot.name,
                number = snapshot.number,
                total = snapshot.total,
                "step active"
            );
            self.events.emit(&TourEvent::StepChange(snapshot));
        }
    }

    fn current_index(&self) -> Option<usize> {
        if !self.running {
            return None;
        }
        self.registry.position(self.current.as_deref()?)
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn current_step(&self) -> Option<&Step> {
        if !self.running {
            return None;
        }
        self.registry.get(self.current.as_deref()?)
    }

    /// 1-based position of the current step.
    pub fn current_step_number(&self) -> Option<usize> {
        self.current_index().map(|i| i + 1)
    }

    pub fn total_steps(&self) -> usize {
        self.registry.len()
    }

    pub fn is_first_step(&self) -> bool {
        self.current_index() == Some(0)
    }

    pub fn is_last_step(&self) -> bool {
        self.current_index()
            .is_some_and(|i| i + 1 == self.registry.len())
    }

    /// Owned view of the current step.
    pub fn snapshot(&self) -> Option<StepSnapshot> {
        let index = self.current_index()?;
        let total = self.registry.len();
        self.registry
            .ordered()
            .get(index)
            .map(|step| StepSnapshot::of(step, index, total))
    }
}

impl TourControls for Walkthrough {
    fn next(&mut self) {
        self.next_step();
    }

    fn prev(&mut self) {
        self.prev_step();
    }

    fn stop(&mut self) {
        Walkthrough::stop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Walkthrough {
        let mut w = Walkthrough::new();
        w.register_step("hero", 2, "Hero", "hero").unwrap();
        w.register_step("navbar", 1, "Nav", "navbar").unwrap();
        w.register_step("footer", 4, "Foot", "footer").unwrap();
        w
    }

    #[test]
    fn start_with_no_steps_fails() {
        let mut w = Walkthrough::new();
        assert_eq!(w.start(), Err(TourError::NoSteps));
        assert!(!w.is_running());
    }

    #[test]
    fn start_begins_at_lowest_order() {
        let mut w = engine();
        assert_eq!(w.start(), Ok(StartOutcome::Started));
        assert_eq!(w.current_step().map(|s| s.name.as_str()), Some("navbar"));
        assert_eq!(w.current_step_number(), Some(1));
        assert!(w.is_first_step());
        assert_eq!(w.start(), Ok(StartOutcome::AlreadyRunning));
    }

    #[test]
    fn next_past_last_completes() {
        let mut w = engine();
        w.start().unwrap();
        assert!(w.next_step());
        assert!(w.next_step());
        assert!(w.is_last_step());
        assert!(w.next_step());
        assert!(!w.is_running());
        assert!(w.current_step().is_none());
        assert!(!w.next_step());
    }

    #[test]
    fn prev_stops_at_first() {
        let mut w = engine();
        w.start_from("footer").unwrap();
        assert!(w.prev_step());
        assert_eq!(w.snapshot().map(|s| s.name), Some("hero".to_string()));
        assert!(w.prev_step());
        assert!(!w.prev_step());
    }

    #[test]
    fn go_to_nth_validates_range() {
        let mut w = engine();
        assert_eq!(w.go_to_nth(2), Ok(false));
        w.start().unwrap();
        assert_eq!(
            w.go_to_nth(4),
            Err(TourError::StepOutOfRange {
                requested: 4,
                total: 3
            })
        );
        assert_eq!(w.go_to_nth(1), Ok(false));
        assert_eq!(w.go_to_nth(3), Ok(true));
        assert_eq!(w.current_step_number(), Some(3));
    }

    #[test]
    fn active_step_cannot_be_removed() {
        let mut w = engine();
        w.start().unwrap();
        assert_eq!(
            w.unregister_step("navbar"),
            Err(TourError::StepActive("navbar".into()))
        );
        assert!(w.unregister_step("hero").is_ok());
        assert_eq!(w.total_steps(), 2);
        w.next_step();
        assert_eq!(w.current_step().map(|s| s.name.as_str()), Some("footer"));
    }

    #[test]
    fn start_from_unknown_fails() {
        let mut w = engine();
        assert_eq!(
            w.start_from("sidebar"),
            Err(TourError::UnknownStep("sidebar".into()))
        );
    }

    #[test]
    fn controls_trait_forwards() {
        let mut w = engine();
        w.start().unwrap();
        let controls: &mut dyn TourControls = &mut w;
        controls.next();
        controls.stop();
        assert!(!w.is_running());
    }
}
