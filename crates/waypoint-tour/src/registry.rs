#![forbid(unsafe_code)]

//! Step registry.
//!
//! Steps are kept in registration order. Traversal order is a stable sort by
//! `order`, so steps sharing an `order` value are visited in the order they
//! were registered, and gaps between values are irrelevant.

use crate::error::TourError;
use crate::step::Step;

#[derive(Debug, Clone, Default)]
pub struct StepRegistry {
    steps: Vec<Step>,
}

impl StepRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a step. Names must be unique; orders need not be.
    pub fn register(&mut self, step: Step) -> Result<(), TourError> {
        if self.contains(&step.name) {
            return Err(TourError::DuplicateStep(step.name));
        }
        if let Some(other) = self.steps.iter().find(|s| s.order == step.order) {
            tracing::warn!(
                step = %step.name,
                other = %other.name,
                order = step.order,
                "duplicate step order, falling back to registration sequence"
            );
        }
        tracing::debug!(step = %step.name, order = step.order, region = %step.region, "step registered");
        self.steps.push(step);
        Ok(())
    }

    pub fn unregister(&mut self, name: &str) -> Result<Step, TourError> {
        let idx = self
            .steps
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| TourError::UnknownStep(name.to_string()))?;
        tracing::debug!(step = name, "step unregistered");
        Ok(self.steps.remove(idx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.steps.iter().any(|s| s.name == name)
    }

    pub fn get(&self, name: &str) -> Option<&Step> {
        self.steps.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Steps in traversal order.
    pub fn ordered(&self) -> Vec<&Step> {
        let mut ordered: Vec<&Step> = self.steps.iter().collect();
        ordered.sort_by_key(|s| s.order);
        ordered
    }

    /// Position of `name` in traversal order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.ordered().iter().position(|s| s.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(reg: &StepRegistry) -> Vec<&str> {
        reg.ordered().into_iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn orders_ascending_regardless_of_registration() {
        let mut reg = StepRegistry::new();
        reg.register(Step::new("footer", 4, "f", "footer")).unwrap();
        reg.register(Step::new("navbar", 1, "n", "navbar")).unwrap();
        reg.register(Step::new("hero", 2, "h", "hero")).unwrap();
        assert_eq!(names(&reg), ["navbar", "hero", "footer"]);
        assert_eq!(reg.position("footer"), Some(2));
    }

    #[test]
    fn ties_keep_registration_sequence() {
        let mut reg = StepRegistry::new();
        reg.register(Step::new("r", 5, "", "b")).unwrap();
        reg.register(Step::new("r", 5, "", "a")).unwrap();
        reg.register(Step::new("r", -1, "", "c")).unwrap();
        assert_eq!(names(&reg), ["c", "b", "a"]);
    }

    #[test]
    #[tracing_test::traced_test]
    fn shared_order_is_warned_about() {
        let mut reg = StepRegistry::new();
        reg.register(Step::new("hero", 2, "", "hero")).unwrap();
        reg.register(Step::new("banner", 2, "", "banner")).unwrap();
        assert!(logs_contain("duplicate step order"));
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut reg = StepRegistry::new();
        reg.register(Step::new("navbar", 1, "x", "navbar")).unwrap();
        assert_eq!(
            reg.register(Step::new("hero", 2, "y", "navbar")),
            Err(TourError::DuplicateStep("navbar".into()))
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn unregister_unknown_fails() {
        let mut reg = StepRegistry::new();
        assert_eq!(
            reg.unregister("nope"),
            Err(TourError::UnknownStep("nope".into()))
        );
        reg.register(Step::new("hero", 2, "y", "hero")).unwrap();
        assert_eq!(reg.unregister("hero").map(|s| s.order), Ok(2));
        assert!(reg.is_empty());
    }
}
