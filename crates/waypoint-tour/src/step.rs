#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a screen region a step highlights. The screen resolves it
/// to a rectangle each frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RegionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One stop of the walkthrough. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    /// Traversal position; lower goes first.
    pub order: i32,
    pub text: String,
    pub region: RegionId,
}

impl Step {
    pub fn new(
        region: impl Into<RegionId>,
        order: i32,
        text: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            order,
            text: text.into(),
            region: region.into(),
        }
    }
}

/// The active step as delivered with a `stepChange` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepSnapshot {
    pub name: String,
    pub order: i32,
    pub text: String,
    pub region: RegionId,
    /// 1-based position in the traversal.
    pub number: usize,
    pub total: usize,
}

impl StepSnapshot {
    pub(crate) fn of(step: &Step, index: usize, total: usize) -> Self {
        Self {
            name: step.name.clone(),
            order: step.order,
            text: step.text.clone(),
            region: step.region.clone(),
            number: index + 1,
            total,
        }
    }

    pub fn is_first(&self) -> bool {
        self.number == 1
    }

    pub fn is_last(&self) -> bool {
        self.number == self.total
    }
}
