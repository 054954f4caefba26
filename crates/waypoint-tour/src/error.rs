#![forbid(unsafe_code)]

use std::io;

use thiserror::Error;

/// Errors from registering steps and driving a tour.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TourError {
    #[error("a step named `{0}` is already registered")]
    DuplicateStep(String),

    #[error("no step named `{0}`")]
    UnknownStep(String),

    #[error("no steps are registered")]
    NoSteps,

    #[error("step {requested} is out of range (1..={total})")]
    StepOutOfRange { requested: usize, total: usize },

    #[error("step `{0}` is active and cannot be removed")]
    StepActive(String),
}

/// Errors from loading a [`TourConfig`](crate::config::TourConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
