#![forbid(unsafe_code)]

use thiserror::Error;
use waypoint_style::ColorParseError;
use waypoint_tour::{ConfigError, TourError};

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid color: {0}")]
    Color(#[from] ColorParseError),

    #[error("walkthrough error: {0}")]
    Tour(#[from] TourError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl AppError {
    /// Process exit status: 2 for bad input, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) | Self::Color(_) | Self::InvalidArgument { .. } => 2,
            Self::Io(_) | Self::Tour(_) => 1,
        }
    }

    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_input_exits_with_two() {
        let err: AppError = "nope".parse::<waypoint_style::Color>().unwrap_err().into();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(AppError::invalid_argument("x").exit_code(), 2);
        assert_eq!(AppError::from(TourError::NoSteps).exit_code(), 1);
        assert_eq!(
            AppError::invalid_argument("width").to_string(),
            "invalid argument: width"
        );
    }
}
