#![forbid(unsafe_code)]

//! Walkthrough presentation settings.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```toml
//! overlay = "svg"
//! backdrop_color = "rgba(0, 0, 0, 0.6)"
//!
//! [labels]
//! next = "Continue"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use waypoint_style::Color;

use crate::error::ConfigError;

/// How the backdrop around the highlighted region is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    /// Plain dimmed backdrop with a cut-out.
    #[default]
    View,
    /// Dimmed backdrop plus a rounded outline around the cut-out.
    Svg,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipStyle {
    pub background: Color,
    pub foreground: Color,
    /// Outer width in cells, before the viewport cap.
    pub width: u16,
}

impl Default for TooltipStyle {
    fn default() -> Self {
        Self {
            background: Color::rgba(44, 62, 80, Color::alpha_byte(0.95)),
            foreground: Color::rgb(255, 255, 255),
            width: 30,
        }
    }
}

/// Button captions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub previous: String,
    pub next: String,
    pub skip: String,
    pub finish: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            previous: "Previous".into(),
            next: "Next".into(),
            skip: "Skip".into(),
            finish: "Finish".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TourConfig {
    pub overlay: OverlayMode,
    /// Animate the spotlight between steps.
    pub animated: bool,
    pub backdrop_color: Color,
    /// Keep the bottom status row out of the backdrop.
    pub status_bar_visible: bool,
    /// Cells of padding between a region and its spotlight.
    pub margin: u16,
    /// A click on the backdrop stops the tour.
    pub stop_on_outside_click: bool,
    pub animation_duration_ms: u64,
    pub tooltip_style: TooltipStyle,
    pub labels: Labels,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            overlay: OverlayMode::View,
            animated: true,
            backdrop_color: Color::rgba(0, 0, 0, Color::alpha_byte(0.4)),
            status_bar_visible: false,
            margin: 0,
            stop_on_outside_click: false,
            animation_duration_ms: 300,
            tooltip_style: TooltipStyle::default(),
            labels: Labels::default(),
        }
    }
}

impl TourConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    /// Problems with field values. Empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.tooltip_style.width < 12 {
            errors.push(format!(
                "tooltip_style.width must be at least 12, got {}",
                self.tooltip_style.width
            ));
        }
        if self.labels.next.trim().is_empty() {
            errors.push("labels.next must not be empty".to_string());
        }
        if self.animated && self.animation_duration_ms == 0 {
            errors.push("animation_duration_ms must be positive when animated".to_string());
        }
        errors
    }

    fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}
