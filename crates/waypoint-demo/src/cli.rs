#![forbid(unsafe_code)]

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use waypoint_style::Color;
use waypoint_tour::{ConfigError, OverlayMode, TourConfig};

use crate::error::{AppError, Result};

#[derive(Debug, Parser)]
#[command(
    name = "waypoint-demo",
    about = "A single-screen app with a guided walkthrough of its sections",
    version
)]
pub struct Cli {
    /// Walkthrough settings (TOML). Flags below override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// How the backdrop around the highlighted region is drawn.
    #[arg(long, value_enum)]
    pub overlay: Option<OverlayArg>,

    /// Jump between steps instead of moving the spotlight.
    #[arg(long)]
    pub no_animate: bool,

    /// Backdrop color, e.g. `rgba(0, 0, 0, 0.6)` or `#000000aa`.
    #[arg(long, value_name = "COLOR")]
    pub backdrop: Option<String>,

    /// Keep the bottom status row out of the backdrop and show key hints there.
    #[arg(long)]
    pub status_bar: bool,

    #[arg(long, value_name = "PATH", default_value = "waypoint-demo.log")]
    pub log_file: PathBuf,

    /// Start the walkthrough as soon as the screen is shown.
    #[arg(long)]
    pub autostart: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverlayArg {
    View,
    Svg,
}

impl From<OverlayArg> for OverlayMode {
    fn from(arg: OverlayArg) -> Self {
        match arg {
            OverlayArg::View => OverlayMode::View,
            OverlayArg::Svg => OverlayMode::Svg,
        }
    }
}

impl Cli {
    /// Load the config file, if any, and apply flag overrides.
    pub fn tour_config(&self) -> Result<TourConfig> {
        let mut config = match &self.config {
            Some(path) => {
                if !path.exists() {
                    return Err(AppError::invalid_argument(format!(
                        "config file does not exist: {}",
                        path.display()
                    )));
                }
                TourConfig::from_toml_file(path)?
            }
            None => TourConfig::default(),
        };
        if let Some(overlay) = self.overlay {
            config.overlay = overlay.into();
        }
        if self.no_animate {
            config.animated = false;
        }
        if let Some(color) = &self.backdrop {
            config.backdrop_color = color.parse::<Color>()?;
        }
        if self.status_bar {
            config.status_bar_visible = true;
        }
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors).into());
        }
        Ok(config)
    }
}
