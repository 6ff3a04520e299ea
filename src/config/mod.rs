//! Configuration file support for vecsketch.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/vecsketch/config.toml`. Settings include drawing defaults,
//! eraser radius, history depth, canvas and export sizes, and scene file persistence.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::{ColorSpec, SessionCompression};
pub use types::{
    CanvasConfig, DrawingConfig, EraserConfig, ExportConfig, HistoryConfig, SessionConfig,
};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "vecsketch";

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_stroke_width = 2.0
/// default_filled = false
///
/// [eraser]
/// radius = 8.0
///
/// [history]
/// max_depth = 50
///
/// [canvas]
/// width = 800
/// height = 600
/// background = "white"
///
/// [export]
/// width = 1600
/// height = 1200
///
/// [session]
/// compress = "auto"
/// backup_retention = 1
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Defaults applied to newly drawn shapes
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Eraser settings
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Undo/redo depth
    #[serde(default)]
    pub history: HistoryConfig,

    /// Canvas size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Default raster export size
    #[serde(default)]
    pub export: ExportConfig,

    /// Scene file persistence
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_stroke_width`: 0.5 - 100.0
    /// - `eraser.radius`: 1.0 - 100.0
    /// - `history.max_depth`: 1 - 1000
    /// - `canvas` and `export` sizes: 1 - 16384
    fn validate_and_clamp(&mut self) {
        if !(0.5..=100.0).contains(&self.drawing.default_stroke_width) {
            warn!(
                "Invalid default_stroke_width {:.1}, clamping to 0.5-100.0 range",
                self.drawing.default_stroke_width
            );
            self.drawing.default_stroke_width = if self.drawing.default_stroke_width.is_nan() {
                2.0
            } else {
                self.drawing.default_stroke_width.clamp(0.5, 100.0)
            };
        }

        if !self.drawing.default_color.is_known() {
            warn!(
                "Unknown default_color {:?}, falling back to black",
                self.drawing.default_color
            );
            self.drawing.default_color = ColorSpec::Name("black".to_string());
        }

        if !(1.0..=100.0).contains(&self.eraser.radius) {
            warn!(
                "Invalid eraser radius {:.1}, clamping to 1.0-100.0 range",
                self.eraser.radius
            );
            self.eraser.radius = if self.eraser.radius.is_nan() {
                8.0
            } else {
                self.eraser.radius.clamp(1.0, 100.0)
            };
        }

        if !(1..=1000).contains(&self.history.max_depth) {
            warn!(
                "Invalid history max_depth {}, clamping to 1-1000 range",
                self.history.max_depth
            );
            self.history.max_depth = self.history.max_depth.clamp(1, 1000);
        }

        clamp_dimension("canvas.width", &mut self.canvas.width);
        clamp_dimension("canvas.height", &mut self.canvas.height);
        clamp_dimension("export.width", &mut self.export.width);
        clamp_dimension("export.height", &mut self.export.height);

        if !self.canvas.background.is_known() {
            warn!(
                "Unknown canvas background {:?}, falling back to white",
                self.canvas.background
            );
            self.canvas.background = ColorSpec::Name("white".to_string());
        }

        if self.session.max_file_size_mb == 0 {
            warn!("session.max_file_size_mb must be at least 1; using 1");
            self.session.max_file_size_mb = 1;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/vecsketch/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join(APP_DIR);

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path, or returns defaults if it does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_dimension(name: &str, value: &mut u32) {
    const MAX_DIMENSION: u32 = 16_384;
    if !(1..=MAX_DIMENSION).contains(value) {
        warn!("Invalid {name} {value}, clamping to 1-{MAX_DIMENSION} range");
        *value = (*value).clamp(1, MAX_DIMENSION);
    }
}
