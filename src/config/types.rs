//! Configuration type definitions.

use super::enums::{ColorSpec, SessionCompression};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing defaults applied to newly created shapes.
///
/// The editor starts with these values; the UI can change them at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Default shape color - either a named color (red, green, blue, yellow, orange, pink,
    /// white, black, gray) or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default stroke width in pixels (valid range: 0.5 - 100.0)
    #[serde(default = "default_stroke_width")]
    pub default_stroke_width: f64,

    /// Whether new circles, rectangles, ellipses and dots start filled
    #[serde(default)]
    pub default_filled: bool,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_stroke_width: default_stroke_width(),
            default_filled: false,
        }
    }
}

/// Eraser settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Radius around each eraser sample within which freehand points are removed
    /// (valid range: 1.0 - 100.0)
    #[serde(default = "default_eraser_radius")]
    pub radius: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            radius: default_eraser_radius(),
        }
    }
}

/// Undo/redo settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct HistoryConfig {
    /// Snapshots kept on each of the undo and redo stacks (valid range: 1 - 1000)
    #[serde(default = "default_history_depth")]
    pub max_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_depth: default_history_depth(),
        }
    }
}

/// Canvas surface settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels; also the content width assumed when exporting an empty scene
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Color painted behind the shapes when rendering the canvas
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
        }
    }
}

/// Raster export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Default image width in pixels
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Default image height in pixels
    #[serde(default = "default_canvas_height")]
    pub height: u32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
        }
    }
}

/// Scene file persistence settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SessionConfig {
    /// Compression mode for saved scenes
    #[serde(default)]
    pub compress: SessionCompression,

    /// Payload size in KiB at which `auto` compression kicks in
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Largest scene file that will be written or read, in MiB
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Number of backups to keep (0 disables the `.bak` copy)
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            compress: SessionCompression::default(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            max_file_size_mb: default_max_file_size_mb(),
            backup_retention: default_backup_retention(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_eraser_radius() -> f64 {
    8.0
}

fn default_history_depth() -> usize {
    crate::draw::DEFAULT_HISTORY_DEPTH
}

fn default_canvas_width() -> u32 {
    800
}

fn default_canvas_height() -> u32 {
    600
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_backup_retention() -> usize {
    1
}
