//! Shape model, scene store, history and Cairo rendering.
//!
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Shape`]/[`ShapeKind`]: the seven drawable kinds and their geometry
//! - [`Scene`]: ordered container for committed shapes
//! - [`History`]: bounded snapshot undo/redo
//! - Rendering and raster export functions for Cairo-based output

pub mod color;
pub mod export;
pub mod history;
pub mod render;
pub mod scene;
pub mod shape;

pub use color::Color;
pub use export::{ExportTransform, fit_transform, render_to_png, write_png_file};
pub use history::{DEFAULT_HISTORY_DEPTH, History};
pub use render::{render_background, render_shape, render_shapes};
pub use scene::Scene;
pub use shape::{DOT_DIAMETER, Shape, ShapeKind};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GREEN, LIGHT_GRAY, ORANGE, PINK, RED, WHITE, YELLOW};
