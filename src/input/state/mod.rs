mod actions;
mod core;
mod eraser;
mod mouse;
mod render;
#[cfg(test)]
mod tests;

pub use actions::{EditPrompt, KeepShape, ShapeEdit, parse_stroke_width};
pub use self::core::{
    DEFAULT_ERASER_RADIUS, DEFAULT_STROKE_WIDTH, DrawingState, InputState, POLYLINE_MIN_SPACING,
};
pub use eraser::erase_along_path;
