//! Pointer input handling and the editing state machine.
//!
//! This module translates pointer events from the UI into editing operations.
//! It maintains the drawing defaults (color, stroke width, fill), the active
//! tool, and the gesture state machine (idle, drawing, polyline, erasing,
//! moving/resizing a selection).

pub mod events;
pub mod handle;
pub mod state;
pub mod tool;

pub use events::MouseButton;
pub use handle::{ResizeHandle, handle_at, handle_index_at};
pub use state::{DrawingState, EditPrompt, InputState, KeepShape, ShapeEdit};
pub use tool::Tool;
