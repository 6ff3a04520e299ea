//! Library exports for the vecsketch editing core.
//!
//! The editor is headless: a UI feeds pointer events into [`InputState`] and
//! asks it to render onto a Cairo context. Scenes can be saved, loaded, and
//! exported to PNG without any windowing system.

pub mod config;
pub mod draw;
pub mod error;
pub mod input;
pub mod session;
pub mod util;

pub use config::Config;
pub use draw::{Color, Scene, Shape, ShapeKind};
pub use error::EditorError;
pub use input::{InputState, MouseButton, Tool};
