use crate::draw::{Color, Shape, export};
use crate::error::EditorError;
use crate::session;
use log::{debug, info, warn};
use std::path::Path;

use super::{DrawingState, InputState};

/// Changes requested for a shape through the secondary-click prompt.
///
/// `None` fields leave the shape's current value in place. The stroke width
/// arrives as raw user text and is validated before it is applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeEdit {
    pub color: Option<Color>,
    pub stroke_width: Option<String>,
    pub filled: Option<bool>,
}

impl ShapeEdit {
    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.stroke_width.is_none() && self.filled.is_none()
    }
}

/// UI collaborator asked for new paint attributes when a shape is right-clicked.
pub trait EditPrompt {
    fn request_edit(&mut self, shape: &Shape) -> ShapeEdit;
}

/// Prompt that never changes anything; installed until the UI provides one.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeepShape;

impl EditPrompt for KeepShape {
    fn request_edit(&mut self, _shape: &Shape) -> ShapeEdit {
        ShapeEdit::default()
    }
}

impl<F> EditPrompt for F
where
    F: FnMut(&Shape) -> ShapeEdit,
{
    fn request_edit(&mut self, shape: &Shape) -> ShapeEdit {
        self(shape)
    }
}

/// Parses a stroke width typed by the user. Accepts positive finite numbers.
pub fn parse_stroke_width(input: &str) -> Result<f64, EditorError> {
    let parse_error = || EditorError::Parse {
        field: "stroke width",
        input: input.to_string(),
    };
    let value: f64 = input.trim().parse().map_err(|_| parse_error())?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(parse_error())
    }
}

impl InputState {
    /// Restores the previous snapshot. Any gesture in progress is cancelled first.
    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        let changed = self.history.undo(&mut self.scene);
        if changed {
            debug!("Undo: {} shapes", self.scene.len());
            self.needs_redraw = true;
        }
        changed
    }

    /// Re-applies the most recently undone snapshot.
    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        let changed = self.history.redo(&mut self.scene);
        if changed {
            debug!("Redo: {} shapes", self.scene.len());
            self.needs_redraw = true;
        }
        changed
    }

    /// Removes every shape after taking a snapshot.
    pub fn clear_all(&mut self) {
        self.cancel_gesture();
        self.history.checkpoint(&self.scene);
        self.scene.clear();
        self.needs_redraw = true;
    }

    /// Sets the color used for new shapes.
    pub fn set_active_color(&mut self, color: Color) {
        self.current_color = color;
        self.needs_redraw = true;
    }

    /// Sets the stroke width used for new shapes. Non-positive values are ignored.
    pub fn set_stroke_width(&mut self, width: f64) -> bool {
        if !(width.is_finite() && width > 0.0) {
            warn!("Ignoring invalid stroke width {width}");
            return false;
        }
        self.current_stroke_width = width;
        true
    }

    /// Sets whether new shapes are filled.
    pub fn set_filled(&mut self, filled: bool) {
        self.current_filled = filled;
    }

    /// Secondary action: asks the edit prompt for new attributes of the
    /// topmost shape under `(x, y)` and applies them.
    ///
    /// A snapshot is taken only when something is actually applied. An
    /// unparsable stroke width is logged and the previous width kept.
    /// Returns true when the shape changed.
    pub fn edit_shape_at(&mut self, x: f64, y: f64) -> bool {
        if !matches!(
            self.state,
            DrawingState::Idle | DrawingState::DrawingPolyline { .. }
        ) {
            self.cancel_gesture();
        }
        let Some(index) = self.scene.topmost_at(x, y) else {
            return false;
        };
        let Some(shape) = self.scene.get(index) else {
            return false;
        };
        let edit = self.edit_prompt.request_edit(shape);

        let stroke_width = edit
            .stroke_width
            .as_deref()
            .and_then(|raw| match parse_stroke_width(raw) {
                Ok(width) => Some(width),
                Err(err) => {
                    warn!("{err}; keeping the previous stroke width");
                    None
                }
            });
        if edit.color.is_none() && stroke_width.is_none() && edit.filled.is_none() {
            return false;
        }

        self.history.checkpoint(&self.scene);
        let Some(shape) = self.scene.get_mut(index) else {
            return false;
        };
        if let Some(color) = edit.color {
            shape.color = color;
        }
        if let Some(width) = stroke_width {
            shape.stroke_width = width;
        }
        if let Some(filled) = edit.filled {
            shape.filled = filled;
        }
        debug!("Edited {} at index {index}", shape.kind_name());
        self.needs_redraw = true;
        true
    }

    /// Writes the committed scene to `path`.
    pub fn save_scene(&self, path: &Path) -> Result<(), EditorError> {
        session::save_scene(path, self.scene.shapes(), &self.session_options).map_err(|err| {
            let err = EditorError::persistence(path, &err);
            warn!("{err}");
            err
        })
    }

    /// Replaces the scene with the one stored at `path`.
    ///
    /// On failure the scene and history are left untouched. On success the
    /// previous scene becomes an undo snapshot.
    pub fn load_scene(&mut self, path: &Path) -> Result<(), EditorError> {
        let loaded = session::load_scene(path, &self.session_options).map_err(|err| {
            let err = EditorError::persistence(path, &err);
            warn!("{err}");
            err
        })?;
        self.cancel_gesture();
        self.history.checkpoint(&self.scene);
        info!(
            "Loaded {} shapes from {}",
            loaded.shapes.len(),
            path.display()
        );
        self.scene.replace_all(loaded.shapes);
        self.needs_redraw = true;
        Ok(())
    }

    /// Renders the committed scene into a `width` x `height` PNG, scaled to fit.
    pub fn export_raster(&self, width: i32, height: i32) -> Result<Vec<u8>, EditorError> {
        export::render_to_png(
            self.scene.shapes(),
            (self.canvas_width as f64, self.canvas_height as f64),
            width,
            height,
        )
    }

    /// Same as [`export_raster`](Self::export_raster), written to `path`.
    pub fn export_png_file(&self, path: &Path, width: i32, height: i32) -> Result<(), EditorError> {
        let bytes = self.export_raster(width, height)?;
        export::write_png_file(path, &bytes)
    }
}
