use crate::draw::render::{
    render_background, render_eraser_trail, render_polyline_preview, render_selection,
    render_shape, render_shapes,
};

use super::{DrawingState, InputState};

impl InputState {
    /// Full redraw of the canvas.
    ///
    /// Layers, bottom to top: background, committed shapes, the in-progress
    /// shape, the polyline preview segment, the eraser trail, and the
    /// selection box with its handles. Rendering never mutates the editor.
    pub fn render(&self, ctx: &cairo::Context) {
        render_background(ctx, self.background);
        render_shapes(ctx, self.scene.iter());
        self.render_overlays(ctx);
    }

    /// Draws only the transient layers on top of an already rendered scene.
    pub fn render_overlays(&self, ctx: &cairo::Context) {
        match &self.state {
            DrawingState::Idle => {}
            DrawingState::Drawing { shape, .. } => render_shape(ctx, shape),
            DrawingState::DrawingPolyline { shape } => {
                render_shape(ctx, shape);
                if let Some(last) = shape.points().and_then(<[_]>::last) {
                    render_polyline_preview(ctx, *last, self.pointer, shape.stroke_width);
                }
            }
            DrawingState::Erasing { path } => {
                render_eraser_trail(ctx, path, self.eraser_radius);
            }
            DrawingState::Selected { index, .. } => {
                if let Some(bounds) = self.scene.get(*index).and_then(|s| s.bounding_box()) {
                    render_selection(ctx, bounds);
                }
            }
        }
    }
}
