use crate::draw::Shape;
use crate::input::handle::handle_at;
use crate::input::{events::MouseButton, tool::Tool};
use crate::util::Point;
use log::debug;

use super::core::POLYLINE_MIN_SPACING;
use super::{DrawingState, InputState};

impl InputState {
    /// Processes a pointer button press.
    ///
    /// # Arguments
    /// * `button` - Which mouse button was pressed
    /// * `tool` - Tool selected in the UI at the time of the press
    /// * `x` - Pointer X coordinate
    /// * `y` - Pointer Y coordinate
    ///
    /// # Behavior
    /// - Right click: opens the edit prompt for the topmost shape under the pointer
    /// - Left click with select: grabs the topmost shape for moving, or for
    ///   resizing when a handle is hit, and snapshots the scene
    /// - Left click with polyline: starts a polyline or continues the current one
    /// - Left click with eraser: starts recording an eraser path
    /// - Left click with any other tool: starts a new shape at the pointer
    pub fn on_pointer_down(&mut self, button: MouseButton, tool: Tool, x: f64, y: f64) {
        self.set_active_tool(tool);
        let p = Point::new(x, y);
        self.pointer = p;

        match button {
            MouseButton::Left => {}
            MouseButton::Right => {
                self.edit_shape_at(x, y);
                return;
            }
            MouseButton::Middle => return,
        }

        if !matches!(
            self.state,
            DrawingState::Idle | DrawingState::DrawingPolyline { .. }
        ) {
            debug!("Pointer-down during an unfinished gesture; cancelling it");
            self.cancel_gesture();
        }

        match tool {
            Tool::Select => self.begin_selection(p),
            Tool::Polyline => {
                if matches!(self.state, DrawingState::DrawingPolyline { .. }) {
                    return;
                }
                let Some(shape) = self.new_shape(tool, p) else {
                    return;
                };
                self.history.checkpoint(&self.scene);
                debug!("Polyline started at ({x:.1}, {y:.1})");
                self.state = DrawingState::DrawingPolyline { shape };
                self.needs_redraw = true;
            }
            Tool::Eraser => {
                self.state = DrawingState::Erasing { path: vec![p] };
                self.needs_redraw = true;
            }
            _ => {
                let Some(shape) = self.new_shape(tool, p) else {
                    return;
                };
                debug!("Started {} at ({x:.1}, {y:.1})", shape.kind_name());
                self.state = DrawingState::Drawing { tool, shape };
                self.needs_redraw = true;
            }
        }
    }

    fn new_shape(&self, tool: Tool, at: Point) -> Option<Shape> {
        Shape::for_tool(
            tool,
            at,
            self.current_color,
            self.current_stroke_width,
            self.current_filled,
        )
    }

    fn begin_selection(&mut self, p: Point) {
        let Some(index) = self.scene.topmost_at(p.x, p.y) else {
            return;
        };
        let Some(initial) = self.scene.get(index).and_then(Shape::bounding_box) else {
            return;
        };
        let handle = handle_at(initial, p.x, p.y);
        self.history.checkpoint(&self.scene);
        debug!(
            "Selected shape {} for {}",
            index,
            if handle.is_some() { "resize" } else { "move" }
        );
        self.state = DrawingState::Selected {
            index,
            initial,
            current: initial,
            last: p,
            handle,
        };
        self.needs_redraw = true;
    }

    /// Processes pointer motion while a button is held.
    ///
    /// # Behavior
    /// - Erasing: records the pointer as an eraser sample
    /// - Selected: resizes against the fixed opposite edges, or moves by the
    ///   delta since the previous event
    /// - Drawing: dots follow the pointer, freehand records it, and the other
    ///   kinds stretch their extent
    pub fn on_pointer_drag(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);
        self.pointer = p;

        match &mut self.state {
            DrawingState::Idle => return,
            DrawingState::Erasing { path } => path.push(p),
            DrawingState::Selected {
                index,
                initial,
                current,
                last,
                handle,
            } => {
                let Some(shape) = self.scene.get_mut(*index) else {
                    return;
                };
                match handle {
                    Some(handle) => {
                        // Edges come from the press-time box; scaling starts from where the shape sits now.
                        let target = handle.target_box(*initial, x, y);
                        shape.resize(*current, target);
                        *current = target;
                    }
                    None => {
                        shape.translate(x - last.x, y - last.y);
                        *last = p;
                    }
                }
            }
            DrawingState::Drawing { shape, .. } => shape.drag_to(p),
            DrawingState::DrawingPolyline { .. } => {}
        }
        self.needs_redraw = true;
    }

    /// Processes a pointer button release.
    ///
    /// # Behavior
    /// - Erasing: snapshots the scene and applies the eraser path
    /// - Selected: finalizes the move or resize (snapshot taken at press)
    /// - Drawing: finalizes the geometry and appends the shape
    /// - Polyline: nothing; vertices are added by clicks
    pub fn on_pointer_up(&mut self, x: f64, y: f64) {
        let p = Point::new(x, y);
        self.pointer = p;

        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => {}
            polyline @ DrawingState::DrawingPolyline { .. } => self.state = polyline,
            DrawingState::Erasing { path } => self.finish_erase(path),
            DrawingState::Selected { index, .. } => {
                debug!("Finished editing shape {index}");
                self.history.clear_redo();
                self.needs_redraw = true;
            }
            DrawingState::Drawing { tool, mut shape } => {
                if tool != Tool::Freehand {
                    shape.drag_to(p);
                }
                self.history.checkpoint(&self.scene);
                debug!("Committed {}", shape.kind_name());
                self.scene.append(shape);
                self.needs_redraw = true;
            }
        }
    }

    /// Processes a completed click (press and release without a drag).
    ///
    /// Only meaningful while building a polyline: a single click adds a vertex
    /// and a double click adds the final vertex and commits the polyline.
    /// Vertices within 0.5 px of the previous one are skipped.
    pub fn on_click(&mut self, x: f64, y: f64, click_count: u32) {
        if self.active_tool != Tool::Polyline {
            return;
        }
        let DrawingState::DrawingPolyline { shape } = &mut self.state else {
            return;
        };
        shape.push_point(Point::new(x, y), POLYLINE_MIN_SPACING);
        if click_count == 2 {
            self.commit_polyline();
        }
        self.needs_redraw = true;
    }

    /// Tracks the pointer while no button is held, for the polyline preview.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
        if matches!(self.state, DrawingState::DrawingPolyline { .. }) {
            self.needs_redraw = true;
        }
    }

    /// Abandons the current gesture.
    ///
    /// - Drawing and erasing gestures are dropped without touching the scene.
    /// - A move or resize restores the scene captured at pointer-down and
    ///   retracts that snapshot.
    /// - An unfinished polyline is dropped along with its start snapshot.
    pub fn cancel_gesture(&mut self) {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => return,
            DrawingState::Drawing { .. } | DrawingState::Erasing { .. } => {}
            DrawingState::Selected { .. } => {
                if let Some(before) = self.history.discard_last() {
                    self.scene.replace_all(before);
                }
            }
            DrawingState::DrawingPolyline { .. } => {
                self.history.discard_last();
            }
        }
        debug!("Gesture cancelled");
        self.needs_redraw = true;
    }
}
