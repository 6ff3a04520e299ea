//! Drawing state machine and input state management.

use super::actions::{EditPrompt, KeepShape};
use crate::config::Config;
use crate::draw::{BLACK, Color, DEFAULT_HISTORY_DEPTH, History, Scene, Shape, WHITE};
use crate::input::{ResizeHandle, tool::Tool};
use crate::session::{SessionOptions, options_from_config};
use crate::util::{Point, Rect};

/// Default eraser radius in pixels.
pub const DEFAULT_ERASER_RADIUS: f64 = 8.0;

/// Default stroke width for new shapes.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Polyline clicks closer than this to the previous vertex are ignored.
pub const POLYLINE_MIN_SPACING: f64 = 0.5;

/// Current gesture state machine.
///
/// Tracks whether the user is idle, dragging out a new shape, building a
/// polyline, erasing, or moving/resizing a selected shape. State transitions
/// occur on pointer events.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    /// No gesture in progress
    Idle,
    /// Dragging out a new shape (pointer held down)
    Drawing {
        /// Tool that created the shape
        tool: Tool,
        /// The in-progress shape, not yet in the scene
        shape: Shape,
    },
    /// Building a polyline vertex by vertex; survives pointer-up
    DrawingPolyline {
        shape: Shape,
    },
    /// Recording an eraser path (pointer held down)
    Erasing {
        path: Vec<Point>,
    },
    /// Moving or resizing a scene shape (pointer held down)
    Selected {
        /// Scene index of the selected shape
        index: usize,
        /// Bounding box captured at pointer-down
        initial: Rect,
        /// Box the shape currently occupies during a resize
        current: Rect,
        /// Pointer position at the previous drag event
        last: Point,
        /// Handle being dragged; `None` means the shape is being moved
        handle: Option<ResizeHandle>,
    },
}

/// Editing core: owns the scene, the history, drawing defaults and the
/// current gesture.
///
/// UI collaborators feed pointer events in and call the render functions; the
/// scene is only reachable read-only from outside.
pub struct InputState {
    pub(crate) scene: Scene,
    pub(crate) history: History,
    /// Current gesture state machine
    pub state: DrawingState,
    /// Tool reported with the most recent pointer-down
    pub active_tool: Tool,
    /// Color applied to newly created shapes
    pub current_color: Color,
    /// Stroke width applied to newly created shapes
    pub current_stroke_width: f64,
    /// Whether newly created shapes are filled
    pub current_filled: bool,
    /// Radius around eraser samples
    pub eraser_radius: f64,
    /// Canvas width in pixels (fallback content size for empty exports)
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Color painted behind the scene
    pub background: Color,
    /// Last known pointer position (drag or hover)
    pub pointer: Point,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Persistence options for save/load
    pub session_options: SessionOptions,
    pub(crate) edit_prompt: Box<dyn EditPrompt>,
}

impl Default for InputState {
    fn default() -> Self {
        Self::with_defaults(BLACK, DEFAULT_STROKE_WIDTH, false, DEFAULT_HISTORY_DEPTH)
    }
}

impl InputState {
    /// Creates an editor with an empty scene.
    ///
    /// # Arguments
    /// * `color` - Initial drawing color
    /// * `stroke_width` - Initial stroke width in pixels
    /// * `filled` - Whether new shapes start filled
    /// * `history_depth` - Snapshots kept on each undo/redo stack
    pub fn with_defaults(color: Color, stroke_width: f64, filled: bool, history_depth: usize) -> Self {
        Self {
            scene: Scene::new(),
            history: History::with_depth(history_depth),
            state: DrawingState::Idle,
            active_tool: Tool::default(),
            current_color: color,
            current_stroke_width: stroke_width,
            current_filled: filled,
            eraser_radius: DEFAULT_ERASER_RADIUS,
            canvas_width: 800,
            canvas_height: 600,
            background: WHITE,
            pointer: Point::default(),
            needs_redraw: true,
            session_options: SessionOptions::default(),
            edit_prompt: Box::new(KeepShape),
        }
    }

    /// Creates an editor using the validated values from `config`.
    pub fn from_config(config: &Config) -> Self {
        let mut state = Self::with_defaults(
            config.drawing.default_color.to_color(),
            config.drawing.default_stroke_width,
            config.drawing.default_filled,
            config.history.max_depth,
        );
        state.eraser_radius = config.eraser.radius;
        state.canvas_width = config.canvas.width;
        state.canvas_height = config.canvas.height;
        state.background = config.canvas.background.to_color_or(WHITE);
        state.session_options = options_from_config(&config.session);
        state
    }

    /// Installs the collaborator consulted on secondary clicks.
    pub fn set_edit_prompt(&mut self, prompt: Box<dyn EditPrompt>) {
        self.edit_prompt = prompt;
    }

    /// Updates the canvas size reported by the UI.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        if self.canvas_width != width || self.canvas_height != height {
            self.canvas_width = width;
            self.canvas_height = height;
            self.needs_redraw = true;
        }
    }

    /// Committed shapes in draw order.
    pub fn shapes(&self) -> &[Shape] {
        self.scene.shapes()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Scene index of the shape being moved or resized.
    pub fn selected_index(&self) -> Option<usize> {
        match self.state {
            DrawingState::Selected { index, .. } => Some(index),
            _ => None,
        }
    }

    /// The shape being dragged out or the polyline being built.
    pub fn in_progress_shape(&self) -> Option<&Shape> {
        match &self.state {
            DrawingState::Drawing { shape, .. } | DrawingState::DrawingPolyline { shape } => {
                Some(shape)
            }
            _ => None,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    /// True while any gesture, including an unfinished polyline, is in progress.
    pub fn is_busy(&self) -> bool {
        !matches!(self.state, DrawingState::Idle)
    }

    /// Changes the active tool.
    ///
    /// Leaving the polyline tool finishes the polyline under construction when
    /// it has at least two vertices and abandons it otherwise.
    pub fn set_active_tool(&mut self, tool: Tool) {
        if tool == self.active_tool {
            return;
        }
        if tool != Tool::Polyline && matches!(self.state, DrawingState::DrawingPolyline { .. }) {
            let vertices = self
                .in_progress_shape()
                .and_then(Shape::points)
                .map_or(0, <[Point]>::len);
            if vertices >= 2 {
                self.commit_polyline();
            } else {
                self.cancel_gesture();
            }
        }
        log::debug!("Tool changed: {} -> {}", self.active_tool, tool);
        self.active_tool = tool;
        self.needs_redraw = true;
    }

    /// Moves a finished polyline into the scene.
    ///
    /// Its undo snapshot was taken when the polyline was started.
    pub(super) fn commit_polyline(&mut self) {
        let DrawingState::DrawingPolyline { shape } =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return;
        };
        log::debug!(
            "Polyline committed with {} vertices",
            shape.points().map_or(0, <[Point]>::len)
        );
        self.scene.append(shape);
        self.history.clear_redo();
        self.needs_redraw = true;
    }
}
