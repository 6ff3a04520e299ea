use super::*;
use crate::config::Config;
use crate::draw::{BLACK, BLUE, RED, Shape, ShapeKind};
use crate::error::EditorError;
use crate::input::{MouseButton, Tool};
use crate::util::{Point, Rect};

fn create_test_input_state() -> InputState {
    InputState::with_defaults(BLACK, 2.0, false, 50)
}

fn drag_shape(state: &mut InputState, tool: Tool, from: (f64, f64), to: (f64, f64)) {
    state.on_pointer_down(MouseButton::Left, tool, from.0, from.1);
    state.on_pointer_drag(to.0, to.1);
    state.on_pointer_up(to.0, to.1);
}

fn draw_freehand(state: &mut InputState, xs: &[f64]) {
    state.on_pointer_down(MouseButton::Left, Tool::Freehand, xs[0], 0.0);
    for &x in &xs[1..] {
        state.on_pointer_drag(x, 0.0);
    }
    let last = xs[xs.len() - 1];
    state.on_pointer_up(last, 0.0);
}

fn click(state: &mut InputState, x: f64, y: f64, count: u32) {
    state.on_pointer_down(MouseButton::Left, Tool::Polyline, x, y);
    state.on_pointer_up(x, y);
    state.on_click(x, y, count);
}

fn bounds_of(state: &InputState, index: usize) -> Rect {
    state.shapes()[index].bounding_box().expect("bounds")
}

#[test]
fn test_circle_end_to_end() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Circle, (100.0, 100.0), (103.0, 104.0));

    assert_eq!(state.shapes().len(), 1);
    let circle = &state.shapes()[0];
    assert_eq!(circle.circle_radius(), Some(5.0));
    assert!(circle.contains(100.0, 100.0));
    assert!(!circle.contains(106.0, 100.0));
    assert_eq!(state.undo_depth(), 1);
    assert!(!state.is_busy());
}

#[test]
fn test_new_shapes_use_current_defaults() {
    let mut state = create_test_input_state();
    state.set_active_color(BLUE);
    assert!(state.set_stroke_width(5.0));
    state.set_filled(true);
    drag_shape(&mut state, Tool::Rect, (0.0, 0.0), (10.0, 10.0));

    let rect = &state.shapes()[0];
    assert_eq!(rect.color, BLUE);
    assert_eq!(rect.stroke_width, 5.0);
    assert!(rect.filled);
}

#[test]
fn test_set_stroke_width_rejects_non_positive() {
    let mut state = create_test_input_state();
    assert!(!state.set_stroke_width(0.0));
    assert!(!state.set_stroke_width(-3.0));
    assert!(!state.set_stroke_width(f64::NAN));
    assert_eq!(state.current_stroke_width, 2.0);
}

#[test]
fn test_shape_is_not_committed_until_release() {
    let mut state = create_test_input_state();
    state.on_pointer_down(MouseButton::Left, Tool::Line, 0.0, 0.0);
    state.on_pointer_drag(30.0, 40.0);

    assert!(state.shapes().is_empty());
    assert!(state.in_progress_shape().is_some());
    assert!(state.is_busy());

    state.on_pointer_up(60.0, 80.0);
    match &state.shapes()[0].kind {
        ShapeKind::Line { anchor, extent } => {
            assert_eq!(*anchor, Point::new(0.0, 0.0));
            assert_eq!((extent.w, extent.h), (60.0, 80.0));
        }
        other => panic!("expected line, got {other:?}"),
    }
}

#[test]
fn test_dot_follows_pointer_until_release() {
    let mut state = create_test_input_state();
    state.on_pointer_down(MouseButton::Left, Tool::Dot, 5.0, 5.0);
    state.on_pointer_drag(50.0, 50.0);
    state.on_pointer_up(60.0, 70.0);

    assert_eq!(state.shapes()[0].anchor(), Some(Point::new(60.0, 70.0)));
}

#[test]
fn test_freehand_records_drag_points() {
    let mut state = create_test_input_state();
    draw_freehand(&mut state, &[0.0, 10.0, 20.0]);

    let xs: Vec<f64> = state.shapes()[0]
        .points()
        .unwrap()
        .iter()
        .map(|p| p.x)
        .collect();
    assert_eq!(xs, vec![0.0, 10.0, 20.0]);
}

#[test]
fn test_resize_via_north_east_handle() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (10.0, 10.0), (30.0, 30.0));
    assert_eq!(bounds_of(&state, 0), Rect::new(10.0, 10.0, 20.0, 20.0));

    state.on_pointer_down(MouseButton::Left, Tool::Select, 30.0, 10.0);
    assert!(matches!(
        state.state,
        DrawingState::Selected {
            index: 0,
            handle: Some(crate::input::ResizeHandle::NorthEast),
            ..
        }
    ));
    state.on_pointer_drag(40.0, 0.0);
    state.on_pointer_up(40.0, 0.0);

    assert_eq!(bounds_of(&state, 0), Rect::new(10.0, 0.0, 30.0, 30.0));
    assert_eq!(state.undo_depth(), 2);
}

#[test]
fn test_repeated_resize_drags_do_not_compound() {
    let mut state = create_test_input_state();
    draw_freehand(&mut state, &[0.0, 50.0, 100.0]);
    let initial = bounds_of(&state, 0);

    // Drag the right-hand handle out and back to where it started.
    let east = Point::new(initial.right(), initial.center().y);
    state.on_pointer_down(MouseButton::Left, Tool::Select, east.x, east.y);
    state.on_pointer_drag(east.x + 100.0, east.y);
    state.on_pointer_drag(east.x, east.y);
    state.on_pointer_up(east.x, east.y);

    let xs: Vec<f64> = state.shapes()[0]
        .points()
        .unwrap()
        .iter()
        .map(|p| p.x)
        .collect();
    for (got, want) in xs.iter().zip([0.0, 50.0, 100.0]) {
        assert!((got - want).abs() < 1e-9, "{got} != {want}");
    }
}

#[test]
fn test_move_translates_by_pointer_delta() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (10.0, 10.0), (30.0, 30.0));

    state.on_pointer_down(MouseButton::Left, Tool::Select, 20.0, 20.0);
    assert_eq!(state.selected_index(), Some(0));
    state.on_pointer_drag(22.0, 25.0);
    state.on_pointer_drag(25.0, 30.0);
    state.on_pointer_up(25.0, 30.0);

    assert_eq!(bounds_of(&state, 0), Rect::new(15.0, 20.0, 20.0, 20.0));
    assert_eq!(state.selected_index(), None);

    assert!(state.undo());
    assert_eq!(bounds_of(&state, 0), Rect::new(10.0, 10.0, 20.0, 20.0));
}

#[test]
fn test_select_miss_takes_no_snapshot() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (10.0, 10.0), (30.0, 30.0));

    state.on_pointer_down(MouseButton::Left, Tool::Select, 300.0, 300.0);
    assert_eq!(state.state, DrawingState::Idle);
    assert_eq!(state.undo_depth(), 1);
}

#[test]
fn test_select_picks_topmost_shape() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (0.0, 0.0), (50.0, 50.0));
    drag_shape(&mut state, Tool::Rect, (25.0, 25.0), (75.0, 75.0));

    state.on_pointer_down(MouseButton::Left, Tool::Select, 40.0, 40.0);
    assert_eq!(state.selected_index(), Some(1));
}

#[test]
fn test_polyline_clicks_and_double_click_commit() {
    let mut state = create_test_input_state();
    click(&mut state, 0.0, 0.0, 1);
    assert_eq!(state.in_progress_shape().and_then(Shape::points).map(<[Point]>::len), Some(1));

    click(&mut state, 50.0, 0.0, 1);
    click(&mut state, 50.0, 50.0, 1);
    state.on_pointer_move(80.0, 80.0);
    assert_eq!(state.pointer, Point::new(80.0, 80.0));
    assert!(state.shapes().is_empty());

    // Second click of the double-click lands on the last vertex and is de-duplicated.
    click(&mut state, 50.2, 50.0, 2);
    assert_eq!(state.state, DrawingState::Idle);
    assert_eq!(state.shapes().len(), 1);
    assert_eq!(state.shapes()[0].points().unwrap().len(), 3);

    // The snapshot taken when the polyline started restores the empty scene.
    assert_eq!(state.undo_depth(), 1);
    assert!(state.undo());
    assert!(state.shapes().is_empty());
}

#[test]
fn test_polyline_ignores_clicks_for_other_tools() {
    let mut state = create_test_input_state();
    state.on_click(10.0, 10.0, 1);
    state.on_click(10.0, 10.0, 2);
    assert!(state.shapes().is_empty());
    assert_eq!(state.state, DrawingState::Idle);
}

#[test]
fn test_switching_tool_commits_polyline_with_two_vertices() {
    let mut state = create_test_input_state();
    click(&mut state, 0.0, 0.0, 1);
    click(&mut state, 40.0, 0.0, 1);

    state.set_active_tool(Tool::Rect);
    assert_eq!(state.shapes().len(), 1);
    assert_eq!(state.state, DrawingState::Idle);
}

#[test]
fn test_switching_tool_drops_single_vertex_polyline() {
    let mut state = create_test_input_state();
    click(&mut state, 0.0, 0.0, 1);
    assert_eq!(state.undo_depth(), 1);

    state.on_pointer_down(MouseButton::Left, Tool::Rect, 5.0, 5.0);
    assert!(state.shapes().is_empty());
    assert_eq!(state.undo_depth(), 0);
    assert!(matches!(state.state, DrawingState::Drawing { tool: Tool::Rect, .. }));
}

#[test]
fn test_eraser_gesture_splits_freehand() {
    let mut state = create_test_input_state();
    draw_freehand(&mut state, &[0.0, 20.0, 40.0, 60.0, 80.0]);

    state.on_pointer_down(MouseButton::Left, Tool::Eraser, 40.0, 0.0);
    assert!(matches!(state.state, DrawingState::Erasing { .. }));
    state.on_pointer_up(40.0, 0.0);

    assert_eq!(state.shapes().len(), 2);
    assert_eq!(state.shapes()[0].points().unwrap().len(), 2);
    assert_eq!(state.shapes()[1].points().unwrap().len(), 2);

    assert!(state.undo());
    assert_eq!(state.shapes().len(), 1);
}

#[test]
fn test_eraser_drops_single_point_freehand_anywhere() {
    let mut state = create_test_input_state();
    draw_freehand(&mut state, &[0.0]);
    draw_freehand(&mut state, &[100.0, 120.0]);
    assert_eq!(state.shapes().len(), 2);

    state.on_pointer_down(MouseButton::Left, Tool::Eraser, 300.0, 300.0);
    state.on_pointer_up(300.0, 300.0);

    assert_eq!(state.shapes().len(), 1);
    assert_eq!(state.shapes()[0].points().unwrap().len(), 2);
}

#[test]
fn test_eraser_removes_hit_shapes() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (0.0, 0.0), (20.0, 20.0));
    drag_shape(&mut state, Tool::Ellipse, (100.0, 100.0), (140.0, 120.0));

    state.on_pointer_down(MouseButton::Left, Tool::Eraser, 200.0, 200.0);
    state.on_pointer_drag(120.0, 110.0);
    state.on_pointer_up(120.0, 110.0);

    assert_eq!(state.shapes().len(), 1);
    assert!(matches!(state.shapes()[0].kind, ShapeKind::Rect { .. }));
}

#[test]
fn test_history_cap_evicts_oldest() {
    let mut state = create_test_input_state();
    for i in 0..60 {
        drag_shape(&mut state, Tool::Dot, (i as f64 * 20.0, 0.0), (i as f64 * 20.0, 0.0));
    }
    assert_eq!(state.undo_depth(), 50);

    while state.undo() {}
    assert_eq!(state.shapes().len(), 10);
}

#[test]
fn test_undo_redo_undo_returns_to_same_scene() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (0.0, 0.0), (20.0, 20.0));
    drag_shape(&mut state, Tool::Circle, (50.0, 50.0), (55.0, 50.0));

    assert!(state.undo());
    let after_undo = state.shapes().to_vec();
    assert!(state.redo());
    assert_eq!(state.shapes().len(), 2);
    assert!(state.undo());
    assert_eq!(state.shapes(), after_undo.as_slice());
}

#[test]
fn test_new_edit_invalidates_redo() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (0.0, 0.0), (20.0, 20.0));
    state.undo();
    assert!(state.can_redo());

    drag_shape(&mut state, Tool::Line, (0.0, 0.0), (20.0, 20.0));
    assert!(!state.can_redo());
    assert!(!state.redo());
}

#[test]
fn test_clear_all_is_undoable() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (0.0, 0.0), (20.0, 20.0));
    state.clear_all();
    assert!(state.shapes().is_empty());

    assert!(state.undo());
    assert_eq!(state.shapes().len(), 1);
}

#[test]
fn test_cancel_move_restores_scene() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (10.0, 10.0), (30.0, 30.0));
    let before = state.shapes().to_vec();

    state.on_pointer_down(MouseButton::Left, Tool::Select, 20.0, 20.0);
    state.on_pointer_drag(60.0, 60.0);
    assert_ne!(state.shapes(), before.as_slice());

    state.cancel_gesture();
    assert_eq!(state.shapes(), before.as_slice());
    assert_eq!(state.undo_depth(), 1);
    assert!(!state.is_busy());
}

#[test]
fn test_cancel_drawing_leaves_scene_untouched() {
    let mut state = create_test_input_state();
    state.on_pointer_down(MouseButton::Left, Tool::Ellipse, 0.0, 0.0);
    state.on_pointer_drag(40.0, 40.0);
    state.cancel_gesture();

    assert!(state.shapes().is_empty());
    assert_eq!(state.undo_depth(), 0);

    // A stray release after cancellation does nothing.
    state.on_pointer_up(40.0, 40.0);
    assert!(state.shapes().is_empty());
}

#[test]
fn test_undo_during_gesture_cancels_it_first() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (10.0, 10.0), (30.0, 30.0));
    state.on_pointer_down(MouseButton::Left, Tool::Select, 20.0, 20.0);
    state.on_pointer_drag(60.0, 60.0);

    assert!(state.undo());
    assert!(state.shapes().is_empty());
    assert_eq!(state.state, DrawingState::Idle);
}

#[test]
fn test_right_click_applies_prompt_edits() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (10.0, 10.0), (30.0, 30.0));
    state.set_edit_prompt(Box::new(|_: &Shape| ShapeEdit {
        color: Some(RED),
        stroke_width: Some(" 7.5 ".into()),
        filled: Some(true),
    }));

    state.on_pointer_down(MouseButton::Right, Tool::Select, 20.0, 20.0);
    let rect = &state.shapes()[0];
    assert_eq!(rect.color, RED);
    assert_eq!(rect.stroke_width, 7.5);
    assert!(rect.filled);
    assert_eq!(state.undo_depth(), 2);

    assert!(state.undo());
    assert_eq!(state.shapes()[0].color, BLACK);
}

#[test]
fn test_right_click_keeps_width_on_parse_error() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (10.0, 10.0), (30.0, 30.0));
    state.set_edit_prompt(Box::new(|_: &Shape| ShapeEdit {
        color: Some(BLUE),
        stroke_width: Some("thick".into()),
        filled: None,
    }));

    assert!(state.edit_shape_at(20.0, 20.0));
    assert_eq!(state.shapes()[0].color, BLUE);
    assert_eq!(state.shapes()[0].stroke_width, 2.0);
}

#[test]
fn test_right_click_without_changes_takes_no_snapshot() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (10.0, 10.0), (30.0, 30.0));

    assert!(!state.edit_shape_at(20.0, 20.0));
    assert!(!state.edit_shape_at(500.0, 500.0));
    assert_eq!(state.undo_depth(), 1);

    state.set_edit_prompt(Box::new(|_: &Shape| ShapeEdit {
        stroke_width: Some("-1".into()),
        ..ShapeEdit::default()
    }));
    assert!(!state.edit_shape_at(20.0, 20.0));
    assert_eq!(state.undo_depth(), 1);
}

#[test]
fn test_parse_stroke_width() {
    assert_eq!(parse_stroke_width("3").unwrap(), 3.0);
    assert!(matches!(
        parse_stroke_width("abc"),
        Err(EditorError::Parse { field: "stroke width", .. })
    ));
    assert!(parse_stroke_width("0").is_err());
    assert!(parse_stroke_width("inf").is_err());
}

#[test]
fn test_middle_button_is_ignored() {
    let mut state = create_test_input_state();
    state.on_pointer_down(MouseButton::Middle, Tool::Rect, 10.0, 10.0);
    assert_eq!(state.state, DrawingState::Idle);
}

#[test]
fn test_save_and_load_scene_round_trip() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("drawing.json");

    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Ellipse, (0.0, 0.0), (-40.0, 30.0));
    draw_freehand(&mut state, &[0.0, 5.0, 9.0]);
    state.save_scene(&path).unwrap();

    let mut restored = create_test_input_state();
    restored.load_scene(&path).unwrap();
    assert_eq!(restored.shapes(), state.shapes());
    assert_eq!(restored.undo_depth(), 1);

    assert!(restored.undo());
    assert!(restored.shapes().is_empty());
}

#[test]
fn test_save_and_load_keeps_resized_coordinates_exact() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("resized.json");

    let mut state = create_test_input_state();
    draw_freehand(&mut state, &[0.0, 33.3, 71.9]);
    drag_shape(&mut state, Tool::Circle, (200.0, 200.0), (203.0, 204.0));

    // Stretch the stroke by a right-hand handle so its points pick up long fractions.
    let bounds = bounds_of(&state, 0);
    let grab = Point::new(bounds.right() - 1.0, bounds.center().y);
    state.on_pointer_down(MouseButton::Left, Tool::Select, grab.x, grab.y);
    assert!(matches!(state.state, DrawingState::Selected { handle: Some(_), .. }));
    state.on_pointer_drag(grab.x + 27.7, grab.y);
    state.on_pointer_up(grab.x + 27.7, grab.y);

    state.save_scene(&path).unwrap();
    let mut restored = create_test_input_state();
    restored.load_scene(&path).unwrap();
    assert_eq!(restored.shapes(), state.shapes());
}

#[test]
fn test_failed_load_leaves_scene_and_history() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("garbage.json");
    std::fs::write(&path, "not a scene").unwrap();

    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (0.0, 0.0), (10.0, 10.0));
    let before = state.shapes().to_vec();

    let err = state.load_scene(&path).unwrap_err();
    assert!(matches!(err, EditorError::Persistence { .. }));
    assert!(
        state
            .load_scene(&temp.path().join("missing.json"))
            .is_err()
    );

    assert_eq!(state.shapes(), before.as_slice());
    assert_eq!(state.undo_depth(), 1);
}

#[test]
fn test_export_raster() {
    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (0.0, 0.0), (10.0, 10.0));

    assert!(matches!(
        state.export_raster(0, 100),
        Err(EditorError::InvalidSize { .. })
    ));
    let bytes = state.export_raster(32, 32).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("out.png");
    state.export_png_file(&path, 16, 16).unwrap();
    assert!(path.exists());
}

#[test]
fn test_from_config_applies_defaults() {
    let mut config = Config::default();
    config.drawing.default_stroke_width = 4.0;
    config.drawing.default_filled = true;
    config.eraser.radius = 12.0;
    config.history.max_depth = 5;
    config.canvas.width = 1024;

    let mut state = InputState::from_config(&config);
    assert_eq!(state.current_stroke_width, 4.0);
    assert!(state.current_filled);
    assert_eq!(state.eraser_radius, 12.0);
    assert_eq!(state.canvas_width, 1024);

    for i in 0..7 {
        drag_shape(&mut state, Tool::Dot, (i as f64 * 20.0, 0.0), (i as f64 * 20.0, 0.0));
    }
    assert_eq!(state.undo_depth(), 5);
}

#[test]
fn test_render_does_not_mutate_state() {
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 120, 120).unwrap();
    let ctx = cairo::Context::new(&surface).unwrap();

    let mut state = create_test_input_state();
    drag_shape(&mut state, Tool::Rect, (10.0, 10.0), (30.0, 30.0));
    click(&mut state, 50.0, 50.0, 1);
    state.on_pointer_move(90.0, 90.0);
    state.set_active_tool(Tool::Select);
    state.on_pointer_down(MouseButton::Left, Tool::Select, 20.0, 20.0);

    let gesture = state.state.clone();
    let shapes = state.shapes().to_vec();
    state.render(&ctx);
    assert_eq!(state.state, gesture);
    assert_eq!(state.shapes(), shapes.as_slice());

    state.on_pointer_up(20.0, 20.0);
    state.on_pointer_down(MouseButton::Left, Tool::Eraser, 100.0, 100.0);
    state.on_pointer_drag(110.0, 110.0);
    state.render(&ctx);
    assert!(matches!(state.state, DrawingState::Erasing { ref path } if path.len() == 2));
}
