//! Cairo-based rendering functions for shapes and editing overlays.

use super::color::{BLUE, Color, LIGHT_GRAY};
use super::shape::{DOT_DIAMETER, Shape, ShapeKind};
use crate::util::{Point, Rect};
use std::f64::consts::PI;

/// Half the side length of a resize handle square.
pub const HANDLE_HALF_SIZE: f64 = 6.0;

const DASH_PATTERN: [f64; 2] = [4.0, 4.0];

/// Fills the whole clip region with a solid color.
///
/// Should be called before rendering shapes.
pub fn render_background(ctx: &cairo::Context, color: Color) {
    let _ = ctx.save();
    color.apply(ctx);
    ctx.set_operator(cairo::Operator::Source);
    let _ = ctx.paint(); // Ignore errors - a failed paint only leaves the old background
    let _ = ctx.restore();
}

/// Renders all shapes in a collection to a Cairo context.
///
/// Shapes are drawn in the order they appear (first shape = bottom layer).
pub fn render_shapes<'a>(ctx: &cairo::Context, shapes: impl IntoIterator<Item = &'a Shape>) {
    for shape in shapes {
        render_shape(ctx, shape);
    }
}

/// Renders a single shape to a Cairo context.
///
/// Every kind strokes with round caps and joins at the shape's stroke width.
/// Circles, rectangles and ellipses either fill or stroke depending on
/// `filled`; dots always stroke their outline and additionally fill when
/// `filled`; lines and point lists always stroke.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) {
    let _ = ctx.save();
    ctx.new_path();
    apply_stroke_style(ctx, shape.color, shape.stroke_width);

    match &shape.kind {
        ShapeKind::Dot { anchor } => {
            ctx.arc(anchor.x, anchor.y, DOT_DIAMETER / 2.0, 0.0, 2.0 * PI);
            if shape.filled {
                let _ = ctx.fill_preserve();
            }
            let _ = ctx.stroke();
        }
        ShapeKind::Circle { anchor, .. } => {
            let radius = shape.circle_radius().unwrap_or_default();
            ctx.arc(anchor.x, anchor.y, radius, 0.0, 2.0 * PI);
            fill_or_stroke(ctx, shape.filled);
        }
        ShapeKind::Rect { anchor, extent } => {
            let r = Rect::from_anchor_extent(*anchor, *extent);
            ctx.rectangle(r.x, r.y, r.width, r.height);
            fill_or_stroke(ctx, shape.filled);
        }
        ShapeKind::Line { anchor, extent } => {
            ctx.move_to(anchor.x, anchor.y);
            ctx.line_to(anchor.x + extent.w, anchor.y + extent.h);
            let _ = ctx.stroke();
        }
        ShapeKind::Ellipse { anchor, extent } => {
            render_ellipse_path(ctx, Rect::from_anchor_extent(*anchor, *extent));
            fill_or_stroke(ctx, shape.filled);
        }
        ShapeKind::Freehand { points } | ShapeKind::Polyline { points } => {
            trace_points(ctx, points);
            let _ = ctx.stroke();
        }
    }

    let _ = ctx.restore();
}

fn apply_stroke_style(ctx: &cairo::Context, color: Color, width: f64) {
    color.apply(ctx);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);
}

fn fill_or_stroke(ctx: &cairo::Context, filled: bool) {
    let _ = if filled { ctx.fill() } else { ctx.stroke() };
}

/// Adds an ellipse inscribed in `bounds` to the current path.
///
/// Degenerate boxes add nothing; scaling by zero would make the matrix singular.
fn render_ellipse_path(ctx: &cairo::Context, bounds: Rect) {
    if !bounds.is_valid() {
        return;
    }
    let center = bounds.center();
    let _ = ctx.save();
    ctx.translate(center.x, center.y);
    ctx.scale(bounds.width / 2.0, bounds.height / 2.0);
    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
    let _ = ctx.restore();
}

fn trace_points(ctx: &cairo::Context, points: &[Point]) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
}

/// Dashed translucent segment from the last polyline vertex to the pointer.
pub fn render_polyline_preview(ctx: &cairo::Context, from: Point, to: Point, stroke_width: f64) {
    let _ = ctx.save();
    ctx.new_path();
    apply_stroke_style(ctx, Color::new(0.0, 0.0, 0.0, 0.5), stroke_width);
    ctx.set_dash(&DASH_PATTERN, 0.0);
    ctx.move_to(from.x, from.y);
    ctx.line_to(to.x, to.y);
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Light-gray discs along the recorded eraser path.
pub fn render_eraser_trail(ctx: &cairo::Context, path: &[Point], radius: f64) {
    if path.is_empty() {
        return;
    }
    let _ = ctx.save();
    LIGHT_GRAY.apply(ctx);
    for p in path {
        ctx.new_path();
        ctx.arc(p.x, p.y, radius, 0.0, 2.0 * PI);
        let _ = ctx.fill();
    }
    let _ = ctx.restore();
}

/// Dashed selection box with the eight resize handles.
pub fn render_selection(ctx: &cairo::Context, bounds: Rect) {
    let _ = ctx.save();
    ctx.new_path();
    BLUE.apply(ctx);
    ctx.set_line_width(1.0);
    ctx.set_line_cap(cairo::LineCap::Butt);
    ctx.set_line_join(cairo::LineJoin::Miter);
    ctx.set_dash(&DASH_PATTERN, 0.0);
    ctx.rectangle(bounds.x, bounds.y, bounds.width, bounds.height);
    let _ = ctx.stroke();

    for handle in crate::input::ResizeHandle::ALL {
        let p = handle.position(bounds);
        ctx.rectangle(
            p.x - HANDLE_HALF_SIZE,
            p.y - HANDLE_HALF_SIZE,
            HANDLE_HALF_SIZE * 2.0,
            HANDLE_HALF_SIZE * 2.0,
        );
    }
    let _ = ctx.fill();
    let _ = ctx.restore();
}
