//! Shape definitions and per-kind geometry.

use super::color::Color;
use crate::input::Tool;
use crate::util::{Extent, Point, Rect, point_segment_distance};
use serde::{Deserialize, Serialize};

/// Diameter of a [`ShapeKind::Dot`] in pixels.
pub const DOT_DIAMETER: f64 = 10.0;

/// Lower bound for outline hit tolerance and bounds padding.
pub const MIN_HIT_TOLERANCE: f64 = 2.0;

/// Geometry of a shape. Each variant stores only what its kind uses.
///
/// The serde representation is the persisted schema: a `kind` tag plus the
/// variant's fields.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeKind {
    /// Fixed-size disc centered on `anchor`
    Dot { anchor: Point },
    /// Circle centered on `anchor` with radius `√(w² + h²)`
    Circle { anchor: Point, extent: Extent },
    /// Rectangle spanning `anchor` to `anchor + extent`
    Rect { anchor: Point, extent: Extent },
    /// Segment from `anchor` to `anchor + extent`
    Line { anchor: Point, extent: Extent },
    /// Ellipse inscribed in the box spanning `anchor` to `anchor + extent`
    Ellipse { anchor: Point, extent: Extent },
    /// Points recorded continuously while dragging
    Freehand { points: Vec<Point> },
    /// Vertices added one click at a time
    Polyline { points: Vec<Point> },
}

/// A drawable shape: geometry plus paint attributes.
///
/// All shapes store their own color and stroke information for independent rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(flatten)]
    pub kind: ShapeKind,
    /// Paint color
    pub color: Color,
    /// Line thickness in pixels
    pub stroke_width: f64,
    /// Whether the interior is painted
    #[serde(default)]
    pub filled: bool,
}

impl Shape {
    pub fn new(kind: ShapeKind, color: Color, stroke_width: f64, filled: bool) -> Self {
        Self {
            kind,
            color,
            stroke_width,
            filled,
        }
    }

    /// Creates the shape a drawing tool starts with at pointer-down.
    ///
    /// Returns `None` for tools that do not create shapes (select, eraser).
    pub fn for_tool(
        tool: Tool,
        at: Point,
        color: Color,
        stroke_width: f64,
        filled: bool,
    ) -> Option<Self> {
        let extent = Extent::default();
        let kind = match tool {
            Tool::Dot => ShapeKind::Dot { anchor: at },
            Tool::Circle => ShapeKind::Circle { anchor: at, extent },
            Tool::Rect => ShapeKind::Rect { anchor: at, extent },
            Tool::Line => ShapeKind::Line { anchor: at, extent },
            Tool::Ellipse => ShapeKind::Ellipse { anchor: at, extent },
            Tool::Freehand => ShapeKind::Freehand { points: vec![at] },
            Tool::Polyline => ShapeKind::Polyline { points: vec![at] },
            Tool::Select | Tool::Eraser => return None,
        };
        Some(Self::new(kind, color, stroke_width, filled))
    }

    /// Lowercase kind name, matching the persisted `kind` tag.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            ShapeKind::Dot { .. } => "dot",
            ShapeKind::Circle { .. } => "circle",
            ShapeKind::Rect { .. } => "rect",
            ShapeKind::Line { .. } => "line",
            ShapeKind::Ellipse { .. } => "ellipse",
            ShapeKind::Freehand { .. } => "freehand",
            ShapeKind::Polyline { .. } => "polyline",
        }
    }

    /// Reference coordinate. For point-list shapes this is the first point.
    pub fn anchor(&self) -> Option<Point> {
        match &self.kind {
            ShapeKind::Dot { anchor }
            | ShapeKind::Circle { anchor, .. }
            | ShapeKind::Rect { anchor, .. }
            | ShapeKind::Line { anchor, .. }
            | ShapeKind::Ellipse { anchor, .. } => Some(*anchor),
            ShapeKind::Freehand { points } | ShapeKind::Polyline { points } => {
                points.first().copied()
            }
        }
    }

    /// Recorded points of a Freehand or Polyline, `None` for other kinds.
    pub fn points(&self) -> Option<&[Point]> {
        match &self.kind {
            ShapeKind::Freehand { points } | ShapeKind::Polyline { points } => Some(points),
            _ => None,
        }
    }

    /// Distance within which a point counts as touching the outline of a
    /// stroked shape; also the padding applied to stroked bounds.
    pub fn hit_tolerance(&self) -> f64 {
        MIN_HIT_TOLERANCE.max(self.stroke_width / 2.0)
    }

    /// Radius of a Circle, `None` for other kinds.
    pub fn circle_radius(&self) -> Option<f64> {
        match &self.kind {
            ShapeKind::Circle { extent, .. } => Some(extent.w.hypot(extent.h)),
            _ => None,
        }
    }

    /// Tests whether `(px, py)` lies on or inside the shape.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let p = Point::new(px, py);
        match &self.kind {
            ShapeKind::Dot { anchor } => {
                let r = DOT_DIAMETER / 2.0;
                p.distance_squared_to(*anchor) <= r * r
            }
            ShapeKind::Circle { anchor, extent } => {
                let radius_sq = extent.w * extent.w + extent.h * extent.h;
                p.distance_squared_to(*anchor) <= radius_sq
            }
            ShapeKind::Rect { anchor, extent } => {
                let r = Rect::from_anchor_extent(*anchor, *extent);
                px >= r.x && px <= r.right() && py >= r.y && py <= r.bottom()
            }
            ShapeKind::Line { anchor, extent } => {
                let end = anchor.translated(extent.w, extent.h);
                point_segment_distance(p, *anchor, end) <= self.hit_tolerance()
            }
            ShapeKind::Ellipse { anchor, extent } => {
                let r = Rect::from_anchor_extent(*anchor, *extent);
                let rx = r.width / 2.0;
                let ry = r.height / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let center = r.center();
                let nx = (px - center.x) / rx;
                let ny = (py - center.y) / ry;
                nx * nx + ny * ny <= 1.0
            }
            ShapeKind::Freehand { points } | ShapeKind::Polyline { points } => {
                let tolerance = self.hit_tolerance();
                points
                    .windows(2)
                    .any(|seg| point_segment_distance(p, seg[0], seg[1]) <= tolerance)
            }
        }
    }

    /// Returns the axis-aligned bounding box for this shape.
    ///
    /// Stroked kinds (lines and point lists) are padded by the hit tolerance.
    /// Returns `None` only for a point-list shape with no points.
    pub fn bounding_box(&self) -> Option<Rect> {
        match &self.kind {
            ShapeKind::Dot { anchor } => {
                let r = DOT_DIAMETER / 2.0;
                Some(Rect::new(anchor.x - r, anchor.y - r, DOT_DIAMETER, DOT_DIAMETER))
            }
            ShapeKind::Circle { anchor, extent } => {
                let radius = extent.w.hypot(extent.h);
                Some(Rect::new(
                    anchor.x - radius,
                    anchor.y - radius,
                    radius * 2.0,
                    radius * 2.0,
                ))
            }
            ShapeKind::Rect { anchor, extent } | ShapeKind::Ellipse { anchor, extent } => {
                Some(Rect::from_anchor_extent(*anchor, *extent))
            }
            ShapeKind::Line { anchor, extent } => {
                Some(Rect::from_anchor_extent(*anchor, *extent).inflate(self.hit_tolerance()))
            }
            ShapeKind::Freehand { points } | ShapeKind::Polyline { points } => {
                Rect::enclosing(points).map(|r| r.inflate(self.hit_tolerance()))
            }
        }
    }

    /// Moves the whole shape by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match &mut self.kind {
            ShapeKind::Dot { anchor }
            | ShapeKind::Circle { anchor, .. }
            | ShapeKind::Rect { anchor, .. }
            | ShapeKind::Line { anchor, .. }
            | ShapeKind::Ellipse { anchor, .. } => *anchor = anchor.translated(dx, dy),
            ShapeKind::Freehand { points } | ShapeKind::Polyline { points } => {
                for p in points.iter_mut() {
                    *p = p.translated(dx, dy);
                }
            }
        }
    }

    /// Updates the in-progress geometry while the pointer is dragged to `to`.
    ///
    /// Dots follow the pointer, point lists record it, and anchor/extent kinds
    /// stretch their extent from the anchor.
    pub fn drag_to(&mut self, to: Point) {
        match &mut self.kind {
            ShapeKind::Dot { anchor } => *anchor = to,
            ShapeKind::Circle { anchor, extent }
            | ShapeKind::Rect { anchor, extent }
            | ShapeKind::Line { anchor, extent }
            | ShapeKind::Ellipse { anchor, extent } => *extent = Extent::between(*anchor, to),
            ShapeKind::Freehand { points } => points.push(to),
            ShapeKind::Polyline { .. } => {}
        }
    }

    /// Appends a vertex unless it is within `min_spacing` of the last one.
    ///
    /// Returns true when the point was added. No-op for non point-list kinds.
    pub fn push_point(&mut self, p: Point, min_spacing: f64) -> bool {
        match &mut self.kind {
            ShapeKind::Freehand { points } | ShapeKind::Polyline { points } => {
                if points
                    .last()
                    .is_some_and(|last| last.distance_to(p) <= min_spacing)
                {
                    return false;
                }
                points.push(p);
                true
            }
            _ => false,
        }
    }

    /// Fits the shape from its `from` box into the `to` box.
    ///
    /// - Point lists scale every point affinely between the two boxes.
    /// - Circles re-center on `to` with radius `to.width / 2`.
    /// - Every other kind takes `to`'s top-left as anchor and its size as extent.
    pub fn resize(&mut self, from: Rect, to: Rect) {
        match &mut self.kind {
            ShapeKind::Freehand { points } | ShapeKind::Polyline { points } => {
                let ow = if from.width <= 0.0 { 1.0 } else { from.width };
                let oh = if from.height <= 0.0 { 1.0 } else { from.height };
                for p in points.iter_mut() {
                    p.x = to.x + (p.x - from.x) * to.width / ow;
                    p.y = to.y + (p.y - from.y) * to.height / oh;
                }
            }
            ShapeKind::Circle { anchor, extent } => {
                *anchor = to.center();
                *extent = Extent::new(to.width / 2.0, 0.0);
            }
            ShapeKind::Dot { anchor } => *anchor = Point::new(to.x, to.y),
            ShapeKind::Rect { anchor, extent }
            | ShapeKind::Line { anchor, extent }
            | ShapeKind::Ellipse { anchor, extent } => {
                *anchor = Point::new(to.x, to.y);
                *extent = Extent::new(to.width, to.height);
            }
        }
    }
}
