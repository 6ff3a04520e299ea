//! Path eraser: removes whole shapes and splits freehand strokes.

use crate::draw::{Shape, ShapeKind};
use crate::util::Point;

use super::InputState;

/// Applies an erase gesture to `shapes`, returning the surviving list.
///
/// - A freehand stroke loses every point within `radius` of a path sample. The
///   remaining points are split into maximal consecutive runs; each run of at
///   least two points becomes a new stroke with the original paint, so strokes
///   with fewer than two points never survive an erase.
/// - Every other shape is removed when any sample lies on its outline or
///   inside its bounding box.
///
/// Survivors keep their relative order; split pieces take the original's place.
pub fn erase_along_path(shapes: &[Shape], path: &[Point], radius: f64) -> Vec<Shape> {
    if path.is_empty() {
        return shapes.to_vec();
    }

    let radius_sq = radius * radius;
    let mut survivors = Vec::with_capacity(shapes.len());
    for shape in shapes {
        match &shape.kind {
            ShapeKind::Freehand { points } => {
                let keep: Vec<bool> = points
                    .iter()
                    .map(|p| !path.iter().any(|s| p.distance_squared_to(*s) <= radius_sq))
                    .collect();
                survivors.extend(surviving_runs(points, &keep).map(|run| {
                    Shape::new(
                        ShapeKind::Freehand {
                            points: run.to_vec(),
                        },
                        shape.color,
                        shape.stroke_width,
                        shape.filled,
                    )
                }));
            }
            _ => {
                let hit = path.iter().any(|s| {
                    shape.contains(s.x, s.y)
                        || shape.bounding_box().is_some_and(|bb| bb.contains(s.x, s.y))
                });
                if !hit {
                    survivors.push(shape.clone());
                }
            }
        }
    }
    survivors
}

/// Maximal runs of kept points with at least two members.
fn surviving_runs<'a>(points: &'a [Point], keep: &'a [bool]) -> impl Iterator<Item = &'a [Point]> {
    let mut start = 0;
    let mut runs = Vec::new();
    while start < points.len() {
        while start < points.len() && !keep[start] {
            start += 1;
        }
        let mut end = start;
        while end < points.len() && keep[end] {
            end += 1;
        }
        if end - start >= 2 {
            runs.push(&points[start..end]);
        }
        start = end;
    }
    runs.into_iter()
}

impl InputState {
    /// Commits an erase gesture: snapshot, rewrite the scene, drop redo.
    pub(super) fn finish_erase(&mut self, path: Vec<Point>) {
        self.history.checkpoint(&self.scene);
        let before = self.scene.len();
        let survivors = erase_along_path(self.scene.shapes(), &path, self.eraser_radius);
        log::debug!(
            "Eraser pass over {} samples: {} shapes -> {}",
            path.len(),
            before,
            survivors.len()
        );
        self.scene.replace_all(survivors);
        self.needs_redraw = true;
    }
}
