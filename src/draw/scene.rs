//! Scene container for managing the ordered collection of shapes.

use super::shape::Shape;
use crate::util::Rect;

/// Container for all committed shapes on the canvas.
///
/// Shapes are kept in draw order (first = bottom layer, last = top layer), so
/// list order is the implicit z-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    /// Creates a new empty scene with no shapes.
    pub const fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Adds a new shape on top of existing shapes.
    pub fn append(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Removes and returns the shape at `index`, if present.
    pub fn remove_at(&mut self, index: usize) -> Option<Shape> {
        (index < self.shapes.len()).then(|| self.shapes.remove(index))
    }

    /// Replaces the whole shape list.
    pub fn replace_all(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Removes all shapes from the scene, clearing the canvas.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Shapes in render order.
    pub fn iter(&self) -> std::slice::Iter<'_, Shape> {
        self.shapes.iter()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn get(&self, index: usize) -> Option<&Shape> {
        self.shapes.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Index of the topmost shape under `(x, y)`.
    ///
    /// A shape qualifies when its outline contains the point or when its
    /// bounding box does, so a shape can be grabbed anywhere inside its box.
    pub fn topmost_at(&self, x: f64, y: f64) -> Option<usize> {
        self.shapes.iter().rposition(|shape| {
            shape.contains(x, y) || shape.bounding_box().is_some_and(|bb| bb.contains(x, y))
        })
    }

    /// Union of every shape's bounding box, `None` when nothing has bounds.
    pub fn bounds(&self) -> Option<Rect> {
        content_bounds(&self.shapes)
    }
}

/// Union of the bounding boxes of `shapes`.
pub fn content_bounds(shapes: &[Shape]) -> Option<Rect> {
    shapes
        .iter()
        .filter_map(Shape::bounding_box)
        .reduce(Rect::union)
}
