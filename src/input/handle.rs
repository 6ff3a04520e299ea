//! Resize handles on a selection box.

use crate::draw::render::HANDLE_HALF_SIZE;
use crate::util::{Point, Rect};

/// Minimum width and height of a box produced by dragging a handle.
pub const MIN_RESIZE_EXTENT: f64 = 1.0;

/// One of the eight handles around a selected shape's bounding box.
///
/// Declaration order is the hit-test order: corners and edge midpoints
/// clockwise from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeHandle {
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::NorthWest,
        ResizeHandle::North,
        ResizeHandle::NorthEast,
        ResizeHandle::East,
        ResizeHandle::SouthEast,
        ResizeHandle::South,
        ResizeHandle::SouthWest,
        ResizeHandle::West,
    ];

    /// 1-based handle number (1 = NW through 8 = W).
    pub fn index(self) -> u8 {
        match self {
            ResizeHandle::NorthWest => 1,
            ResizeHandle::North => 2,
            ResizeHandle::NorthEast => 3,
            ResizeHandle::East => 4,
            ResizeHandle::SouthEast => 5,
            ResizeHandle::South => 6,
            ResizeHandle::SouthWest => 7,
            ResizeHandle::West => 8,
        }
    }

    pub fn from_index(index: u8) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i as usize).copied())
    }

    /// Center of this handle's square on `bounds`.
    pub fn position(self, bounds: Rect) -> Point {
        let c = bounds.center();
        let (l, t, r, b) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
        match self {
            ResizeHandle::NorthWest => Point::new(l, t),
            ResizeHandle::North => Point::new(c.x, t),
            ResizeHandle::NorthEast => Point::new(r, t),
            ResizeHandle::East => Point::new(r, c.y),
            ResizeHandle::SouthEast => Point::new(r, b),
            ResizeHandle::South => Point::new(c.x, b),
            ResizeHandle::SouthWest => Point::new(l, b),
            ResizeHandle::West => Point::new(l, c.y),
        }
    }

    /// Box obtained by dragging this handle of `initial` to `(x, y)`.
    ///
    /// The edges not driven by the handle stay fixed. Width and height are
    /// clamped to [`MIN_RESIZE_EXTENT`] measured from the new left/top edge.
    pub fn target_box(self, initial: Rect, x: f64, y: f64) -> Rect {
        let (mut left, mut top) = (initial.x, initial.y);
        let (mut right, mut bottom) = (initial.right(), initial.bottom());
        match self {
            ResizeHandle::NorthWest => (left, top) = (x, y),
            ResizeHandle::North => top = y,
            ResizeHandle::NorthEast => (right, top) = (x, y),
            ResizeHandle::East => right = x,
            ResizeHandle::SouthEast => (right, bottom) = (x, y),
            ResizeHandle::South => bottom = y,
            ResizeHandle::SouthWest => (left, bottom) = (x, y),
            ResizeHandle::West => left = x,
        }
        Rect::new(
            left,
            top,
            (right - left).max(MIN_RESIZE_EXTENT),
            (bottom - top).max(MIN_RESIZE_EXTENT),
        )
    }
}

/// First handle (in [`ResizeHandle::ALL`] order) whose square contains `(x, y)`.
///
/// Squares are closed: a point exactly [`HANDLE_HALF_SIZE`] away on both axes
/// still hits.
pub fn handle_at(bounds: Rect, x: f64, y: f64) -> Option<ResizeHandle> {
    ResizeHandle::ALL.into_iter().find(|handle| {
        let p = handle.position(bounds);
        (x - p.x).abs() <= HANDLE_HALF_SIZE && (y - p.y).abs() <= HANDLE_HALF_SIZE
    })
}

/// Numeric form of [`handle_at`]: 1-8, or 0 when no handle is hit.
pub fn handle_index_at(bounds: Rect, x: f64, y: f64) -> u8 {
    handle_at(bounds, x, y).map_or(0, ResizeHandle::index)
}
