//! Drawing tool selection.

use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines how a pointer-down is interpreted: selecting an
/// existing shape, starting a new shape, or erasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Pick, move and resize existing shapes
    Select,
    /// Fixed-size dot that follows the pointer until release
    Dot,
    /// Circle centered on the press point
    Circle,
    /// Rectangle from corner to corner
    Rect,
    /// Straight segment between press and release points
    Line,
    /// Ellipse inscribed in the dragged box
    Ellipse,
    /// Freehand drawing, follows the pointer path (default)
    #[default]
    Freehand,
    /// Removes or splits shapes under the dragged path
    Eraser,
    /// Vertices added one click at a time, finished by double-click
    Polyline,
}

impl Tool {
    pub const ALL: [Tool; 9] = [
        Tool::Select,
        Tool::Dot,
        Tool::Circle,
        Tool::Rect,
        Tool::Line,
        Tool::Ellipse,
        Tool::Freehand,
        Tool::Eraser,
        Tool::Polyline,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tool::Select => "select",
            Tool::Dot => "dot",
            Tool::Circle => "circle",
            Tool::Rect => "rect",
            Tool::Line => "line",
            Tool::Ellipse => "ellipse",
            Tool::Freehand => "freehand",
            Tool::Eraser => "eraser",
            Tool::Polyline => "polyline",
        }
    }

    /// True for tools that create a new shape on pointer-down.
    pub fn creates_shapes(self) -> bool {
        !matches!(self, Tool::Select | Tool::Eraser)
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Tool::ALL
            .into_iter()
            .find(|tool| tool.name() == needle)
            .ok_or_else(|| format!("unknown tool '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for tool in Tool::ALL {
            assert_eq!(tool.name().parse::<Tool>(), Ok(tool));
        }
        assert_eq!(" Rect ".parse::<Tool>(), Ok(Tool::Rect));
        assert!("pen".parse::<Tool>().is_err());
    }

    #[test]
    fn only_select_and_eraser_skip_shape_creation() {
        let passive: Vec<Tool> = Tool::ALL
            .into_iter()
            .filter(|t| !t.creates_shapes())
            .collect();
        assert_eq!(passive, vec![Tool::Select, Tool::Eraser]);
    }
}
