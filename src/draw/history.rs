//! Snapshot-based undo/redo.
//!
//! Every checkpoint stores a deep copy of the scene's shape list. Both stacks
//! are bounded; the oldest snapshot is evicted once `max_depth` is exceeded.

use super::{Scene, Shape};
use std::collections::VecDeque;

/// Default number of snapshots kept on each stack.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Undo and redo stacks of full scene snapshots.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: VecDeque<Vec<Shape>>,
    redo_stack: VecDeque<Vec<Shape>>,
    max_depth: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_depth(DEFAULT_HISTORY_DEPTH)
    }
}

impl History {
    /// Creates an empty history keeping at most `max_depth` snapshots per stack.
    pub fn with_depth(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Pushes a copy of `scene` onto the undo stack without touching redo.
    pub fn push_undo(&mut self, scene: &Scene) {
        push_bounded(&mut self.undo_stack, scene.shapes().to_vec(), self.max_depth);
    }

    /// Records the pre-mutation state of a user edit: pushes a snapshot and
    /// invalidates the redo timeline.
    pub fn checkpoint(&mut self, scene: &Scene) {
        self.push_undo(scene);
        self.clear_redo();
    }

    pub fn clear_redo(&mut self) {
        self.redo_stack.clear();
    }

    /// Restores the most recent snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self, scene: &mut Scene) -> bool {
        let Some(previous) = self.undo_stack.pop_back() else {
            return false;
        };
        push_bounded(&mut self.redo_stack, scene.shapes().to_vec(), self.max_depth);
        scene.replace_all(previous);
        true
    }

    /// Re-applies the most recently undone snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self, scene: &mut Scene) -> bool {
        let Some(next) = self.redo_stack.pop_back() else {
            return false;
        };
        push_bounded(&mut self.undo_stack, scene.shapes().to_vec(), self.max_depth);
        scene.replace_all(next);
        true
    }

    /// Pops the newest undo snapshot without applying it to anything.
    ///
    /// Used to retract a checkpoint taken for a gesture that was abandoned.
    pub fn discard_last(&mut self) -> Option<Vec<Shape>> {
        self.undo_stack.pop_back()
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

fn push_bounded(stack: &mut VecDeque<Vec<Shape>>, snapshot: Vec<Shape>, max_depth: usize) {
    stack.push_back(snapshot);
    while stack.len() > max_depth {
        stack.pop_front();
    }
}
