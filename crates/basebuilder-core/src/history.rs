//! Bounded undo/redo history of document snapshots.

use crate::groups::GroupSet;
use crate::shapes::PlacedShape;
use std::collections::VecDeque;

/// Default number of undo snapshots kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Deep copy of the editable document state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSnapshot {
    pub shapes: Vec<PlacedShape>,
    pub groups: GroupSet,
}

/// Undo and redo stacks.
///
/// Recording a snapshot clears the redo stack; the undo stack never holds
/// more than `limit` entries, dropping the oldest first.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<DocumentSnapshot>,
    redo: Vec<DocumentSnapshot>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: Vec::new(),
            limit: limit.max(1),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Save the state from before a mutation.
    pub fn record(&mut self, snapshot: DocumentSnapshot) {
        self.undo.push_back(snapshot);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        self.redo.clear();
    }

    /// Step back. `current` is kept for redo; returns the state to restore.
    pub fn undo(&mut self, current: DocumentSnapshot) -> Option<DocumentSnapshot> {
        let previous = self.undo.pop_back()?;
        self.redo.push(current);
        Some(previous)
    }

    /// Step forward. `current` goes back onto the undo stack.
    pub fn redo(&mut self, current: DocumentSnapshot) -> Option<DocumentSnapshot> {
        let next = self.redo.pop()?;
        self.undo.push_back(current);
        while self.undo.len() > self.limit {
            self.undo.pop_front();
        }
        Some(next)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}
