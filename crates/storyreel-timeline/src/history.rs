//! Undo/redo history.
//!
//! Snapshot-based: mutations to the store are synchronous and
//! last-writer-wins within a single session, so recording a copy of the
//! store before each committed edit is the whole discipline. New edits
//! clear the redo stack.

use crate::store::ClipStore;

/// Undo/redo history of store snapshots.
#[derive(Debug, Clone)]
pub struct EditHistory {
    /// Snapshots taken before each committed edit (most recent last).
    undo: Vec<ClipStore>,
    /// Snapshots stepped back over (most recent last).
    redo: Vec<ClipStore>,
    /// Maximum history depth.
    max_depth: usize,
}

impl EditHistory {
    /// Create a history with the given maximum depth.
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            max_depth,
        }
    }

    /// Record the store's state before a committed edit. Clears the redo
    /// stack (a new action invalidates redo history).
    pub fn record(&mut self, store: &ClipStore) {
        self.redo.clear();
        self.undo.push(store.clone());
        if self.undo.len() > self.max_depth {
            self.undo.remove(0);
        }
    }

    /// Step back one edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self, store: &mut ClipStore) -> bool {
        let Some(snapshot) = self.undo.pop() else {
            return false;
        };
        self.redo.push(std::mem::replace(store, snapshot));
        true
    }

    /// Step forward over an undone edit. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self, store: &mut ClipStore) -> bool {
        let Some(snapshot) = self.redo.pop() else {
            return false;
        };
        self.undo.push(std::mem::replace(store, snapshot));
        true
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Clear all history.
    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }
}

impl Default for EditHistory {
    fn default() -> Self {
        Self::new(200)
    }
}
