//! Bounded undo history.
//!
//! Holds the last [`UNDO_CAPACITY`] successful moves. When full, the oldest
//! entry is dropped to make room for the newest.

use arrayvec::ArrayVec;

use crate::types::{BoxMove, Position, UNDO_CAPACITY};

/// Enough state to reverse one move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UndoEntry {
    /// Player position before the move.
    pub player: Position,
    /// The box the move pushed, if any.
    pub pushed: Option<BoxMove>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoHistory {
    /// Oldest first.
    entries: ArrayVec<UndoEntry, UNDO_CAPACITY>,
}

impl UndoHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, evicting the oldest one when full.
    pub fn record(&mut self, entry: UndoEntry) {
        if self.entries.is_full() {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    pub fn peek_last(&self) -> Option<UndoEntry> {
        self.entries.last().copied()
    }

    pub fn pop_last(&mut self) -> Option<UndoEntry> {
        self.entries.pop()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &UndoEntry> {
        self.entries.iter()
    }
}
