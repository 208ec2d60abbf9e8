//! Error types for level construction and undo.
//!
//! Refused moves are not errors: they come back as
//! [`MoveKind::Blocked`](crate::types::MoveKind::Blocked) values.

use thiserror::Error;

use crate::types::{Cell, Position};

/// A level layout that cannot be loaded onto the fixed board.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("unknown level number {0}")]
    UnknownLevel(u8),

    #[error("layout has {found} rows, expected {expected}")]
    WrongRowCount { expected: usize, found: usize },

    #[error("layout row {row} has {found} columns, expected {expected}")]
    WrongRowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown glyph {glyph:?} at layout row {row}, column {col}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },

    #[error("player start {start:?} is on a {cell:?} square")]
    StartBlocked { start: Position, cell: Cell },

    #[error("layout has {boxes} boxes but {targets} targets")]
    NotEnoughBoxes { boxes: usize, targets: usize },
}

/// Why an undo request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UndoError {
    #[error("no moves to undo")]
    NothingToUndo,

    #[error("cannot undo while paused")]
    Paused,

    #[error("level already solved")]
    Solved,
}
