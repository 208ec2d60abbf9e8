//! Status-line messages.
//!
//! Wall hits rotate through a few taunts picked by a small seeded LCG, so a
//! given seed always produces the same sequence. Everything else has a fixed
//! text.

use crate::error::UndoError;
use crate::types::{BlockReason, MoveKind};

const WALL_MESSAGES: [&str; 3] = [
    "YOU'VE HIT A WALL!",
    "THE WALL IS AN ENEMY! BEWARE!",
    "AVOID THE WALLS!",
];

pub const BOX_BLOCKED: &str = "A box cannot be pushed onto the wall.";
pub const TARGET_OCCUPIED: &str = "That target already holds a box.";
pub const PAUSED: &str = "GAME PAUSED!";
pub const RESUMED: &str = "GAME RESUMED!";
pub const NOTHING_TO_UNDO: &str = "You can't undo steps that you haven't made yet, sorry!";
pub const LEVEL_COMPLETE: &str = "LEVEL COMPLETE!";

/// Linear congruential generator (Numerical Recipes constants).
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform-ish value in `[0, max)`. `max` must be non-zero.
    pub fn next_below(&mut self, max: u32) -> u32 {
        // Low bits of an LCG cycle quickly.
        (self.next_u32() >> 16) % max.max(1)
    }
}

#[derive(Debug, Clone)]
pub struct MessagePicker {
    rng: Lcg,
}

impl MessagePicker {
    pub fn new(seed: u32) -> Self {
        Self { rng: Lcg::new(seed) }
    }

    pub fn wall_hit(&mut self) -> &'static str {
        let idx = self.rng.next_below(WALL_MESSAGES.len() as u32) as usize;
        WALL_MESSAGES[idx]
    }

    /// Message for a move outcome, if it warrants one.
    pub fn for_move(&mut self, kind: MoveKind) -> Option<&'static str> {
        match kind {
            MoveKind::Blocked(BlockReason::WallHit) => Some(self.wall_hit()),
            MoveKind::Blocked(BlockReason::BoxBlocked) => Some(BOX_BLOCKED),
            MoveKind::Blocked(BlockReason::TargetOccupied) => Some(TARGET_OCCUPIED),
            MoveKind::Blocked(BlockReason::Paused) => Some(PAUSED),
            MoveKind::Blocked(BlockReason::Solved) => Some(LEVEL_COMPLETE),
            MoveKind::Moved
            | MoveKind::PushedBoxToRoom
            | MoveKind::PushedBoxToTarget
            | MoveKind::PushedBoxOffTarget => None,
        }
    }

    pub fn for_undo_error(&self, err: UndoError) -> &'static str {
        match err {
            UndoError::NothingToUndo => NOTHING_TO_UNDO,
            UndoError::Paused => PAUSED,
            UndoError::Solved => LEVEL_COMPLETE,
        }
    }
}
