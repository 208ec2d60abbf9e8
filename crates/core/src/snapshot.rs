use crate::types::{LevelId, Position, BOARD_COLS, BOARD_ROWS};

/// Everything the renderer needs for one frame. Plain `Copy` data so the
/// shell can keep the previous frame around for diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Bit-encoded cells, `[row][col]` with row 0 at the bottom.
    pub board: [[u8; BOARD_COLS as usize]; BOARD_ROWS as usize],
    pub player: Position,
    pub player_visible: bool,
    pub targets_visible: bool,
    /// Square of the box that just landed on a target, while its animation
    /// window is open.
    pub push_animation: Option<Position>,
    /// `None` for a layout that is not one of the compiled-in levels.
    pub level: Option<LevelId>,
    pub steps: u32,
    pub seconds: u32,
    pub score: u32,
    pub undo_available: u8,
    pub paused: bool,
    pub solved: bool,
    pub message: Option<&'static str>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        !self.solved && !self.paused
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_COLS as usize]; BOARD_ROWS as usize],
            player: Position::default(),
            player_visible: true,
            targets_visible: true,
            push_animation: None,
            level: None,
            steps: 0,
            seconds: 0,
            score: 0,
            undo_available: 0,
            paused: false,
            solved: false,
            message: None,
        }
    }
}
