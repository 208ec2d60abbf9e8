//! Core types module - shared data structures and constants
//!
//! Pure data shared by the engine, the terminal view and the input mapping.
//! Nothing in here performs I/O or depends on other crates.
//!
//! # Board Dimensions
//!
//! The board is a fixed toroidal grid:
//!
//! - **Rows**: 8 (indexed 0-7, row 0 is the *bottom* row)
//! - **Columns**: 16 (indexed 0-15, left to right)
//!
//! Leaving one edge re-enters from the opposite edge.
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Polling loop interval |
//! | `PLAYER_FLASH_MS` | 200 | Player icon blink period |
//! | `TARGET_FLASH_MS` | 500 | Empty target blink period |
//! | `PUSH_ANIMATION_MS` | 500 | Halo shown after a box lands on a target |
//!
//! # Examples
//!
//! ```
//! use tui_sokoban_types::{Cell, Direction, Position, BOARD_COLS, BOARD_ROWS};
//!
//! assert_eq!(BOARD_ROWS, 8);
//! assert_eq!(BOARD_COLS, 16);
//!
//! // Moving down from the bottom row wraps to the top row.
//! let p = Position::new(0, 3).step(Direction::Down);
//! assert_eq!(p, Position::new(7, 3));
//! ```

/// Board height in cells (8 rows)
pub const BOARD_ROWS: u8 = 8;

/// Board width in cells (16 columns)
pub const BOARD_COLS: u8 = 16;

/// Polling loop interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Player icon flash period
pub const PLAYER_FLASH_MS: u32 = 200;

/// Empty target flash period
pub const TARGET_FLASH_MS: u32 = 500;

/// Length of the highlight shown around a box that was pushed onto a target
pub const PUSH_ANIMATION_MS: u32 = 500;

/// Number of moves the undo history remembers
pub const UNDO_CAPACITY: usize = 6;

/// Step budget used by the score formula
pub const SCORE_STEP_BUDGET: u32 = 200;

/// Points per unused step
pub const SCORE_STEP_WEIGHT: u32 = 20;

/// Time budget (seconds) used by the score formula
pub const SCORE_TIME_BUDGET_SECS: u32 = 1200;


/// The contents of one board square.
///
/// `BoxOnTarget` is the only legal way for a box and a target to share a
/// square; walls never combine with anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Room,
    Wall,
    Box,
    Target,
    BoxOnTarget,
}

impl Cell {
    const BIT_WALL: u8 = 1 << 0;
    const BIT_BOX: u8 = 1 << 1;
    const BIT_TARGET: u8 = 1 << 2;

    /// Compact bit encoding used by snapshots.
    pub fn bits(self) -> u8 {
        match self {
            Cell::Room => 0,
            Cell::Wall => Self::BIT_WALL,
            Cell::Box => Self::BIT_BOX,
            Cell::Target => Self::BIT_TARGET,
            Cell::BoxOnTarget => Self::BIT_BOX | Self::BIT_TARGET,
        }
    }

    /// Decode a snapshot value. Returns `None` for bit patterns that do not
    /// name one of the five variants (e.g. wall | box).
    pub fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(Cell::Room),
            b if b == Self::BIT_WALL => Some(Cell::Wall),
            b if b == Self::BIT_BOX => Some(Cell::Box),
            b if b == Self::BIT_TARGET => Some(Cell::Target),
            b if b == Self::BIT_BOX | Self::BIT_TARGET => Some(Cell::BoxOnTarget),
            _ => None,
        }
    }

    pub fn has_box(self) -> bool {
        matches!(self, Cell::Box | Cell::BoxOnTarget)
    }

    pub fn is_target(self) -> bool {
        matches!(self, Cell::Target | Cell::BoxOnTarget)
    }

    /// Walkable without pushing anything.
    pub fn is_open(self) -> bool {
        matches!(self, Cell::Room | Cell::Target)
    }

    /// The cell after a box arrives, or `None` if a box cannot enter it.
    pub fn with_box(self) -> Option<Cell> {
        match self {
            Cell::Room => Some(Cell::Box),
            Cell::Target => Some(Cell::BoxOnTarget),
            Cell::Wall | Cell::Box | Cell::BoxOnTarget => None,
        }
    }

    /// The cell after its box leaves. Target-ness is preserved.
    pub fn without_box(self) -> Cell {
        match self {
            Cell::Box => Cell::Room,
            Cell::BoxOnTarget => Cell::Target,
            other => other,
        }
    }
}

/// A board coordinate. Row 0 is the bottom row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    /// Build a position, reducing both coordinates onto the board.
    pub fn new(row: u8, col: u8) -> Self {
        Self {
            row: row % BOARD_ROWS,
            col: col % BOARD_COLS,
        }
    }

    /// Build a position from signed coordinates, wrapping toroidally.
    pub fn wrapping(row: i16, col: i16) -> Self {
        Self {
            row: row.rem_euclid(BOARD_ROWS as i16) as u8,
            col: col.rem_euclid(BOARD_COLS as i16) as u8,
        }
    }

    /// One step in `direction`, wrapping at the edges.
    pub fn step(self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        Self::wrapping(
            self.row as i16 + d_row as i16,
            self.col as i16 + d_col as i16,
        )
    }
}

/// Movement directions. Diagonals move one row and one column at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// `(d_row, d_col)`; up increases the row index.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (1, 0),
            Direction::Down => (-1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::UpLeft => (1, -1),
            Direction::UpRight => (1, 1),
            Direction::DownLeft => (-1, -1),
            Direction::DownRight => (-1, 1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpLeft | Direction::UpRight | Direction::DownLeft | Direction::DownRight
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::UpLeft => "up-left",
            Direction::UpRight => "up-right",
            Direction::DownLeft => "down-left",
            Direction::DownRight => "down-right",
        }
    }
}

/// The compiled-in levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LevelId {
    #[default]
    One,
    Two,
}

impl LevelId {
    pub const ALL: [LevelId; 2] = [LevelId::One, LevelId::Two];

    /// Parse a 1-based level number.
    ///
    /// ```
    /// use tui_sokoban_types::LevelId;
    ///
    /// assert_eq!(LevelId::from_number(2), Some(LevelId::Two));
    /// assert_eq!(LevelId::from_number(0), None);
    /// ```
    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(LevelId::One),
            2 => Some(LevelId::Two),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        match self {
            LevelId::One => 1,
            LevelId::Two => 2,
        }
    }

    /// The level that follows this one, cycling back to the first.
    pub fn next(self) -> Self {
        match self {
            LevelId::One => LevelId::Two,
            LevelId::Two => LevelId::One,
        }
    }
}

/// Commands the input shell can send to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Walk (and possibly push) one square
    Move(Direction),
    /// Step back through the undo history
    Undo,
    /// Toggle pause state
    Pause,
    /// Reload the current level
    Restart,
    /// Load a specific level
    SelectLevel(LevelId),
    /// Continue to the following level once this one is solved
    NextLevel,
}

/// Why a move was refused. Refused moves never change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockReason {
    /// The player walked into a wall
    WallHit,
    /// The square behind the box is a wall or another box
    BoxBlocked,
    /// The square behind the box already holds a box on a target
    TargetOccupied,
    /// The game is paused; only resume is accepted
    Paused,
    /// The level is already complete
    Solved,
}

/// What a move attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Blocked(BlockReason),
    Moved,
    PushedBoxToRoom,
    PushedBoxToTarget,
    PushedBoxOffTarget,
}

impl MoveKind {
    pub fn is_blocked(self) -> bool {
        matches!(self, MoveKind::Blocked(_))
    }
}

/// A box displacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoxMove {
    pub from: Position,
    pub to: Position,
}

/// Result of a move attempt plus the squares the renderer must repaint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveOutcome {
    pub kind: MoveKind,
    pub player_from: Position,
    pub player_to: Position,
    pub pushed: Option<BoxMove>,
}

impl MoveOutcome {
    pub fn blocked(at: Position, reason: BlockReason) -> Self {
        Self {
            kind: MoveKind::Blocked(reason),
            player_from: at,
            player_to: at,
            pushed: None,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.kind.is_blocked()
    }
}
