//! Compiled-in level layouts.
//!
//! Layouts are written top row first, one `&str` per row, so they read the
//! way they appear on screen:
//!
//! | glyph | cell |
//! |-------|------|
//! | `_` | room |
//! | `W` | wall |
//! | `B` | box |
//! | `T` | target |
//! | `*` | box on target |
//!
//! `start` is given in board coordinates (row 0 at the bottom).

use crate::error::LevelError;
use crate::types::{Cell, LevelId, Position, BOARD_COLS, BOARD_ROWS};

/// Parsed layout grid, top row first.
pub type LayoutGrid = [[Cell; BOARD_COLS as usize]; BOARD_ROWS as usize];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelLayout {
    pub rows: &'static [&'static str],
    pub start: Position,
}

pub const LEVEL_ONE: LevelLayout = LevelLayout {
    rows: &[
        "_W_WWW_WWW__WWWW",
        "_WTW__WT_B____TW",
        "________________",
        "W_B____W__B__B_W",
        "W___W_B_________",
        "______T_________",
        "___WWWWWWT_____W",
        "WW______WW__WWWW",
    ],
    start: Position { row: 5, col: 2 },
};

pub const LEVEL_TWO: LevelLayout = LevelLayout {
    rows: &[
        "WWWW_WWWWWW_WWWW",
        "W_____T________W",
        "__B__WW__B__T___",
        "W____________W_W",
        "W_T_W_B___W____W",
        "____W___T___B___",
        "W__________W___W",
        "WWWW_WWWWWW_WWWW",
    ],
    start: Position { row: 4, col: 3 },
};

/// Layout for a compiled-in level.
pub fn layout(level: LevelId) -> &'static LevelLayout {
    match level {
        LevelId::One => &LEVEL_ONE,
        LevelId::Two => &LEVEL_TWO,
    }
}

/// Look up a compiled-in level by its 1-based number.
pub fn level_id(number: u8) -> Result<LevelId, LevelError> {
    LevelId::from_number(number).ok_or(LevelError::UnknownLevel(number))
}

fn glyph_cell(glyph: char) -> Option<Cell> {
    match glyph {
        '_' => Some(Cell::Room),
        'W' => Some(Cell::Wall),
        'B' => Some(Cell::Box),
        'T' => Some(Cell::Target),
        '*' => Some(Cell::BoxOnTarget),
        _ => None,
    }
}

impl LevelLayout {
    /// Parse and validate the layout.
    ///
    /// Rejects anything that does not exactly fill the board, unknown glyphs,
    /// a start square that is not walkable, and layouts with fewer boxes than
    /// targets.
    pub fn parse(&self) -> Result<LayoutGrid, LevelError> {
        let expected_rows = BOARD_ROWS as usize;
        let expected_cols = BOARD_COLS as usize;

        if self.rows.len() != expected_rows {
            return Err(LevelError::WrongRowCount {
                expected: expected_rows,
                found: self.rows.len(),
            });
        }

        let mut grid: LayoutGrid = [[Cell::Room; BOARD_COLS as usize]; BOARD_ROWS as usize];
        let (mut boxes, mut targets) = (0usize, 0usize);

        for (row, text) in self.rows.iter().enumerate() {
            let width = text.chars().count();
            if width != expected_cols {
                return Err(LevelError::WrongRowWidth {
                    row,
                    expected: expected_cols,
                    found: width,
                });
            }
            for (col, glyph) in text.chars().enumerate() {
                let cell =
                    glyph_cell(glyph).ok_or(LevelError::UnknownGlyph { row, col, glyph })?;
                boxes += cell.has_box() as usize;
                targets += cell.is_target() as usize;
                grid[row][col] = cell;
            }
        }

        let start = Position::new(self.start.row, self.start.col);
        let start_cell = grid[expected_rows - 1 - start.row as usize][start.col as usize];
        if !start_cell.is_open() {
            return Err(LevelError::StartBlocked {
                start,
                cell: start_cell,
            });
        }

        if boxes < targets {
            return Err(LevelError::NotEnoughBoxes { boxes, targets });
        }

        Ok(grid)
    }

    /// Check the layout without keeping the parsed grid.
    pub fn validate(&self) -> Result<(), LevelError> {
        self.parse().map(|_| ())
    }
}
