//! Board module - the fixed 8x16 toroidal grid
//!
//! Uses a flat array for zero-allocation copies. Coordinates are
//! `(row, col)` with row 0 at the bottom. Every accessor reduces its
//! coordinates modulo the board size, so there is no out-of-range access.
//!
//! After a level is loaded, squares may only gain or lose a box: walls stay
//! walls and target squares stay target squares. `num_targets` is fixed at
//! load time.

use crate::error::LevelError;
use crate::levels::LevelLayout;
use crate::types::{Cell, Position, BOARD_COLS, BOARD_ROWS};

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_ROWS as usize) * (BOARD_COLS as usize);

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (row * COLS + col)
    cells: [Cell; BOARD_SIZE],
    num_targets: u8,
}

impl Board {
    /// An all-room board with no targets.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Room; BOARD_SIZE],
            num_targets: 0,
        }
    }

    #[inline(always)]
    fn index(pos: Position) -> usize {
        (pos.row as usize) * (BOARD_COLS as usize) + (pos.col as usize)
    }

    /// Copy a layout onto a fresh board.
    ///
    /// Layout row 0 is the top of the screen, so it lands on board row 7.
    pub fn load_level(layout: &LevelLayout) -> Result<Self, LevelError> {
        let grid = layout.parse()?;

        let mut board = Self::new();
        for (src_row, row) in grid.iter().enumerate() {
            let dst_row = BOARD_ROWS as usize - 1 - src_row;
            for (col, &cell) in row.iter().enumerate() {
                board.cells[dst_row * BOARD_COLS as usize + col] = cell;
            }
        }
        board.num_targets = board.count_targets() as u8;

        Ok(board)
    }

    pub fn rows(&self) -> u8 {
        BOARD_ROWS
    }

    pub fn cols(&self) -> u8 {
        BOARD_COLS
    }

    /// Number of target squares fixed at load time.
    pub fn num_targets(&self) -> usize {
        self.num_targets as usize
    }

    /// Cell at signed `(row, col)`, wrapped onto the board.
    pub fn cell_at(&self, row: i16, col: i16) -> Cell {
        self.get(Position::wrapping(row, col))
    }

    /// Set the cell at signed `(row, col)`, wrapped onto the board.
    pub fn set_cell(&mut self, row: i16, col: i16, cell: Cell) {
        self.set(Position::wrapping(row, col), cell);
    }

    pub fn get(&self, pos: Position) -> Cell {
        self.cells[Self::index(pos)]
    }

    /// Replace a cell.
    ///
    /// Only box presence may change; walls and target squares are fixed
    /// once the level is loaded.
    pub fn set(&mut self, pos: Position, cell: Cell) {
        let idx = Self::index(pos);
        let old = self.cells[idx];
        debug_assert_eq!(
            old.is_target(),
            cell.is_target(),
            "target squares are fixed after load ({old:?} -> {cell:?} at {pos:?})"
        );
        debug_assert_eq!(
            old == Cell::Wall,
            cell == Cell::Wall,
            "walls are fixed after load ({old:?} -> {cell:?} at {pos:?})"
        );
        self.cells[idx] = cell;
        self.debug_check_targets();
    }

    /// Move a box between two squares, keeping whatever target lies under
    /// either of them. Returns false (and changes nothing) if `from` has no
    /// box or `to` cannot take one.
    pub fn move_box(&mut self, from: Position, to: Position) -> bool {
        let src = self.get(from);
        let Some(arrived) = self.get(to).with_box() else {
            return false;
        };
        if !src.has_box() {
            return false;
        }
        self.set(to, arrived);
        self.set(from, src.without_box());
        true
    }

    /// Count of `Target` + `BoxOnTarget` squares.
    pub fn count_targets(&self) -> usize {
        self.cells.iter().filter(|c| c.is_target()).count()
    }

    pub fn count_boxes(&self) -> usize {
        self.cells.iter().filter(|c| c.has_box()).count()
    }

    pub fn count_boxes_on_targets(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&c| c == Cell::BoxOnTarget)
            .count()
    }

    /// Iterate every `(position, cell)` pair, bottom row first.
    pub fn iter(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, &cell)| {
            let pos = Position {
                row: (i / BOARD_COLS as usize) as u8,
                col: (i % BOARD_COLS as usize) as u8,
            };
            (pos, cell)
        })
    }

    /// Export the bit-encoded grid, indexed `[row][col]` with row 0 at the
    /// bottom.
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_COLS as usize]; BOARD_ROWS as usize]) {
        for (row, out_row) in out.iter_mut().enumerate() {
            let start = row * BOARD_COLS as usize;
            for (col, out_cell) in out_row.iter_mut().enumerate() {
                *out_cell = self.cells[start + col].bits();
            }
        }
    }

    #[inline]
    fn debug_check_targets(&self) {
        debug_assert_eq!(
            self.count_targets(),
            self.num_targets as usize,
            "target count changed after load"
        );
        debug_assert!(self.count_boxes_on_targets() <= self.num_targets as usize);
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
