//! Move resolution: walking, pushing, and the blocked cases.
//!
//! A push only ever looks at the single square behind the box; chains of
//! boxes are never pushed. Diagonal moves use their diagonal vector for both
//! the player step and the push, without checking the orthogonal squares in
//! between.

use crate::board::Board;
use crate::types::{BlockReason, BoxMove, Cell, Direction, MoveKind, MoveOutcome, Position};

/// Player position plus presentation/pause flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerState {
    pub position: Position,
    /// Flash state of the player icon.
    pub visible: bool,
    pub paused: bool,
}

impl PlayerState {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            visible: true,
            paused: false,
        }
    }
}

/// Resolve one move attempt against the board.
///
/// On success the board and player position are updated. Blocked outcomes
/// leave both untouched. Step counting and undo recording are the caller's
/// job.
pub fn resolve_move(
    board: &mut Board,
    player: &mut PlayerState,
    direction: Direction,
) -> MoveOutcome {
    let from = player.position;
    let next = from.step(direction);

    let kind = match board.get(next) {
        Cell::Wall => return MoveOutcome::blocked(from, BlockReason::WallHit),
        Cell::Room | Cell::Target => MoveKind::Moved,
        box_cell @ (Cell::Box | Cell::BoxOnTarget) => {
            let beyond = next.step(direction);
            let kind = match board.get(beyond) {
                Cell::Wall | Cell::Box => {
                    return MoveOutcome::blocked(from, BlockReason::BoxBlocked)
                }
                Cell::BoxOnTarget => {
                    return MoveOutcome::blocked(from, BlockReason::TargetOccupied)
                }
                Cell::Target => MoveKind::PushedBoxToTarget,
                Cell::Room if box_cell == Cell::BoxOnTarget => MoveKind::PushedBoxOffTarget,
                Cell::Room => MoveKind::PushedBoxToRoom,
            };

            let moved = board.move_box(next, beyond);
            debug_assert!(moved, "push was validated before moving the box");

            player.position = next;
            return MoveOutcome {
                kind,
                player_from: from,
                player_to: next,
                pushed: Some(BoxMove {
                    from: next,
                    to: beyond,
                }),
            };
        }
    };

    player.position = next;
    MoveOutcome {
        kind,
        player_from: from,
        player_to: next,
        pushed: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::LevelLayout;

    fn board_at(rows: &'static [&'static str], start: Position) -> (Board, PlayerState) {
        let layout = LevelLayout { rows, start };
        let board = Board::load_level(&layout).unwrap();
        (board, PlayerState::new(start))
    }

    const EMPTY: &str = "________________";

    /// Blank board except layout row 3 (board row 4); player at (4, 4).
    fn single_row(row: &'static str) -> (Board, PlayerState) {
        let rows: &'static [&'static str] =
            Box::leak(Box::new([EMPTY, EMPTY, EMPTY, row, EMPTY, EMPTY, EMPTY, EMPTY]));
        board_at(rows, Position::new(4, 4))
    }

    #[test]
    fn walk_onto_target_keeps_target() {
        let (mut board, mut player) = single_row("_____T__________");
        let before = board.clone();

        let out = resolve_move(&mut board, &mut player, Direction::Right);
        assert_eq!(out.kind, MoveKind::Moved);
        assert_eq!(out.player_from, Position::new(4, 4));
        assert_eq!(out.player_to, Position::new(4, 5));
        assert_eq!(out.pushed, None);
        assert_eq!(board.get(Position::new(4, 5)), Cell::Target);
        assert_eq!(board, before);
    }

    #[test]
    fn wall_hit_changes_nothing() {
        let (mut board, mut player) = single_row("_____W__________");
        let before = board.clone();

        let out = resolve_move(&mut board, &mut player, Direction::Right);
        assert_eq!(out.kind, MoveKind::Blocked(BlockReason::WallHit));
        assert_eq!(out.player_to, out.player_from);
        assert_eq!(player.position, Position::new(4, 4));
        assert_eq!(board, before);
    }

    #[test]
    fn push_box_into_room() {
        let (mut board, mut player) = single_row("_____B__________");

        let out = resolve_move(&mut board, &mut player, Direction::Right);
        assert_eq!(out.kind, MoveKind::PushedBoxToRoom);
        assert_eq!(
            out.pushed,
            Some(BoxMove {
                from: Position::new(4, 5),
                to: Position::new(4, 6)
            })
        );
        assert_eq!(player.position, Position::new(4, 5));
        assert_eq!(board.get(Position::new(4, 5)), Cell::Room);
        assert_eq!(board.get(Position::new(4, 6)), Cell::Box);
    }

    #[test]
    fn blocked_pushes_change_nothing() {
        let cases = [
            ("_____BB_________", BlockReason::BoxBlocked),
            ("_____BW_________", BlockReason::BoxBlocked),
            ("_____B*_________", BlockReason::TargetOccupied),
        ];
        for (row, reason) in cases {
            let (mut board, mut player) = single_row(row);
            let before = board.clone();

            let out = resolve_move(&mut board, &mut player, Direction::Right);
            assert_eq!(out.kind, MoveKind::Blocked(reason), "fixture {row}");
            assert_eq!(board, before, "fixture {row}");
            assert_eq!(player.position, Position::new(4, 4));
        }
    }

    #[test]
    fn push_onto_target_then_off_and_back() {
        let (mut board, mut player) = single_row("_____BT_________");

        let out = resolve_move(&mut board, &mut player, Direction::Right);
        assert_eq!(out.kind, MoveKind::PushedBoxToTarget);
        assert_eq!(board.get(Position::new(4, 6)), Cell::BoxOnTarget);
        let on_target = board.clone();

        let out = resolve_move(&mut board, &mut player, Direction::Right);
        assert_eq!(out.kind, MoveKind::PushedBoxOffTarget);
        assert_eq!(board.get(Position::new(4, 6)), Cell::Target);
        assert_eq!(board.get(Position::new(4, 7)), Cell::Box);

        // Walk around the box and push it back onto the target.
        for dir in [Direction::Up, Direction::Right, Direction::Right, Direction::Down] {
            assert_eq!(resolve_move(&mut board, &mut player, dir).kind, MoveKind::Moved);
        }
        let out = resolve_move(&mut board, &mut player, Direction::Left);
        assert_eq!(out.kind, MoveKind::PushedBoxToTarget);
        assert_eq!(board, on_target);
    }

    #[test]
    fn push_wraps_across_edges() {
        let (mut board, mut player) = board_at(
            &[
                "B_______________",
                "________________",
                "________________",
                "_______________B",
                "________________",
                "________________",
                "________________",
                "________________",
            ],
            Position::new(0, 0),
        );

        // Down from the bottom row reaches the top row box.
        let out = resolve_move(&mut board, &mut player, Direction::Down);
        assert_eq!(out.kind, MoveKind::PushedBoxToRoom);
        assert_eq!(player.position, Position::new(7, 0));
        assert_eq!(board.get(Position::new(6, 0)), Cell::Box);

        // From column 0, pushing left reaches the column-15 box.
        let mut player = PlayerState::new(Position::new(4, 0));
        let out = resolve_move(&mut board, &mut player, Direction::Left);
        assert_eq!(out.kind, MoveKind::PushedBoxToRoom);
        assert_eq!(board.get(Position::new(4, 14)), Cell::Box);
        assert_eq!(player.position, Position::new(4, 15));
    }

    #[test]
    fn diagonal_push_uses_single_vector() {
        // Walls on both orthogonal neighbours do not stop a diagonal move.
        let (mut board, mut player) = board_at(
            &[
                "________________",
                "________________",
                "____WB__________",
                "_____W__________",
                "________________",
                "________________",
                "________________",
                "________________",
            ],
            Position::new(4, 4),
        );

        let out = resolve_move(&mut board, &mut player, Direction::UpRight);
        assert_eq!(out.kind, MoveKind::PushedBoxToRoom);
        assert_eq!(player.position, Position::new(5, 5));
        assert_eq!(board.get(Position::new(6, 6)), Cell::Box);
    }
}
