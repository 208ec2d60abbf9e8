//! Win detection and level scoring.
//!
//! `score = max(200 - steps, 0) * 20 + max(1200 - seconds, 0)`
//!
//! Both functions are pure and can be called at any time.

use crate::board::Board;
use crate::types::{SCORE_STEP_BUDGET, SCORE_STEP_WEIGHT, SCORE_TIME_BUDGET_SECS};

/// True when every target holds a box. A board without targets is solved.
pub fn is_solved(board: &Board) -> bool {
    board.count_boxes_on_targets() == board.num_targets()
}

/// Score for a finished (or in-progress) level.
pub fn compute_score(steps: u32, seconds_elapsed: u32) -> u32 {
    let step_points = SCORE_STEP_BUDGET.saturating_sub(steps) * SCORE_STEP_WEIGHT;
    let time_points = SCORE_TIME_BUDGET_SECS.saturating_sub(seconds_elapsed);
    step_points + time_points
}
