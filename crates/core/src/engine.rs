//! Engine - owns one level in play
//!
//! Ties the board, player, undo history, timers and messages together. Every
//! gameplay change goes through [`Engine::apply_move`] or [`Engine::undo`];
//! the timers only ever change presentation flags.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::error::{LevelError, UndoError};
use crate::levels::{self, LevelLayout};
use crate::messages::{self, MessagePicker};
use crate::resolver::{resolve_move, PlayerState};
use crate::scoring::{compute_score, is_solved};
use crate::snapshot::GameSnapshot;
use crate::timing::{Cue, Fired, TimingConfig, TimingCoordinator};
use crate::types::{BlockReason, Direction, GameAction, LevelId, MoveKind, MoveOutcome, Position};
use crate::undo::{UndoEntry, UndoHistory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for the wall-hit message picker.
    pub seed: u32,
    pub timing: TimingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            timing: TimingConfig::default(),
        }
    }
}

/// What [`Engine::apply_action`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Move(MoveOutcome),
    Undo(Result<UndoEntry, UndoError>),
    /// New pause state.
    Paused(bool),
    LevelLoaded(LevelId),
    /// The action is not available right now (level change while paused,
    /// next level before solving).
    Ignored,
}

#[derive(Debug, Clone)]
pub struct Engine {
    level: Option<LevelId>,
    layout: LevelLayout,
    config: EngineConfig,
    board: Board,
    player: PlayerState,
    history: UndoHistory,
    timing: TimingCoordinator,
    steps: u32,
    picker: MessagePicker,
    push_animation: Option<Position>,
    targets_visible: bool,
    message: Option<&'static str>,
    /// Play time frozen at the moment the last box landed.
    solved_at_secs: Option<u32>,
}

impl Engine {
    /// Start a compiled-in level with the default configuration.
    pub fn new_level(level: LevelId, now: Instant) -> Result<Self, LevelError> {
        Self::with_config(level, now, EngineConfig::default())
    }

    pub fn with_config(
        level: LevelId,
        now: Instant,
        config: EngineConfig,
    ) -> Result<Self, LevelError> {
        let mut engine = Self::from_layout(levels::layout(level), now, config)?;
        engine.level = Some(level);
        info!(level = level.number(), "level loaded");
        Ok(engine)
    }

    /// Start an arbitrary layout.
    pub fn from_layout(
        layout: &LevelLayout,
        now: Instant,
        config: EngineConfig,
    ) -> Result<Self, LevelError> {
        let board = Board::load_level(layout)?;
        let start = Position::new(layout.start.row, layout.start.col);
        let solved_at_secs = is_solved(&board).then_some(0);

        Ok(Self {
            level: None,
            layout: *layout,
            config,
            board,
            player: PlayerState::new(start),
            history: UndoHistory::new(),
            timing: TimingCoordinator::new(now, config.timing),
            steps: 0,
            picker: MessagePicker::new(config.seed),
            push_animation: None,
            targets_visible: true,
            message: None,
            solved_at_secs,
        })
    }

    pub fn level(&self) -> Option<LevelId> {
        self.level
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> PlayerState {
        self.player
    }

    pub fn history(&self) -> &UndoHistory {
        &self.history
    }

    pub fn timing(&self) -> &TimingCoordinator {
        &self.timing
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub fn push_animation(&self) -> Option<Position> {
        self.push_animation
    }

    pub fn targets_visible(&self) -> bool {
        self.targets_visible
    }

    pub fn is_paused(&self) -> bool {
        self.timing.is_paused()
    }

    pub fn is_solved(&self) -> bool {
        is_solved(&self.board)
    }

    /// Play time in whole seconds; stops counting once the level is solved.
    pub fn seconds_elapsed(&self) -> u32 {
        self.solved_at_secs.unwrap_or_else(|| self.timing.seconds_elapsed())
    }

    /// Score for the current step count and the given play time.
    pub fn score(&self, seconds_elapsed: u32) -> u32 {
        compute_score(self.steps, seconds_elapsed)
    }

    /// Score locked in when the level was solved.
    pub fn final_score(&self) -> Option<u32> {
        self.solved_at_secs.map(|secs| self.score(secs))
    }

    /// Attempt one move. Refused while paused or after the level is solved.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        let here = self.player.position;
        let outcome = if self.is_solved() {
            MoveOutcome::blocked(here, BlockReason::Solved)
        } else if self.is_paused() {
            MoveOutcome::blocked(here, BlockReason::Paused)
        } else {
            resolve_move(&mut self.board, &mut self.player, direction)
        };

        if outcome.is_blocked() {
            self.message = self.picker.for_move(outcome.kind);
            debug!(dir = direction.as_str(), kind = ?outcome.kind, "move blocked");
            return outcome;
        }

        let cost = if direction.is_diagonal() { 2 } else { 1 };
        self.steps = self.steps.saturating_add(cost);
        self.history.record(UndoEntry {
            player: outcome.player_from,
            pushed: outcome.pushed,
        });

        self.player.visible = true;
        self.timing.restart_player_flash();
        self.message = None;

        if outcome.kind == MoveKind::PushedBoxToTarget {
            self.push_animation = outcome.pushed.map(|b| b.to);
            self.timing.arm_push_animation();
        }

        debug!(
            dir = direction.as_str(),
            kind = ?outcome.kind,
            steps = self.steps,
            "move"
        );

        if self.is_solved() {
            let secs = self.timing.seconds_elapsed();
            self.solved_at_secs = Some(secs);
            self.message = Some(messages::LEVEL_COMPLETE);
            info!(
                steps = self.steps,
                seconds = secs,
                score = self.score(secs),
                "level complete"
            );
        }

        outcome
    }

    /// Reverse the most recent recorded move, including any box it pushed.
    ///
    /// The step counter is left alone.
    pub fn undo(&mut self) -> Result<UndoEntry, UndoError> {
        let result = self.try_undo();
        match result {
            Ok(entry) => {
                self.message = None;
                debug!(
                    row = entry.player.row,
                    col = entry.player.col,
                    remaining = self.history.len(),
                    "undo"
                );
            }
            Err(err) => {
                self.message = Some(self.picker.for_undo_error(err));
                debug!(%err, "undo refused");
            }
        }
        result
    }

    fn try_undo(&mut self) -> Result<UndoEntry, UndoError> {
        if self.is_solved() {
            return Err(UndoError::Solved);
        }
        if self.is_paused() {
            return Err(UndoError::Paused);
        }
        if self.steps == 0 {
            return Err(UndoError::NothingToUndo);
        }
        let entry = self.history.pop_last().ok_or(UndoError::NothingToUndo)?;

        if let Some(pushed) = entry.pushed {
            let restored = self.board.move_box(pushed.to, pushed.from);
            debug_assert!(restored, "undo entries are replayed in reverse order");
            if self.push_animation == Some(pushed.to) {
                self.push_animation = None;
            }
        }
        self.player.position = entry.player;
        self.player.visible = true;
        self.timing.restart_player_flash();

        Ok(entry)
    }

    /// Advance the timers to `now` and apply whatever fired.
    pub fn tick(&mut self, now: Instant) -> Fired {
        let fired = self.timing.advance(now);
        for &cue in &fired {
            match cue {
                Cue::FlashPlayer => self.player.visible = !self.player.visible,
                Cue::FlashTarget => self.targets_visible = !self.targets_visible,
                Cue::EndPushAnimation => self.push_animation = None,
            }
            trace!(?cue, "cue");
        }
        fired
    }

    /// Returns false if already paused or the level is over.
    pub fn pause(&mut self) -> bool {
        if self.is_solved() || !self.timing.pause() {
            return false;
        }
        self.player.paused = true;
        self.message = Some(messages::PAUSED);
        debug!(seconds = self.timing.seconds_elapsed(), "paused");
        true
    }

    /// Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        let Some(paused_for) = self.timing.resume() else {
            return false;
        };
        self.player.paused = false;
        self.message = Some(messages::RESUMED);
        debug!(paused_ms = paused_for.as_millis() as u64, "resumed");
        true
    }

    /// Flip the pause state. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
        self.is_paused()
    }

    /// Reload the current layout from scratch, keeping the configuration.
    pub fn restart(&mut self) -> Result<(), LevelError> {
        let now = self.timing.now();
        let level = self.level;
        *self = Self::from_layout(&self.layout, now, self.config)?;
        self.level = level;
        info!(level = level.map(LevelId::number), "level restarted");
        Ok(())
    }

    pub fn select_level(&mut self, level: LevelId) -> Result<(), LevelError> {
        *self = Self::with_config(level, self.timing.now(), self.config)?;
        Ok(())
    }

    /// Load the level after the current one. Only once this one is solved.
    pub fn next_level(&mut self) -> Result<Option<LevelId>, LevelError> {
        if !self.is_solved() {
            return Ok(None);
        }
        let next = self.level.unwrap_or_default().next();
        self.select_level(next)?;
        Ok(Some(next))
    }

    /// Dispatch one input action. While paused only `Pause` (resume) does
    /// anything; moves and undo report their own refusal.
    pub fn apply_action(&mut self, action: GameAction) -> Result<ActionOutcome, LevelError> {
        let level_change = matches!(
            action,
            GameAction::Restart | GameAction::SelectLevel(_) | GameAction::NextLevel
        );
        if level_change && self.is_paused() {
            self.message = Some(messages::PAUSED);
            debug!(?action, "ignored while paused");
            return Ok(ActionOutcome::Ignored);
        }

        let outcome = match action {
            GameAction::Move(direction) => ActionOutcome::Move(self.apply_move(direction)),
            GameAction::Undo => ActionOutcome::Undo(self.undo()),
            GameAction::Pause => ActionOutcome::Paused(self.toggle_pause()),
            GameAction::Restart => {
                self.restart()?;
                ActionOutcome::LevelLoaded(self.level.unwrap_or_default())
            }
            GameAction::SelectLevel(level) => {
                self.select_level(level)?;
                ActionOutcome::LevelLoaded(level)
            }
            GameAction::NextLevel => match self.next_level()? {
                Some(level) => ActionOutcome::LevelLoaded(level),
                None => ActionOutcome::Ignored,
            },
        };
        Ok(outcome)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        let seconds = self.seconds_elapsed();
        out.player = self.player.position;
        out.player_visible = self.player.visible;
        out.targets_visible = self.targets_visible;
        out.push_animation = self.push_animation;
        out.level = self.level;
        out.steps = self.steps;
        out.seconds = seconds;
        out.score = self.score(seconds);
        out.undo_available = self.history.len() as u8;
        out.paused = self.is_paused();
        out.solved = self.is_solved();
        out.message = self.message;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Cell, UNDO_CAPACITY};
    use std::time::Duration;

    const EMPTY: &str = "________________";
    /// An unsolved box/target pair on the top row, out of the way.
    const SPARE: &str = "T______________B";

    fn engine_with(rows: [&'static str; 8], now: Instant) -> Engine {
        let rows: &'static [&'static str] = Box::leak(Box::new(rows));
        let layout = LevelLayout {
            rows,
            start: Position::new(4, 4),
        };
        Engine::from_layout(&layout, now, EngineConfig::default()).unwrap()
    }

    /// Layout row 3 (board row 4) plus the spare pair; player at (4, 4).
    fn single_row(row: &'static str, now: Instant) -> Engine {
        engine_with([SPARE, EMPTY, EMPTY, row, EMPTY, EMPTY, EMPTY, EMPTY], now)
    }

    fn ms(t0: Instant, n: u64) -> Instant {
        t0 + Duration::from_millis(n)
    }

    #[test]
    fn test_new_level_starts_clean() {
        let engine = Engine::new_level(LevelId::One, Instant::now()).unwrap();
        assert_eq!(engine.level(), Some(LevelId::One));
        assert_eq!(engine.player().position, Position::new(5, 2));
        assert_eq!(engine.steps(), 0);
        assert!(engine.history().is_empty());
        assert!(!engine.is_solved());
        assert!(!engine.is_paused());
        assert_eq!(engine.final_score(), None);
    }

    #[test]
    fn test_steps_count_diagonals_double() {
        let mut engine = single_row(EMPTY, Instant::now());

        engine.apply_move(Direction::Right);
        assert_eq!(engine.steps(), 1);
        engine.apply_move(Direction::UpLeft);
        assert_eq!(engine.steps(), 3);
        assert_eq!(engine.player().position, Position::new(5, 4));
    }

    #[test]
    fn test_blocked_move_costs_nothing() {
        let mut engine = single_row("_____W__________", Instant::now());
        let before = engine.board().clone();

        let out = engine.apply_move(Direction::Right);
        assert_eq!(out.kind, MoveKind::Blocked(BlockReason::WallHit));
        assert_eq!(engine.steps(), 0);
        assert!(engine.history().is_empty());
        assert_eq!(engine.board(), &before);
        assert!(engine.message().is_some());
    }

    #[test]
    fn test_undo_restores_box_and_keeps_steps() {
        let mut engine = single_row("_____B__________", Instant::now());
        let before = engine.board().clone();

        engine.apply_move(Direction::Right);
        assert_eq!(engine.board().get(Position::new(4, 6)), Cell::Box);

        let entry = engine.undo().unwrap();
        assert_eq!(entry.player, Position::new(4, 4));
        assert_eq!(engine.player().position, Position::new(4, 4));
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.steps(), 1);
    }

    #[test]
    fn test_undo_before_any_move_is_refused() {
        let mut engine = single_row(EMPTY, Instant::now());
        assert_eq!(engine.undo(), Err(UndoError::NothingToUndo));
        assert_eq!(engine.message(), Some(messages::NOTHING_TO_UNDO));
    }

    #[test]
    fn test_undo_depth_is_bounded() {
        let mut engine = single_row(EMPTY, Instant::now());
        for _ in 0..7 {
            engine.apply_move(Direction::Right);
        }
        for _ in 0..UNDO_CAPACITY {
            assert!(engine.undo().is_ok());
        }
        assert_eq!(engine.undo(), Err(UndoError::NothingToUndo));
        // The oldest move could not be reversed.
        assert_eq!(engine.player().position, Position::new(4, 5));
        assert_eq!(engine.steps(), 7);
    }

    #[test]
    fn test_pause_refuses_moves_and_undo() {
        let mut engine = single_row(EMPTY, Instant::now());
        engine.apply_move(Direction::Right);

        assert!(engine.pause());
        assert!(!engine.pause());
        let out = engine.apply_move(Direction::Right);
        assert_eq!(out.kind, MoveKind::Blocked(BlockReason::Paused));
        assert_eq!(engine.undo(), Err(UndoError::Paused));
        assert_eq!(engine.steps(), 1);

        assert!(engine.resume());
        assert_eq!(engine.message(), Some(messages::RESUMED));
        assert!(!engine.apply_move(Direction::Right).is_blocked());
    }

    #[test]
    fn test_level_changes_ignored_while_paused() {
        let mut engine = Engine::new_level(LevelId::One, Instant::now()).unwrap();
        engine.apply_move(Direction::Right);
        engine.pause();

        for action in [
            GameAction::Restart,
            GameAction::SelectLevel(LevelId::Two),
            GameAction::NextLevel,
        ] {
            assert_eq!(engine.apply_action(action).unwrap(), ActionOutcome::Ignored);
        }
        assert_eq!(engine.level(), Some(LevelId::One));
        assert_eq!(engine.steps(), 1);
        assert!(engine.is_paused());
        assert_eq!(engine.message(), Some(messages::PAUSED));

        assert_eq!(
            engine.apply_action(GameAction::Pause).unwrap(),
            ActionOutcome::Paused(false)
        );
        assert_eq!(
            engine.apply_action(GameAction::Restart).unwrap(),
            ActionOutcome::LevelLoaded(LevelId::One)
        );
        assert_eq!(engine.steps(), 0);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let t0 = Instant::now();
        let mut engine = single_row(EMPTY, t0);
        engine.tick(ms(t0, 3000));
        engine.pause();
        assert!(engine.tick(ms(t0, 10_000)).is_empty());
        engine.resume();
        engine.tick(ms(t0, 11_000));
        assert_eq!(engine.seconds_elapsed(), 4);
    }

    #[test]
    fn test_push_to_target_arms_animation() {
        let t0 = Instant::now();
        let mut engine = single_row("_____BT____BT___", t0);

        engine.tick(ms(t0, 100));
        let out = engine.apply_move(Direction::Right);
        assert_eq!(out.kind, MoveKind::PushedBoxToTarget);
        assert_eq!(engine.push_animation(), Some(Position::new(4, 6)));
        assert!(!engine.is_solved());

        engine.tick(ms(t0, 599));
        assert_eq!(engine.push_animation(), Some(Position::new(4, 6)));
        let fired = engine.tick(ms(t0, 600));
        assert!(fired.contains(&Cue::EndPushAnimation));
        assert_eq!(engine.push_animation(), None);
    }

    #[test]
    fn test_flash_cues_toggle_visibility() {
        let t0 = Instant::now();
        let mut engine = single_row(EMPTY, t0);

        engine.tick(ms(t0, 200));
        assert!(!engine.player().visible);
        engine.tick(ms(t0, 500));
        assert!(!engine.targets_visible());

        // A successful move shows the player again.
        engine.apply_move(Direction::Left);
        assert!(engine.player().visible);
    }

    #[test]
    fn test_solving_freezes_time_and_score() {
        let t0 = Instant::now();
        let mut engine = engine_with(
            [EMPTY, EMPTY, EMPTY, "_____BT_________", EMPTY, EMPTY, EMPTY, EMPTY],
            t0,
        );

        engine.tick(ms(t0, 2500));
        let out = engine.apply_move(Direction::Right);
        assert_eq!(out.kind, MoveKind::PushedBoxToTarget);
        assert!(engine.is_solved());
        assert_eq!(engine.final_score(), Some(compute_score(1, 2)));

        engine.tick(ms(t0, 60_000));
        assert_eq!(engine.seconds_elapsed(), 2);
        assert_eq!(
            engine.apply_move(Direction::Left).kind,
            MoveKind::Blocked(BlockReason::Solved)
        );
        assert_eq!(engine.undo(), Err(UndoError::Solved));
        assert!(!engine.pause());
    }

    #[test]
    fn test_next_level_only_after_solving() {
        let mut engine = engine_with(
            [EMPTY, EMPTY, EMPTY, "_____BT_________", EMPTY, EMPTY, EMPTY, EMPTY],
            Instant::now(),
        );
        engine.level = Some(LevelId::One);
        assert_eq!(
            engine.apply_action(GameAction::NextLevel).unwrap(),
            ActionOutcome::Ignored
        );
        assert_eq!(engine.level(), Some(LevelId::One));

        engine.apply_move(Direction::Right);
        assert!(engine.is_solved());

        assert_eq!(
            engine.apply_action(GameAction::NextLevel).unwrap(),
            ActionOutcome::LevelLoaded(LevelId::Two)
        );
        assert_eq!(engine.level(), Some(LevelId::Two));
        assert_eq!(engine.steps(), 0);
        assert!(!engine.is_solved());
        assert_eq!(engine.board().num_targets(), 4);
        assert_eq!(engine.player().position, Position::new(4, 3));
    }

    #[test]
    fn test_restart_and_select_level() {
        let mut engine = Engine::new_level(LevelId::One, Instant::now()).unwrap();
        engine.apply_move(Direction::Right);
        assert_eq!(engine.steps(), 1);

        let out = engine.apply_action(GameAction::Restart).unwrap();
        assert_eq!(out, ActionOutcome::LevelLoaded(LevelId::One));
        assert_eq!(engine.steps(), 0);
        assert_eq!(engine.player().position, Position::new(5, 2));

        let out = engine
            .apply_action(GameAction::SelectLevel(LevelId::Two))
            .unwrap();
        assert_eq!(out, ActionOutcome::LevelLoaded(LevelId::Two));
        assert_eq!(engine.level(), Some(LevelId::Two));
        assert_eq!(engine.board().num_targets(), 4);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut engine = single_row("_____B__________", Instant::now());
        engine.apply_move(Direction::Right);

        let snap = engine.snapshot();
        assert_eq!(snap.player, Position::new(4, 5));
        assert_eq!(snap.steps, 1);
        assert_eq!(snap.undo_available, 1);
        assert_eq!(snap.board[4][6], Cell::Box.bits());
        assert_eq!(snap.level, None);
        assert!(snap.playable());
    }
}
