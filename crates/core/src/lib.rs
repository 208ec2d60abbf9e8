//! Core game logic - pure, deterministic, and testable
//!
//! Everything here runs on one thread with no I/O. Time comes in as
//! [`std::time::Instant`] values from the caller, so tests can drive the
//! clock directly.
//!
//! # Module Structure
//!
//! - [`board`]: 8x16 toroidal grid of cells
//! - [`levels`]: compiled-in layouts and their validation
//! - [`resolver`]: walking and pushing rules
//! - [`undo`]: six-deep move history
//! - [`scoring`]: win detection and score formula
//! - [`timing`]: poll-driven flash and animation timers
//! - [`messages`]: status-line texts
//! - [`engine`]: one level in play, tying the above together
//!
//! # Rules
//!
//! - The board wraps in both directions; there are no edges.
//! - A push moves exactly one box. A box cannot be pushed into a wall, another
//!   box, or a box already sitting on a target.
//! - Diagonal moves cost two steps and check only the destination squares.
//! - The level is solved when every target holds a box.
//!
//! # Example
//!
//! ```
//! use std::time::Instant;
//! use tui_sokoban_core::Engine;
//! use tui_sokoban_types::{Direction, LevelId};
//!
//! let mut engine = Engine::new_level(LevelId::One, Instant::now()).unwrap();
//! let outcome = engine.apply_move(Direction::Right);
//!
//! assert!(!outcome.is_blocked());
//! assert_eq!(engine.steps(), 1);
//! assert!(engine.undo().is_ok());
//! ```

pub mod board;
pub mod engine;
pub mod error;
pub mod levels;
pub mod messages;
pub mod resolver;
pub mod scoring;
pub mod snapshot;
pub mod timing;
pub mod undo;

pub use tui_sokoban_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use engine::{ActionOutcome, Engine, EngineConfig};
pub use error::{LevelError, UndoError};
pub use levels::{LevelLayout, LEVEL_ONE, LEVEL_TWO};
pub use messages::MessagePicker;
pub use resolver::{resolve_move, PlayerState};
pub use scoring::{compute_score, is_solved};
pub use snapshot::GameSnapshot;
pub use timing::{Cue, Fired, TimerPhase, TimingConfig, TimingCoordinator};
pub use undo::{UndoEntry, UndoHistory};
