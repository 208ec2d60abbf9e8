//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Every key
//! press is one discrete action; there is no key repeat handling beyond what
//! the terminal itself sends.

pub mod map;

pub use tui_sokoban_types as types;

pub use map::{handle_key_event, should_quit};
