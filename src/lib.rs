//! TUI Sokoban (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches can write `tui_sokoban::core::...`.

pub use tui_sokoban_core as core;
pub use tui_sokoban_input as input;
pub use tui_sokoban_term as term;
pub use tui_sokoban_types as types;
