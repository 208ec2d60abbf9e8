//! Terminal "game renderer" module.
//!
//! Renders a [`core::GameSnapshot`] into a plain framebuffer of styled
//! characters, then flushes that to the terminal with crossterm, sending only
//! the cells that changed since the previous frame.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_sokoban_core as core;
pub use tui_sokoban_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
