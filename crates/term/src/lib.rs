//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget/layout libraries and instead renders into a simple
//! framebuffer that is flushed to the terminal through crossterm.
//!
//! - [`fb`]: styled cell grid
//! - [`game_view`]: snapshot to framebuffer (2 columns per field cell)
//! - [`renderer`]: diffing terminal writer

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_polyomino_core as core;
pub use tui_polyomino_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{block_rgb, AnchorY, GameView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, Run, TerminalRenderer};
