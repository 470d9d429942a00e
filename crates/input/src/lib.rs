//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The core
//! never sees key codes; anything that can produce a `GameAction` can drive it.

pub mod map;

pub use tui_polyomino_types as types;

pub use map::{handle_key_event, should_quit};
