//! TUI Polyomino (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_polyomino::{core,input,term,types}`
//! and holds the runtime configuration used by the binary.

pub mod config;

pub use tui_polyomino_core as core;
pub use tui_polyomino_input as input;
pub use tui_polyomino_term as term;
pub use tui_polyomino_types as types;

pub use config::GameConfig;
