//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation
//! logic. It has **zero dependencies** on terminal I/O, so the same engine runs
//! under the terminal front end, in integration tests and in benches.
//!
//! # Module Structure
//!
//! - [`polyomino`]: piece shape, fixed rotation pivot, move and rotate
//! - [`generator`]: random connected pieces grown one neighbor at a time
//! - [`field`]: placed blocks, collision classification, locking, line clear
//!   and the unsupported-block settle
//! - [`scoring`]: line awards, level curve and gravity speed
//! - [`game_state`]: active/preview pieces, wall kicks, swap, timing, lifecycle
//! - [`rng`]: seeded LCG used by the generator
//! - [`log`]: bounded ring of diagnostic messages
//! - [`snapshot`]: read-only view for renderers
//!
//! # Game Rules
//!
//! - **Random polyominoes**: every piece has 2 to 6 blocks in one color
//! - **Simple kicks**: a rotation that hits a wall or the floor tries five
//!   fixed offsets; one that hits a placed block is refused
//! - **Swap**: exchange the active and preview pieces, once per piece
//! - **Settle**: after a clear, floating blocks fall one row per pass
//! - **Scoring**: 100 per line, 400 for four at once, times the level
//!
//! # Example
//!
//! ```
//! use tui_polyomino_core::GameState;
//! use tui_polyomino_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! let event = game.take_last_event().unwrap();
//! assert!(event.blocks_placed > 0);
//! assert!(!game.game_over());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) with the elapsed
//! milliseconds. Gravity moves the piece one row per drop interval (1000ms at
//! level 1, 100ms faster per level, never below 100ms).

pub mod field;
pub mod game_state;
pub mod generator;
pub mod log;
pub mod polyomino;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_polyomino_types as types;

// Re-export commonly used types for convenience
pub use field::{Field, LineClear, LockOutcome};
pub use game_state::GameState;
pub use generator::generate;
pub use log::RingLog;
pub use polyomino::{PieceBlocks, Polyomino};
pub use rng::SimpleRng;
pub use scoring::{calculate_level, calculate_line_score, get_drop_interval_ms, ScoringSystem};
pub use snapshot::GameSnapshot;
