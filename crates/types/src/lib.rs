//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, tests).
//!
//! # Field Dimensions
//!
//! The default playfield is 15 columns by 25 rows:
//!
//! - **x** grows to the right, `0..FIELD_WIDTH`
//! - **y** grows downward, `0..FIELD_HEIGHT`
//! - **y < 0** is the spawn buffer above the visible field. It is never a
//!   collision by itself, so freshly spawned pieces can hang above the top edge.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest gravity |
//!
//! # Examples
//!
//! ```
//! use tui_polyomino_types::{Color, GameAction, Position, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let p = Position::new(3, -1);
//! assert_eq!(p.offset(1, 2), Position::new(4, 1));
//!
//! assert_eq!(Color::from_str("cyan"), Some(Color::Cyan));
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//!
//! assert_eq!(FIELD_WIDTH, 15);
//! assert_eq!(FIELD_HEIGHT, 25);
//! ```

/// Field width in cells (15 columns)
pub const FIELD_WIDTH: i32 = 15;

/// Field height in cells (25 rows)
pub const FIELD_HEIGHT: i32 = 25;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level gained
pub const DROP_STEP_MS: u32 = 100;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cleared line (multiplied by line count and level)
pub const POINTS_PER_LINE: u32 = 100;

/// Flat award for clearing exactly four lines at once (multiplied by level)
pub const POINTS_FOUR_LINES: u32 = 400;

/// Largest piece the generator can build: the origin block plus five more.
pub const MAX_PIECE_BLOCKS: usize = 6;

/// Additional blocks drawn per piece, inclusive range `1..=MAX_EXTRA_BLOCKS`.
pub const MAX_EXTRA_BLOCKS: u32 = 5;

/// Diagnostic log capacity; older lines are dropped first.
pub const LOG_CAPACITY: usize = 100;

/// Positional kicks tried, in order, after a rotation hits a wall or the floor.
///
/// Applied to the piece origin only; the rotated shape is kept.
pub const KICK_OFFSETS: [(i32, i32); 5] = [(1, 0), (-1, 0), (0, -1), (2, 0), (-2, 0)];

/// Integer cell coordinate. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Return this position shifted by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four edge-adjacent cells: right, left, below, above.
    pub const fn neighbors(self) -> [Position; 4] {
        [
            self.offset(1, 0),
            self.offset(-1, 0),
            self.offset(0, 1),
            self.offset(0, -1),
        ]
    }
}

/// Block colors. Every piece is drawn in one of these seven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Blue,
    Red,
    Green,
    Yellow,
    Cyan,
    Magenta,
    White,
}

impl Color {
    /// The full palette, in draw order.
    pub const ALL: [Color; 7] = [
        Color::Blue,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Cyan,
        Color::Magenta,
        Color::White,
    ];

    /// Parse a color from its lowercase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_polyomino_types::Color;
    ///
    /// assert_eq!(Color::from_str("Blue"), Some(Color::Blue));
    /// assert_eq!(Color::from_str("orange"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blue" => Some(Color::Blue),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "cyan" => Some(Color::Cyan),
            "magenta" => Some(Color::Magenta),
            "white" => Some(Color::White),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Cyan => "cyan",
            Color::Magenta => "magenta",
            Color::White => "white",
        }
    }
}

/// A single colored unit cell.
///
/// Inside a piece the position is local to the piece origin; on the field it
/// is absolute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub pos: Position,
    pub color: Color,
}

impl Block {
    pub const fn new(x: i32, y: i32, color: Color) -> Self {
        Self {
            pos: Position::new(x, y),
            color,
        }
    }
}

/// A cell on the field
///
/// - `None`: Empty cell
/// - `Some(Color)`: Cell holds a placed block of that color
pub type Cell = Option<Color>;

/// Result of testing a piece placement against the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Every block is inside the field (or above it) on an empty cell.
    None,
    /// A block is left of, right of, or below the field.
    Wall,
    /// A block overlaps a placed block.
    Block,
}

impl Collision {
    pub fn is_none(&self) -> bool {
        matches!(self, Collision::None)
    }
}

/// Game actions that can be applied to modify game state
///
/// Each action maps to one handler on the game state. The core does not care
/// whether they come from a keyboard, a script or a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (never locks)
    SoftDrop,
    /// Drop piece to its lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise, with wall kicks
    Rotate,
    /// Exchange the active piece with the preview piece (once per piece)
    Swap,
    /// Toggle pause state
    Pause,
    /// Restart the game (the only action accepted after game over)
    Restart,
}

impl GameAction {
    /// Parse action from a camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_polyomino_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("swap"), Some(GameAction::Swap));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "swap" => Some(GameAction::Swap),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Swap => "swap",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// Core-side summary of the most recent lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoreLastEvent {
    /// Blocks written to the field (blocks above the top edge are dropped).
    pub blocks_placed: u32,
    pub lines_cleared: u32,
    /// Rows the post-clear settle moved floating blocks down.
    pub settle_passes: u32,
    pub points: u32,
    pub topped_out: bool,
}
