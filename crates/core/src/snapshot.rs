//! Read-only view of a game for renderers.
//!
//! `GameState::snapshot_into` refills an existing snapshot so a frame loop can
//! keep one around. The cell grid and the log line buffers are reused, and
//! only the last `log_limit` log lines are copied.

use crate::polyomino::PieceBlocks;
use crate::types::{Cell, FIELD_HEIGHT, FIELD_WIDTH, LOG_CAPACITY};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: i32,
    pub height: i32,
    /// Placed cells, row-major (`y * width + x`).
    pub cells: Vec<Cell>,
    /// Active piece in absolute field coordinates (may include y < 0).
    pub active: PieceBlocks,
    /// Preview piece in its own local coordinates.
    pub next: PieceBlocks,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub elapsed_ms: u64,
    pub drop_interval_ms: u32,
    pub started: bool,
    pub paused: bool,
    pub game_over: bool,
    pub has_swapped: bool,
    /// Most recent diagnostic lines, oldest first.
    pub log: Vec<String>,
    /// Upper bound on lines copied into `log`. Not reset by [`clear`](Self::clear).
    pub log_limit: usize,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = FIELD_WIDTH;
        self.height = FIELD_HEIGHT;
        self.cells.clear();
        self.cells
            .resize((FIELD_WIDTH * FIELD_HEIGHT) as usize, None);
        self.active.clear();
        self.next.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.elapsed_ms = 0;
        self.drop_interval_ms = 0;
        self.started = false;
        self.paused = false;
        self.game_over = false;
        self.has_swapped = false;
        self.log.clear();
    }

    /// Cell at `(x, y)`; `None` outside the field or when empty.
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        self.cells
            .get((y * self.width + x) as usize)
            .copied()
            .flatten()
    }

    pub fn playable(&self) -> bool {
        self.started && !self.game_over && !self.paused
    }

    /// The last `n` log lines, oldest first.
    pub fn recent_log(&self, n: usize) -> &[String] {
        let start = self.log.len().saturating_sub(n);
        &self.log[start..]
    }

    /// Replace `log` with `lines`, writing into the existing strings.
    pub(crate) fn fill_log<'a>(&mut self, lines: impl Iterator<Item = &'a str>) {
        let mut n = 0;
        for line in lines {
            match self.log.get_mut(n) {
                Some(buf) => {
                    buf.clear();
                    buf.push_str(line);
                }
                None => self.log.push(line.to_owned()),
            }
            n += 1;
        }
        self.log.truncate(n);
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            cells: Vec::new(),
            active: PieceBlocks::new(),
            next: PieceBlocks::new(),
            score: 0,
            level: 1,
            lines: 0,
            elapsed_ms: 0,
            drop_interval_ms: 0,
            started: false,
            paused: false,
            game_over: false,
            has_swapped: false,
            log: Vec::new(),
            log_limit: LOG_CAPACITY,
        };
        s.clear();
        s
    }
}
