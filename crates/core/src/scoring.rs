//! Scoring module - line awards, level curve and gravity speed
//!
//! Rules:
//! - Level starts at 1 and rises every 10 cleared lines.
//! - Four lines at once award a flat 400, any other clear 100 per line.
//! - Awards are multiplied by the level reached *after* counting the lines.
//! - Gravity starts at 1000ms per row and speeds up 100ms per level, down to
//!   a 100ms floor.

use crate::types::{
    BASE_DROP_MS, DROP_INTERVAL_MIN_MS, DROP_STEP_MS, LINES_PER_LEVEL, POINTS_FOUR_LINES,
    POINTS_PER_LINE,
};

/// Score, cleared lines and level for one game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoringSystem {
    score: u32,
    lines_cleared: u32,
    level: u32,
}

impl ScoringSystem {
    pub fn new() -> Self {
        Self {
            score: 0,
            lines_cleared: 0,
            level: 1,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    /// Add `points` scaled by the current level.
    pub fn add_score(&mut self, points: u32) {
        self.score = self
            .score
            .saturating_add(points.saturating_mul(self.level));
    }

    /// Record a clear of `lines` rows and return the points awarded.
    pub fn add_lines(&mut self, lines: u32) -> u32 {
        if lines == 0 {
            return 0;
        }

        self.lines_cleared = self.lines_cleared.saturating_add(lines);
        self.level = calculate_level(self.lines_cleared);

        let awarded = calculate_line_score(lines, self.level);
        self.score = self.score.saturating_add(awarded);
        awarded
    }

    /// Current gravity interval in milliseconds
    pub fn drop_interval_ms(&self) -> u32 {
        get_drop_interval_ms(self.level)
    }
}

impl Default for ScoringSystem {
    fn default() -> Self {
        Self::new()
    }
}

/// Level for a cumulative line count (1-based)
pub fn calculate_level(total_lines: u32) -> u32 {
    total_lines / LINES_PER_LEVEL + 1
}

/// Points for clearing `lines` rows at once at `level`
pub fn calculate_line_score(lines: u32, level: u32) -> u32 {
    let base = match lines {
        0 => 0,
        4 => POINTS_FOUR_LINES,
        n => POINTS_PER_LINE.saturating_mul(n),
    };
    base.saturating_mul(level)
}

/// Get drop interval for a level (in milliseconds)
pub fn get_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS
        .saturating_sub(speedup)
        .max(DROP_INTERVAL_MIN_MS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_scoring_starts_at_level_one() {
        let s = ScoringSystem::new();
        assert_eq!(s.score(), 0);
        assert_eq!(s.lines_cleared(), 0);
        assert_eq!(s.level(), 1);
        assert_eq!(s.drop_interval_ms(), 1000);
    }

    #[test]
    fn test_zero_lines_is_noop() {
        let mut s = ScoringSystem::new();
        assert_eq!(s.add_lines(0), 0);
        assert_eq!(s, ScoringSystem::new());
    }

    #[test]
    fn test_line_scores() {
        assert_eq!(calculate_line_score(1, 1), 100);
        assert_eq!(calculate_line_score(2, 1), 200);
        assert_eq!(calculate_line_score(3, 1), 300);
        assert_eq!(calculate_line_score(4, 1), 400);
        assert_eq!(calculate_line_score(5, 1), 500);

        assert_eq!(calculate_line_score(3, 4), 1200);
        assert_eq!(calculate_line_score(4, 4), 1600);
    }

    #[test]
    fn test_award_uses_level_after_update() {
        let mut s = ScoringSystem::new();
        assert_eq!(s.add_lines(3), 300);
        assert_eq!(s.add_lines(3), 300);
        assert_eq!(s.add_lines(3), 300);
        assert_eq!(s.lines_cleared(), 9);
        assert_eq!(s.level(), 1);

        // 9 + 4 = 13 lines -> level 2 before the award is computed.
        assert_eq!(s.add_lines(4), 800);
        assert_eq!(s.level(), 2);
        assert_eq!(s.score(), 900 + 800);
    }

    #[test]
    fn test_four_lines_bonus_at_level() {
        let mut s = ScoringSystem::new();
        s.add_lines(20);
        assert_eq!(s.level(), 3);
        let before = s.score();
        // 24 lines -> still level 3.
        assert_eq!(s.add_lines(4), 400 * 3);
        assert_eq!(s.score(), before + 1200);
    }

    #[test]
    fn test_add_score_scales_by_level() {
        let mut s = ScoringSystem::new();
        s.add_score(10);
        assert_eq!(s.score(), 10);
        s.add_lines(10);
        let before = s.score();
        s.add_score(10);
        assert_eq!(s.score(), before + 20);
    }

    #[test]
    fn test_level_calculation() {
        assert_eq!(calculate_level(0), 1);
        assert_eq!(calculate_level(9), 1);
        assert_eq!(calculate_level(10), 2);
        assert_eq!(calculate_level(25), 3);
        assert_eq!(calculate_level(100), 11);
    }

    #[test]
    fn test_drop_intervals() {
        assert_eq!(get_drop_interval_ms(1), 1000);
        assert_eq!(get_drop_interval_ms(3), 700);
        assert_eq!(get_drop_interval_ms(10), 100);
        assert_eq!(get_drop_interval_ms(11), 100);
        assert_eq!(get_drop_interval_ms(50), 100);
        // Level 0 never occurs, but must not underflow.
        assert_eq!(get_drop_interval_ms(0), 1000);
    }

    #[test]
    fn test_twenty_five_lines() {
        let mut s = ScoringSystem::new();
        s.add_lines(25);
        assert_eq!(s.level(), 3);
        assert_eq!(s.drop_interval_ms(), 700);
    }
}
