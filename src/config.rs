//! Runtime configuration from environment variables.
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `POLYOMINO_SEED` | clock | RNG seed |
//! | `POLYOMINO_TICK_MS` | 16 | loop tick |
//! | `POLYOMINO_LOG_DISABLED` | unset | `1`/`true` turns the diagnostic log off |
//! | `POLYOMINO_LOG_LINES` | 5 | log lines shown in the side panel |
//!
//! Unparseable values fall back to the default.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::TICK_MS;

/// Log lines shown by default.
pub const DEFAULT_LOG_LINES: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    pub tick_ms: u32,
    pub log_enabled: bool,
    pub log_lines: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            tick_ms: TICK_MS,
            log_enabled: true,
            log_lines: DEFAULT_LOG_LINES,
        }
    }
}

impl GameConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("POLYOMINO_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let tick_ms = lookup("POLYOMINO_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(TICK_MS);

        let log_enabled = !lookup("POLYOMINO_LOG_DISABLED")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        let log_lines = lookup("POLYOMINO_LOG_LINES")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(DEFAULT_LOG_LINES);

        Self {
            seed,
            tick_ms,
            log_enabled,
            log_lines,
        }
    }
}

fn is_truthy(v: &str) -> bool {
    let v = v.trim();
    v == "1" || v.eq_ignore_ascii_case("true")
}

/// Seed derived from the wall clock; any value works.
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32 ^ d.as_secs() as u32)
        .unwrap_or(1)
}
