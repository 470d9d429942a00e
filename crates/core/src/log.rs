//! Diagnostic log - a bounded ring of recent messages
//!
//! The game state records what it did (spawns, swaps, locks, clears) so the
//! terminal view can show the most recent lines. Nothing reads the log back to
//! make decisions; a disabled log behaves identically apart from being empty.

use std::collections::VecDeque;
use std::fmt;

use crate::types::LOG_CAPACITY;

#[derive(Debug, Clone)]
pub struct RingLog {
    enabled: bool,
    capacity: usize,
    lines: VecDeque<String>,
}

impl RingLog {
    /// Create an enabled log holding at most `capacity` lines (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            enabled: true,
            capacity,
            lines: VecDeque::with_capacity(capacity),
        }
    }

    /// A log that drops everything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            capacity: LOG_CAPACITY,
            lines: VecDeque::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a message, evicting the oldest line when full.
    ///
    /// Takes pre-captured arguments so a disabled log never formats:
    /// `log.record(format_args!("locked {} blocks", n))`.
    pub fn record(&mut self, args: fmt::Arguments<'_>) {
        if !self.enabled {
            return;
        }
        if self.lines.len() >= self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(args.to_string());
    }

    /// All retained lines, oldest first.
    pub fn lines(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator + '_ {
        self.lines.iter().map(String::as_str)
    }

    /// The last `n` lines, oldest first.
    pub fn recent(&self, n: usize) -> impl ExactSizeIterator<Item = &str> + '_ {
        let skip = self.lines.len().saturating_sub(n);
        self.lines.iter().skip(skip).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Default for RingLog {
    fn default() -> Self {
        Self::new(LOG_CAPACITY)
    }
}
