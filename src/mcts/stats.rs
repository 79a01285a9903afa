//! Counters for one search, kept for logging and tuning the budget.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What the last search did. Reset at the start of every search.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Playouts run; equals the root's visit count when the search ends.
    pub iterations: u32,

    /// Children added to the tree.
    pub nodes_expanded: u32,

    /// Playouts that started from an end-of-turn node, i.e. needed no
    /// random cards at all.
    pub terminal_hits: u32,

    /// Deepest child created, in cards played after the root.
    pub max_depth: u16,

    /// Wall-clock time of the search (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.time_us)
    }

    /// Playouts per second, or 0 before the first timed search.
    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        match self.elapsed().as_secs_f64() {
            secs if secs > 0.0 => f64::from(self.iterations) / secs,
            _ => 0.0,
        }
    }

    /// Share of playouts that reached a node with no expansion left to do.
    ///
    /// Near the end of a turn this approaches 1, which means the budget
    /// is larger than the remaining game tree.
    #[must_use]
    pub fn terminal_ratio(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            f64::from(self.terminal_hits) / f64::from(self.iterations)
        }
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} playouts, {} nodes, depth {}, {:.0}/s",
            self.iterations,
            self.nodes_expanded,
            self.max_depth,
            self.iterations_per_second()
        )
    }
}
