//! Statistics collection for MCTS searches
//!
//! This module provides structures for collecting and reporting statistics
//! about a single move decision.

use std::time::Duration;

/// Statistics collected while deciding one move
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    /// Number of iterations performed
    pub iterations: usize,

    /// Total time spent searching
    pub total_time: Duration,

    /// Time budget the search was given
    pub budget: Duration,

    /// Total number of nodes in the tree when the search ended
    pub tree_size: usize,

    /// Maximum depth reached by selection
    pub max_depth: usize,

    /// Whether the search was stopped by the time budget
    pub stopped_early: bool,

    /// Whether the root was carried over from the previous move
    pub tree_reused: bool,

    /// Number of plies the previous root was advanced by
    pub plies_advanced: usize,

    /// Rollout moves the rules engine refused despite enumeration
    pub rejected_rollout_moves: usize,
}

impl SearchStatistics {
    /// Creates a new, empty statistics object
    pub fn new() -> Self {
        SearchStatistics {
            iterations: 0,
            total_time: Duration::from_secs(0),
            budget: Duration::from_secs(0),
            tree_size: 1, // Start with root node
            max_depth: 0,
            stopped_early: false,
            tree_reused: false,
            plies_advanced: 0,
            rejected_rollout_moves: 0,
        }
    }

    /// Returns the average time per iteration in microseconds
    pub fn avg_time_per_iteration_us(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.total_time.as_micros() as f64 / self.iterations as f64
    }

    /// Returns the number of iterations per second
    pub fn iterations_per_second(&self) -> f64 {
        if self.total_time.as_secs_f64() <= 0.0 {
            return 0.0;
        }
        self.iterations as f64 / self.total_time.as_secs_f64()
    }

    /// Returns a summary of the statistics as a string
    pub fn summary(&self) -> String {
        format!(
            "MCTS Search Statistics:\n\
             - Iterations: {}\n\
             - Total time: {:.3} seconds (budget {:.3})\n\
             - Tree size: {} nodes\n\
             - Max depth: {}\n\
             - Avg time per iteration: {:.3} µs\n\
             - Iterations per second: {:.1}\n\
             - Stopped early: {}\n\
             - Tree reused: {} ({} plies)\n\
             - Rejected rollout moves: {}",
            self.iterations,
            self.total_time.as_secs_f64(),
            self.budget.as_secs_f64(),
            self.tree_size,
            self.max_depth,
            self.avg_time_per_iteration_us(),
            self.iterations_per_second(),
            self.stopped_early,
            self.tree_reused,
            self.plies_advanced,
            self.rejected_rollout_moves
        )
    }
}

impl Default for SearchStatistics {
    fn default() -> Self {
        Self::new()
    }
}
