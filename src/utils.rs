//! Utility functions for the MCTS algorithm
//!
//! This module contains the scoring helpers shared by selection and the final
//! move decision.

/// Calculates the exploration term for UCB1
///
/// This is the term that encourages exploration of less-visited nodes.
pub fn exploration_term(parent_visits: u64, child_visits: u64, exploration_constant: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }

    exploration_constant * ((parent_visits as f64).ln() / child_visits as f64).sqrt()
}

/// Calculates the UCB1 value for a node
///
/// UCB1 balances exploitation (using known good nodes) with exploration
/// (trying less-visited nodes that might be better).
pub fn ucb1_value(wins: u64, visits: u64, parent_visits: u64, exploration_constant: f64) -> f64 {
    if visits == 0 {
        return f64::INFINITY;
    }

    win_rate(wins, visits) + exploration_term(parent_visits, visits, exploration_constant)
}

/// Safely calculates the win rate from wins and visits
///
/// Returns 0.0 if no visits have occurred.
pub fn win_rate(wins: u64, visits: u64) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    wins as f64 / visits as f64
}
