//! Configuration options for the MCTS algorithm
//!
//! This module defines the configuration parameters that control the
//! behavior of the search and the per-move time budget.

use std::time::Duration;

use crate::{MCTSError, Result};

/// Criteria for selecting the best child after search is complete
///
/// This determines how the final move is selected once the time budget is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestChildCriteria {
    /// Select the child with the highest wins/visits ratio
    ///
    /// Ties go to the child enumerated first. A child with few visits can show
    /// an extreme ratio; pair this with
    /// [`MCTSConfig::min_visits_for_decision`] when that matters.
    WinRatio,

    /// Select the child with the most visits
    ///
    /// Relies on statistical confidence rather than a possibly noisy ratio.
    MostVisits,
}

/// Configuration for the MCTS algorithm
///
/// Use the builder methods to create a customized configuration.
///
/// # Example
///
/// ```
/// use trichess_mcts::{MCTSConfig, config::BestChildCriteria};
/// use std::time::Duration;
///
/// let config = MCTSConfig::default()
///     .with_exploration_constant(1.5)
///     .with_budget_divisor(30)
///     .with_max_time(Duration::from_secs(5))
///     .with_best_child_criteria(BestChildCriteria::MostVisits)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct MCTSConfig {
    /// Exploration constant for UCB1
    ///
    /// The standard value is sqrt(2).
    pub exploration_constant: f64,

    /// The move budget is the mover's remaining clock time divided by this
    pub budget_divisor: u32,

    /// Upper bound on the per-move budget, if any
    pub max_time: Option<Duration>,

    /// Maximum number of iterations per move, if any
    ///
    /// The search stops at whichever of the budget and this limit comes first.
    pub max_iterations: Option<usize>,

    /// Criteria for selecting the best child after search
    pub best_child_criteria: BestChildCriteria,

    /// Children with fewer visits are skipped at decision time,
    /// unless no child has that many
    pub min_visits_for_decision: u64,

    /// Rollouts longer than this many plies end without a winner
    pub max_rollout_plies: Option<usize>,

    /// Whether to carry the tree over from one move to the next
    pub reuse_tree: bool,

    /// Seed for the rollout random number generator (entropy when None)
    pub seed: Option<u64>,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        MCTSConfig {
            exploration_constant: std::f64::consts::SQRT_2,
            budget_divisor: 25,
            max_time: None,
            max_iterations: None,
            best_child_criteria: BestChildCriteria::WinRatio,
            min_visits_for_decision: 0,
            max_rollout_plies: None,
            reuse_tree: true,
            seed: None,
        }
    }
}

impl MCTSConfig {
    /// Sets the exploration constant
    pub fn with_exploration_constant(mut self, constant: f64) -> Self {
        self.exploration_constant = constant;
        self
    }

    /// Sets the fraction of the remaining clock spent per move (1 / divisor)
    pub fn with_budget_divisor(mut self, divisor: u32) -> Self {
        self.budget_divisor = divisor;
        self
    }

    /// Caps the time spent on a single move
    pub fn with_max_time(mut self, duration: Duration) -> Self {
        self.max_time = Some(duration);
        self
    }

    /// Sets the maximum number of iterations per move
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Sets the criteria for selecting the best child
    pub fn with_best_child_criteria(mut self, criteria: BestChildCriteria) -> Self {
        self.best_child_criteria = criteria;
        self
    }

    /// Sets the minimum visits a child needs to be chosen as the move
    pub fn with_min_visits_for_decision(mut self, visits: u64) -> Self {
        self.min_visits_for_decision = visits;
        self
    }

    /// Bounds the length of a rollout
    pub fn with_max_rollout_plies(mut self, plies: usize) -> Self {
        self.max_rollout_plies = Some(plies);
        self
    }

    /// Enables or disables tree reuse between moves
    pub fn with_tree_reuse(mut self, reuse: bool) -> Self {
        self.reuse_tree = reuse;
        self
    }

    /// Seeds the rollout random number generator
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Computes the time budget for a move given the mover's remaining clock
    pub fn move_budget(&self, remaining: Duration) -> Duration {
        let budget = remaining / self.budget_divisor.max(1);
        match self.max_time {
            Some(cap) => budget.min(cap),
            None => budget,
        }
    }

    /// Checks the configuration for values the search cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.budget_divisor == 0 {
            return Err(MCTSError::InvalidConfiguration(
                "budget divisor must be at least 1".to_string(),
            ));
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(MCTSError::InvalidConfiguration(format!(
                "exploration constant must be finite and non-negative, got {}",
                self.exploration_constant
            )));
        }
        Ok(())
    }
}
