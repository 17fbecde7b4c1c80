//! Simulation policies for the MCTS algorithm
//!
//! Simulation policies play a game out from a given state to estimate who
//! is likely to win from there.

use rand::{seq::SliceRandom, Rng, RngCore};

use crate::{
    board::{Board, Color},
    enumerator,
    move_key::MoveKey,
};

/// Outcome of one playout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rollout {
    /// Winner of the playout, None if it ended without one
    pub winner: Option<Color>,

    /// Plies applied (or attempted) during the playout
    pub plies: usize,

    /// Moves the rules engine refused although they were enumerated as legal
    pub rejected_moves: usize,
}

/// Trait for policies that simulate games
pub trait SimulationPolicy<B: Board>: Send + Sync {
    /// Plays a game out from `state` without touching it and reports the result
    fn simulate(&self, state: &B, rng: &mut dyn RngCore) -> Rollout;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SimulationPolicy<B>>;
}

/// Random simulation policy
///
/// Each ply picks a uniformly random square held by the player to move,
/// retrying with another square while the chosen one has no legal move, then
/// plays a uniformly random legal move of that piece.
#[derive(Debug, Clone, Default)]
pub struct RandomPolicy {
    /// Playouts longer than this end without a winner
    pub max_plies: Option<usize>,
}

impl RandomPolicy {
    /// Creates a new random policy
    pub fn new() -> Self {
        RandomPolicy { max_plies: None }
    }

    /// Ends playouts without a winner after `plies` plies
    pub fn with_max_plies(mut self, plies: usize) -> Self {
        self.max_plies = Some(plies);
        self
    }
}

impl<B: Board> SimulationPolicy<B> for RandomPolicy {
    fn simulate(&self, state: &B, rng: &mut dyn RngCore) -> Rollout {
        let mut board = state.clone();
        let mut rollout = Rollout {
            winner: None,
            plies: 0,
            rejected_moves: 0,
        };

        while !board.is_game_over() {
            if self.max_plies.is_some_and(|max| rollout.plies >= max) {
                log::trace!("Rollout cut off after {} plies", rollout.plies);
                return rollout;
            }

            let Some(key) = pick_random_move(&board, rng) else {
                log::debug!(
                    "{} has no legal move in rollout after {} plies",
                    board.turn(),
                    rollout.plies
                );
                return rollout;
            };

            rollout.plies += 1;
            if let Err(err) = board.apply_move(key.origin, key.destination) {
                rollout.rejected_moves += 1;
                log::warn!(
                    "Rules engine rejected rollout move {} that was enumerated as legal: {}",
                    key,
                    err
                );
            }
        }

        rollout.winner = board.winner();
        rollout
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<B>> {
        Box::new(self.clone())
    }
}

/// Draws squares of the player to move without replacement until one has a
/// legal move, then picks one of its moves uniformly.
fn pick_random_move<B: Board>(
    board: &B,
    rng: &mut dyn RngCore,
) -> Option<MoveKey<B::Position>> {
    let mut positions = board.positions_of(board.turn());
    while !positions.is_empty() {
        let origin = positions.swap_remove(rng.gen_range(0..positions.len()));
        let moves = enumerator::legal_moves_from(board, origin);
        if let Some(&key) = moves.choose(rng) {
            return Some(key);
        }
    }
    None
}

// Implement SimulationPolicy for Box<dyn SimulationPolicy>
impl<B: Board> SimulationPolicy<B> for Box<dyn SimulationPolicy<B>> {
    fn simulate(&self, state: &B, rng: &mut dyn RngCore) -> Rollout {
        (**self).simulate(state, rng)
    }

    fn clone_box(&self) -> Box<dyn SimulationPolicy<B>> {
        (**self).clone_box()
    }
}
