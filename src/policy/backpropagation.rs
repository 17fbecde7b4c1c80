//! Backpropagation policies for the MCTS algorithm
//!
//! Backpropagation policies determine how to update node statistics
//! after a simulation.

use crate::{
    board::{previous_mover, Board, Color},
    tree::TreeNode,
};

/// Trait for policies that backpropagate simulation results
pub trait BackpropagationPolicy<B: Board>: Send + Sync {
    /// Updates statistics for a node based on a simulation result
    fn update_stats(&self, node: &mut TreeNode<B>, winner: Option<Color>);

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<B>>;
}

/// Standard backpropagation policy
///
/// Counts a visit on every node and a win when the playout was won by the
/// player who moved into the node, i.e. the player before the node's mover.
#[derive(Debug, Clone)]
pub struct StandardPolicy;

impl StandardPolicy {
    /// Creates a new standard policy
    pub fn new() -> Self {
        StandardPolicy
    }
}

impl Default for StandardPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Board> BackpropagationPolicy<B> for StandardPolicy {
    fn update_stats(&self, node: &mut TreeNode<B>, winner: Option<Color>) {
        node.visits += 1;
        if winner == Some(previous_mover(node.mover)) {
            node.wins += 1;
        }
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<B>> {
        Box::new(self.clone())
    }
}

// Implement BackpropagationPolicy for Box<dyn BackpropagationPolicy>
impl<B: Board> BackpropagationPolicy<B> for Box<dyn BackpropagationPolicy<B>> {
    fn update_stats(&self, node: &mut TreeNode<B>, winner: Option<Color>) {
        (**self).update_stats(node, winner)
    }

    fn clone_box(&self) -> Box<dyn BackpropagationPolicy<B>> {
        (**self).clone_box()
    }
}
