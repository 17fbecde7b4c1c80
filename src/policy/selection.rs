//! Selection policies for the MCTS algorithm
//!
//! Selection policies determine which child to descend into during the
//! selection phase of MCTS, balancing exploration and exploitation.

use crate::{
    board::Board,
    tree::{NodeId, SearchTree},
    utils,
};

/// Trait for policies that select nodes to explore
pub trait SelectionPolicy<B: Board>: Send + Sync {
    /// Picks the child of `node` to descend into, or None if it has no children
    fn select_child(&self, tree: &SearchTree<B>, node: NodeId) -> Option<NodeId>;

    /// Create a boxed clone of this policy
    fn clone_box(&self) -> Box<dyn SelectionPolicy<B>>;
}

/// Upper Confidence Bound 1 (UCB1) selection policy
///
/// This is the classic selection policy for MCTS:
///
/// ```text
/// UCB1 = wins / visits + exploration_constant * sqrt(ln(parent_visits) / visits)
/// ```
///
/// An unvisited child is always taken before any scored one; among several
/// unvisited children the first in enumeration order wins. Scored children
/// are compared in enumeration order and a later child only replaces the
/// current best when its score is strictly greater, so ties go to the child
/// enumerated first.
#[derive(Debug, Clone)]
pub struct UCB1Policy {
    /// Exploration constant that controls the balance between exploration and exploitation.
    /// Higher values favor exploration of less-visited nodes.
    pub exploration_constant: f64,
}

impl UCB1Policy {
    /// Creates a new UCB1 policy with the given exploration constant
    pub fn new(exploration_constant: f64) -> Self {
        UCB1Policy {
            exploration_constant,
        }
    }

    /// Calculates the UCB1 value for a child
    pub fn ucb1_value(&self, child_wins: u64, child_visits: u64, parent_visits: u64) -> f64 {
        utils::ucb1_value(
            child_wins,
            child_visits,
            parent_visits,
            self.exploration_constant,
        )
    }
}

impl Default for UCB1Policy {
    fn default() -> Self {
        Self::new(std::f64::consts::SQRT_2)
    }
}

impl<B: Board> SelectionPolicy<B> for UCB1Policy {
    fn select_child(&self, tree: &SearchTree<B>, node: NodeId) -> Option<NodeId> {
        let parent = tree.get(node);
        let children = parent.children();

        if let Some(&unvisited) = children.iter().find(|&&id| tree.get(id).visits == 0) {
            return Some(unvisited);
        }

        let mut best: Option<(NodeId, f64)> = None;
        for &id in children {
            let child = tree.get(id);
            let score = self.ucb1_value(child.wins, child.visits, parent.visits);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((id, score)),
            }
        }

        best.map(|(id, _)| id)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<B>> {
        Box::new(self.clone())
    }
}

// Implement SelectionPolicy for Box<dyn SelectionPolicy>
impl<B: Board> SelectionPolicy<B> for Box<dyn SelectionPolicy<B>> {
    fn select_child(&self, tree: &SearchTree<B>, node: NodeId) -> Option<NodeId> {
        (**self).select_child(tree, node)
    }

    fn clone_box(&self) -> Box<dyn SelectionPolicy<B>> {
        (**self).clone_box()
    }
}
