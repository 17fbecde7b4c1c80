//! Main implementation of the Monte Carlo Tree Search algorithm
//!
//! This module contains the search controller. Per move it re-roots (or
//! rebuilds) the tree, runs select / expand / simulate / backpropagate
//! iterations until the time budget runs out, and commits to the best child
//! of the root.

use std::time::{Duration, Instant};

use rand::{rngs::StdRng, SeedableRng};

use crate::{
    board::{Board, Color},
    config::{BestChildCriteria, MCTSConfig},
    move_key::MoveKey,
    policy::{
        backpropagation::{BackpropagationPolicy, StandardPolicy},
        selection::{SelectionPolicy, UCB1Policy},
        simulation::{RandomPolicy, Rollout, SimulationPolicy},
    },
    stats::SearchStatistics,
    tree::{NodeId, SearchTree},
    MCTSError, Result,
};

/// The Monte Carlo Tree Search controller
///
/// One controller plays one colour for a whole game. It keeps the subtree
/// below its last chosen move and re-roots it on the next request when the
/// moves played in between are found in the tree.
pub struct MCTS<B: Board> {
    /// The current search tree, if any
    tree: Option<SearchTree<B>>,

    /// Configuration for the search
    config: MCTSConfig,

    /// Statistics gathered during the last decision
    statistics: SearchStatistics,

    /// Policy for selecting nodes during the selection phase
    selection_policy: Box<dyn SelectionPolicy<B>>,

    /// Policy for simulating games during the simulation phase
    simulation_policy: Box<dyn SimulationPolicy<B>>,

    /// Policy for backpropagating results
    backpropagation_policy: Box<dyn BackpropagationPolicy<B>>,

    /// Random source for rollouts
    rng: StdRng,

    /// Number of moves on the board when the current root was established
    synced_moves: Option<usize>,
}

impl<B: Board + 'static> MCTS<B> {
    /// Creates a new controller with the given configuration
    pub fn new(config: MCTSConfig) -> Self {
        let selection_policy: Box<dyn SelectionPolicy<B>> =
            Box::new(UCB1Policy::new(config.exploration_constant));

        let mut random = RandomPolicy::new();
        if let Some(plies) = config.max_rollout_plies {
            random = random.with_max_plies(plies);
        }
        let simulation_policy: Box<dyn SimulationPolicy<B>> = Box::new(random);

        let backpropagation_policy: Box<dyn BackpropagationPolicy<B>> =
            Box::new(StandardPolicy::new());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        MCTS {
            tree: None,
            config,
            statistics: SearchStatistics::new(),
            selection_policy,
            simulation_policy,
            backpropagation_policy,
            rng,
            synced_moves: None,
        }
    }

    /// Sets the selection policy to use
    pub fn with_selection_policy<P: SelectionPolicy<B> + 'static>(mut self, policy: P) -> Self {
        self.selection_policy = Box::new(policy);
        self
    }

    /// Sets the simulation policy to use
    pub fn with_simulation_policy<P: SimulationPolicy<B> + 'static>(mut self, policy: P) -> Self {
        self.simulation_policy = Box::new(policy);
        self
    }

    /// Sets the backpropagation policy to use
    pub fn with_backpropagation_policy<P: BackpropagationPolicy<B> + 'static>(
        mut self,
        policy: P,
    ) -> Self {
        self.backpropagation_policy = Box::new(policy);
        self
    }

    /// Returns the configuration
    pub fn config(&self) -> &MCTSConfig {
        &self.config
    }

    /// Returns the current search tree, if one has been built
    pub fn tree(&self) -> Option<&SearchTree<B>> {
        self.tree.as_ref()
    }

    /// Returns the current search tree mutably, if one has been built
    pub fn tree_mut(&mut self) -> Option<&mut SearchTree<B>> {
        self.tree.as_mut()
    }

    /// Returns the search statistics of the last decision
    pub fn get_statistics(&self) -> &SearchStatistics {
        &self.statistics
    }

    /// Chooses a move for the player to move on `board`.
    ///
    /// The time budget is the mover's remaining clock divided by
    /// [`MCTSConfig::budget_divisor`]. The search always commits to a move once
    /// the budget is spent, even if no iteration completed.
    pub fn decide_move(&mut self, board: &B) -> Result<(B::Position, B::Position)> {
        self.config.validate()?;
        self.statistics = SearchStatistics::new();

        self.advance_root(board);
        self.expand_root()?;

        let budget = self.config.move_budget(board.time_remaining(board.turn()));
        self.statistics.budget = budget;
        self.search_for_time(budget)?;

        let best = self.best_child()?;
        let tree = self.tree.as_mut().ok_or(MCTSError::NoSearchTree)?;
        let chosen = tree.get(best);
        let key = chosen.originating_move.ok_or(MCTSError::NoLegalActions)?;

        log::debug!(
            "{} plays {} after {} iterations in {:?} (budget {:?}): {}/{} wins",
            board.turn(),
            key,
            self.statistics.iterations,
            self.statistics.total_time,
            budget,
            chosen.wins,
            chosen.visits
        );

        tree.reroot(best);
        self.statistics.tree_size = tree.len();
        self.synced_moves = Some(board.move_count() + 1);

        Ok(key.into_pair())
    }

    /// Releases the tree once the game is over
    pub fn on_game_end(&mut self, final_board: &B) {
        log::debug!(
            "Game over after {} moves, winner {:?}; dropping search tree",
            final_board.move_count(),
            final_board.winner()
        );
        self.tree = None;
        self.synced_moves = None;
    }

    /// Moves the root forward over the moves played since it was established.
    ///
    /// Every move recorded on `board` since the last decision is looked up
    /// among the children of the current root in turn. When all of them are
    /// found the matching descendant becomes the root with its statistics
    /// intact and `true` is returned. Otherwise the whole tree is dropped and
    /// replaced by a fresh, unexpanded root copied from `board`, and `false` is
    /// returned.
    ///
    /// With no moves played since the root was established the tree is kept
    /// as it is and `true` is returned, but it is not reported as reused.
    pub fn advance_root(&mut self, board: &B) -> bool {
        if self.config.reuse_tree {
            if let Some(plies) = self.try_advance(board) {
                self.synced_moves = Some(board.move_count());
                if plies == 0 {
                    return true;
                }
                self.statistics.tree_reused = true;
                self.statistics.plies_advanced = plies;
                if let Some(tree) = &self.tree {
                    let root = tree.get(tree.root());
                    log::info!(
                        "Reusing search tree after {} plies: {} nodes, {} visits at root",
                        plies,
                        tree.len(),
                        root.visits
                    );
                }
                return true;
            }
            if self.tree.is_some() {
                log::info!("Search tree out of sync with the board; rebuilding");
            }
        }

        self.tree = Some(SearchTree::new(board));
        self.synced_moves = Some(board.move_count());
        false
    }

    fn try_advance(&mut self, board: &B) -> Option<usize> {
        let tree = self.tree.as_mut()?;
        let from = self.synced_moves?;
        let to = board.move_count();
        if from > to {
            return None;
        }

        let mut node = tree.root();
        for index in from..to {
            let key = MoveKey::from(board.move_at(index)?);
            node = tree.get(node).child(&key)?;
        }
        if tree.get(node).mover != board.turn() {
            return None;
        }

        if node != tree.root() {
            tree.reroot(node);
        }
        Some(to - from)
    }

    /// Creates all children of the root if it has not been expanded yet
    pub fn expand_root(&mut self) -> Result<usize> {
        let tree = self.tree.as_mut().ok_or(MCTSError::NoSearchTree)?;
        let root = tree.root();
        Ok(tree.expand(root))
    }

    /// Runs iterations until `budget` has elapsed
    /// (or [`MCTSConfig::max_iterations`] is reached)
    pub fn search_for_time(&mut self, budget: Duration) -> Result<()> {
        self.run(Some(budget), self.config.max_iterations)
    }

    /// Runs exactly `iterations` iterations, ignoring the clock
    pub fn search_for_iterations(&mut self, iterations: usize) -> Result<()> {
        self.run(None, Some(iterations))
    }

    fn run(&mut self, budget: Option<Duration>, max_iterations: Option<usize>) -> Result<()> {
        if self.tree.is_none() {
            return Err(MCTSError::NoSearchTree);
        }

        let start_time = Instant::now();
        let mut iterations = 0;
        loop {
            if let Some(budget) = budget {
                if start_time.elapsed() >= budget {
                    self.statistics.stopped_early = true;
                    break;
                }
            }
            if max_iterations.is_some_and(|max| iterations >= max) {
                break;
            }

            self.execute_iteration()?;
            iterations += 1;
        }

        self.statistics.iterations += iterations;
        self.statistics.total_time += start_time.elapsed();
        if let Some(tree) = &self.tree {
            self.statistics.tree_size = tree.len();
        }
        Ok(())
    }

    /// Execute a single iteration of the MCTS algorithm
    fn execute_iteration(&mut self) -> Result<()> {
        // 1. Selection (expanding on the way down)
        let leaf = self.select()?;

        // 2. Simulation
        let rollout = self.simulate(leaf)?;

        // 3. Backpropagation
        self.backpropagate(leaf, rollout.winner)?;

        log::trace!(
            "Iteration finished at {} after {} rollout plies, winner {:?}",
            leaf,
            rollout.plies,
            rollout.winner
        );
        Ok(())
    }

    /// Selection phase: descends from the root to the node to simulate from.
    ///
    /// Unexpanded nodes on the way are expanded. Descent stops at a terminal
    /// node, at a node without children, or at the first unvisited child.
    pub fn select(&mut self) -> Result<NodeId> {
        let tree = self.tree.as_mut().ok_or(MCTSError::NoSearchTree)?;
        let mut current = tree.root();

        loop {
            if tree.get(current).is_terminal() {
                break;
            }
            if !tree.get(current).expanded {
                let created = tree.expand(current);
                self.statistics.tree_size += created;
            }

            let Some(child) = self.selection_policy.select_child(tree, current) else {
                break;
            };
            current = child;
            if tree.get(child).visits == 0 {
                break;
            }
        }

        self.statistics.max_depth = self.statistics.max_depth.max(tree.depth(current));
        Ok(current)
    }

    /// Simulation phase: plays a game out from a copy of `node`'s board
    pub fn simulate(&mut self, node: NodeId) -> Result<Rollout> {
        let tree = self.tree.as_ref().ok_or(MCTSError::NoSearchTree)?;
        let rollout = self
            .simulation_policy
            .simulate(&tree.get(node).state, &mut self.rng);
        self.statistics.rejected_rollout_moves += rollout.rejected_moves;
        Ok(rollout)
    }

    /// Backpropagation phase: updates every node from `leaf` to the root.
    ///
    /// Returns the number of nodes updated.
    pub fn backpropagate(&mut self, leaf: NodeId, winner: Option<Color>) -> Result<usize> {
        let tree = self.tree.as_mut().ok_or(MCTSError::NoSearchTree)?;
        Ok(tree.backpropagate(leaf, winner, &self.backpropagation_policy))
    }

    /// Picks the root child to play according to the configured criteria.
    ///
    /// Fails with [`MCTSError::CorruptedStatistics`] if the root or any of its
    /// children reports more wins than visits. Children are compared in enumeration order and a later child must be
    /// strictly better to win, so an unsearched root yields its first child.
    pub fn best_child(&self) -> Result<NodeId> {
        let tree = self.tree.as_ref().ok_or(MCTSError::NoSearchTree)?;
        let root = tree.get(tree.root());
        let children = root.children();
        if children.is_empty() {
            return Err(MCTSError::NoLegalActions);
        }

        for id in std::iter::once(tree.root()).chain(children.iter().copied()) {
            let child = tree.get(id);
            if child.wins > child.visits {
                return Err(MCTSError::CorruptedStatistics {
                    wins: child.wins,
                    visits: child.visits,
                });
            }
        }

        let min_visits = self.config.min_visits_for_decision;
        let mut eligible: Vec<NodeId> = children
            .iter()
            .copied()
            .filter(|&id| tree.get(id).visits >= min_visits)
            .collect();
        if eligible.is_empty() {
            eligible = children.to_vec();
        }

        let mut best = eligible[0];
        for &id in &eligible[1..] {
            let (candidate, current) = (tree.get(id), tree.get(best));
            let better = match self.config.best_child_criteria {
                BestChildCriteria::WinRatio => candidate.win_ratio() > current.win_ratio(),
                BestChildCriteria::MostVisits => candidate.visits > current.visits,
            };
            if better {
                best = id;
            }
        }
        Ok(best)
    }

    /// Returns a visualization of the search tree
    pub fn visualize_tree(&self) -> String {
        let mut result = String::new();
        if let Some(tree) = &self.tree {
            Self::visualize_node(tree, tree.root(), 0, &mut result);
        }
        result
    }

    /// Helper method to visualize a node and its children
    fn visualize_node(tree: &SearchTree<B>, id: NodeId, depth: usize, output: &mut String) {
        let node = tree.get(id);
        let indent = "  ".repeat(depth);
        let move_str = match &node.originating_move {
            Some(key) => key.to_string(),
            None => "Root".to_string(),
        };

        output.push_str(&format!(
            "{}{} (to move: {}, visits: {}, wins: {}, ratio: {:.3})\n",
            indent,
            move_str,
            node.mover,
            node.visits,
            node.wins,
            node.win_ratio()
        ));

        for &child in node.children() {
            Self::visualize_node(tree, child, depth + 1, output);
        }
    }
}
