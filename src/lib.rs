//! # trichess-mcts
//!
//! A time-bounded Monte Carlo Tree Search (MCTS) player for turn-based,
//! three-player board games.
//!
//! The crate does not know the rules of any game. It drives a rules engine
//! exposed through the [`Board`] trait: whose turn it is, where the pieces are,
//! how a piece steps, whether a move is legal and how much clock time is left.
//!
//! ## Features
//!
//! - UCB1 selection with a fixed, documented tie-break order
//! - Random rollouts from a seedable random source
//! - Win attribution across three players in cyclic turn order
//! - Tree reuse between moves, with a fallback to a fresh tree
//! - Anytime search: a move is always available once the budget runs out
//!
//! ## How It Works
//!
//! Each call to [`MCTS::decide_move`] runs:
//!
//! 1. **Root establishment**: the tree kept from the previous move is advanced
//!    over the moves played since then; if any of them is missing from the tree
//!    it is rebuilt from the board.
//! 2. **Selection**: starting from the root, descend with UCB1, expanding nodes
//!    on the way, until a terminal node or an unvisited child is reached.
//! 3. **Simulation**: play random moves on a copy of that node's board until
//!    the game ends.
//! 4. **Backpropagation**: count a visit on every node from there to the root,
//!    and a win on those the winner moved into.
//!
//! Steps 2–4 repeat until the budget (a 1/25 share of the mover's remaining
//! clock by default) is spent. The root child with the best win ratio is then
//! played and becomes the new root.
//!
//! ## Basic Usage
//!
//! A board only has to answer the rules questions. Here every player races
//! a single runner up its own track, one or two squares per move, and the
//! first to reach square 5 wins:
//!
//! ```
//! use std::time::Duration;
//! use trichess_mcts::{Agent, Board, BoardError, BoardPosition, Color, MCTSConfig, Piece, MCTS};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! struct Cell(Color, u8);
//!
//! impl BoardPosition for Cell {
//!     fn quadrant(&self) -> Color {
//!         self.0
//!     }
//! }
//!
//! #[derive(Debug, Clone)]
//! struct Runner(Color);
//!
//! impl Piece for Runner {
//!     type Direction = u8;
//!     fn owner(&self) -> Color {
//!         self.0
//!     }
//!     fn directions(&self) -> &[u8] {
//!         &[1, 2]
//!     }
//!     fn repetitions(&self) -> usize {
//!         1
//!     }
//! }
//!
//! #[derive(Debug, Clone)]
//! struct Race {
//!     at: [u8; 3],
//!     turn: Color,
//!     history: Vec<(Cell, Cell)>,
//! }
//!
//! impl Board for Race {
//!     type Position = Cell;
//!     type Piece = Runner;
//!
//!     fn turn(&self) -> Color {
//!         self.turn
//!     }
//!     fn positions_of(&self, color: Color) -> Vec<Cell> {
//!         vec![Cell(color, self.at[color as usize])]
//!     }
//!     fn piece_at(&self, cell: Cell) -> Option<Runner> {
//!         (self.at[cell.0 as usize] == cell.1).then(|| Runner(cell.0))
//!     }
//!     fn step(&self, _: &Runner, by: &u8, from: Cell, _: bool) -> Result<Cell, BoardError> {
//!         match from.1 + by {
//!             row if row <= 5 => Ok(Cell(from.0, row)),
//!             _ => Err(BoardError::OffBoard),
//!         }
//!     }
//!     fn is_legal_move(&self, from: Cell, to: Cell) -> bool {
//!         !self.is_game_over()
//!             && from == Cell(self.turn, self.at[self.turn as usize])
//!             && to.0 == from.0
//!             && (to.1 == from.1 + 1 || to.1 == from.1 + 2)
//!             && to.1 <= 5
//!     }
//!     fn apply_move(&mut self, from: Cell, to: Cell) -> Result<(), BoardError> {
//!         if !self.is_legal_move(from, to) {
//!             return Err(BoardError::IllegalMove(format!("{:?} -> {:?}", from, to)));
//!         }
//!         self.at[to.0 as usize] = to.1;
//!         self.history.push((from, to));
//!         self.turn = self.turn.next();
//!         Ok(())
//!     }
//!     fn is_game_over(&self) -> bool {
//!         self.winner().is_some()
//!     }
//!     fn winner(&self) -> Option<Color> {
//!         Color::ALL.into_iter().find(|&c| self.at[c as usize] == 5)
//!     }
//!     fn move_count(&self) -> usize {
//!         self.history.len()
//!     }
//!     fn move_at(&self, index: usize) -> Option<(Cell, Cell)> {
//!         self.history.get(index).copied()
//!     }
//!     fn time_remaining(&self, _: Color) -> Duration {
//!         Duration::from_millis(500)
//!     }
//! }
//!
//! let mut board = Race { at: [0; 3], turn: Color::Blue, history: Vec::new() };
//! let mut players: Vec<MCTS<Race>> = (0..3)
//!     .map(|seed| MCTS::new(MCTSConfig::default().with_seed(seed).with_max_iterations(100)))
//!     .collect();
//!
//! while !board.is_game_over() {
//!     let (from, to) = players[board.turn() as usize].play_move(&board)?;
//!     board.apply_move(from, to)?;
//! }
//! for player in &mut players {
//!     player.final_board(&board);
//! }
//! assert!(board.winner().is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod agent;
pub mod board;
pub mod config;
pub mod enumerator;
pub mod mcts;
pub mod move_key;
pub mod policy;
pub mod stats;
pub mod tree;
pub mod utils;

pub use agent::Agent;
pub use board::{previous_mover, Board, BoardError, BoardPosition, Color, Piece};
pub use config::MCTSConfig;
pub use mcts::MCTS;
pub use move_key::MoveKey;
pub use policy::{BackpropagationPolicy, SelectionPolicy, SimulationPolicy};
pub use stats::SearchStatistics;
pub use tree::{NodeId, SearchTree, TreeNode};

/// Error types for the MCTS algorithm
#[derive(thiserror::Error, Debug)]
pub enum MCTSError {
    /// No legal actions are available from the current state
    #[error("No legal actions available from current state")]
    NoLegalActions,

    /// An operation needed a search tree before one was built
    #[error("No search tree has been built yet")]
    NoSearchTree,

    /// A node reports more wins than visits
    #[error("Corrupted statistics: {wins} wins over {visits} visits")]
    CorruptedStatistics {
        /// Wins recorded on the node
        wins: u64,
        /// Visits recorded on the node
        visits: u64,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for MCTS operations
pub type Result<T> = std::result::Result<T, MCTSError>;
