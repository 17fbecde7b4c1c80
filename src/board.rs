//! Traits describing the rules engine the search is played against.
//!
//! The search never implements the rules of the game itself. It consumes a
//! [`Board`] that knows whose turn it is, where the pieces are, how a piece
//! steps across the board and whether a move is legal. Everything here is the
//! interface the search relies on; concrete boards live with the game.

use std::fmt::{self, Debug};
use std::hash::Hash;
use std::time::Duration;

/// One of the three players, in turn order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    /// Moves first
    Blue,
    /// Moves after Blue
    Green,
    /// Moves after Green
    Red,
}

impl Color {
    /// All colours in turn order
    pub const ALL: [Color; 3] = [Color::Blue, Color::Green, Color::Red];

    /// The colour that moves after this one
    pub fn next(self) -> Color {
        match self {
            Color::Blue => Color::Green,
            Color::Green => Color::Red,
            Color::Red => Color::Blue,
        }
    }

    /// The colour that moved before this one
    pub fn previous(self) -> Color {
        match self {
            Color::Blue => Color::Red,
            Color::Green => Color::Blue,
            Color::Red => Color::Green,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Blue => "Blue",
            Color::Green => "Green",
            Color::Red => "Red",
        };
        f.write_str(name)
    }
}

/// Returns the player whose move produced a state in which `mover` is to play.
///
/// Search nodes store the player who moves *next*; a win found below a node is
/// credited to the player who moved *into* it.
pub fn previous_mover(mover: Color) -> Color {
    mover.previous()
}

/// Failures reported by the rules engine.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A step left the board or landed on an undefined square
    #[error("Step leaves the board")]
    OffBoard,

    /// The rules engine refused a move
    #[error("Illegal move: {0}")]
    IllegalMove(String),
}

/// A square on the board.
pub trait BoardPosition: Copy + Eq + Hash + Debug {
    /// The player whose home quadrant contains this square
    fn quadrant(&self) -> Color;
}

/// A piece together with its movement geometry.
pub trait Piece: Clone + Debug {
    /// A direction vector understood by [`Board::step`]
    type Direction: Clone + Debug;

    /// The player owning this piece
    fn owner(&self) -> Color;

    /// Direction vectors this piece may move along
    fn directions(&self) -> &[Self::Direction];

    /// How many times a direction may be repeated in one move (1 for single-step pieces)
    fn repetitions(&self) -> usize;
}

/// The game state and rules oracle.
///
/// `Clone` must produce a fully independent deep copy: search nodes and
/// rollouts each own their snapshot and mutate it freely.
pub trait Board: Clone {
    /// Square type
    type Position: BoardPosition;

    /// Piece type
    type Piece: Piece;

    /// The player to move
    fn turn(&self) -> Color;

    /// Squares occupied by `color`, in a stable order
    fn positions_of(&self, color: Color) -> Vec<Self::Position>;

    /// The piece on `position`, if any
    fn piece_at(&self, position: Self::Position) -> Option<Self::Piece>;

    /// Takes one step along `direction` from `from`.
    ///
    /// When `reverse` is set the direction is read in the orientation of the
    /// quadrant the piece has crossed into.
    fn step(
        &self,
        piece: &Self::Piece,
        direction: &<Self::Piece as Piece>::Direction,
        from: Self::Position,
        reverse: bool,
    ) -> Result<Self::Position, BoardError>;

    /// Authoritative legality check for the player to move
    fn is_legal_move(&self, from: Self::Position, to: Self::Position) -> bool;

    /// Plays a move on this snapshot
    fn apply_move(&mut self, from: Self::Position, to: Self::Position) -> Result<(), BoardError>;

    /// True once the game has finished
    fn is_game_over(&self) -> bool;

    /// The winner, once the game is over
    fn winner(&self) -> Option<Color>;

    /// Number of moves played so far
    fn move_count(&self) -> usize;

    /// The move played at `index` (0-based)
    fn move_at(&self, index: usize) -> Option<(Self::Position, Self::Position)>;

    /// Clock time left for `color`
    fn time_remaining(&self, color: Color) -> Duration;
}
