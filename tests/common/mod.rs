//! A small three-player board used by the integration tests and benchmarks.
//!
//! Each player owns a quadrant of four rows. Row 0 is the player's back edge
//! and row 3 touches the centre. Stepping forward past row 3 crosses into the
//! next player's quadrant at its row 3, after which the direction has to be
//! read reversed to keep going the same way. Stepping behind row 0, or
//! sideways, leaves the board.
//!
//! Capturing a king ends the game and the capturer wins. The game is a draw
//! (no winner) once `max_moves` moves have been played.

#![allow(dead_code)]

use std::time::Duration;

use trichess_mcts::{Board, BoardError, BoardPosition, Color, Piece};

pub const ROWS: i8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub quadrant: Color,
    pub row: i8,
}

pub fn sq(quadrant: Color, row: i8) -> Square {
    Square { quadrant, row }
}

impl Square {
    fn index(self) -> usize {
        let q = match self.quadrant {
            Color::Blue => 0,
            Color::Green => 1,
            Color::Red => 2,
        };
        q * ROWS as usize + self.row as usize
    }

    fn from_index(index: usize) -> Square {
        Square {
            quadrant: Color::ALL[index / ROWS as usize],
            row: (index % ROWS as usize) as i8,
        }
    }
}

impl BoardPosition for Square {
    fn quadrant(&self) -> Color {
        self.quadrant
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Forward,
    Backward,
    Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    King,
    Rook,
}

const KING_DIRS: [Dir; 3] = [Dir::Side, Dir::Backward, Dir::Forward];
const ROOK_DIRS: [Dir; 2] = [Dir::Forward, Dir::Backward];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToyPiece {
    pub kind: Kind,
    pub owner: Color,
}

impl Piece for ToyPiece {
    type Direction = Dir;

    fn owner(&self) -> Color {
        self.owner
    }

    fn directions(&self) -> &[Dir] {
        match self.kind {
            Kind::King => &KING_DIRS,
            Kind::Rook => &ROOK_DIRS,
        }
    }

    fn repetitions(&self) -> usize {
        match self.kind {
            Kind::King => 1,
            Kind::Rook => 8,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToyBoard {
    cells: Vec<Option<ToyPiece>>,
    turn: Color,
    history: Vec<(Square, Square)>,
    winner: Option<Color>,
    max_moves: usize,
    clock: Duration,
    reject_moves: bool,
}

impl ToyBoard {
    /// Empty board, Blue to move
    pub fn empty() -> Self {
        ToyBoard {
            cells: vec![None; 3 * ROWS as usize],
            turn: Color::Blue,
            history: Vec::new(),
            winner: None,
            max_moves: 60,
            clock: Duration::from_secs(25),
            reject_moves: false,
        }
    }

    /// Every player has a king on row 0 and a rook on row 1
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            board.place(sq(color, 0), Kind::King, color);
            board.place(sq(color, 1), Kind::Rook, color);
        }
        board
    }

    pub fn place(&mut self, square: Square, kind: Kind, owner: Color) {
        self.cells[square.index()] = Some(ToyPiece { kind, owner });
    }

    pub fn with_turn(mut self, turn: Color) -> Self {
        self.turn = turn;
        self
    }

    pub fn with_clock(mut self, clock: Duration) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    /// Makes `apply_move` refuse every move, as a broken rules engine would
    pub fn rejecting_moves(mut self) -> Self {
        self.reject_moves = true;
        self
    }

    fn occupant(&self, square: Square) -> Option<ToyPiece> {
        self.cells[square.index()]
    }

    fn raw_step(dir: Dir, from: Square, reverse: bool) -> Result<Square, BoardError> {
        let delta = match dir {
            Dir::Forward => 1,
            Dir::Backward => -1,
            Dir::Side => return Err(BoardError::OffBoard),
        };
        let delta = if reverse { -delta } else { delta };
        let row = from.row + delta;
        if row < 0 {
            return Err(BoardError::OffBoard);
        }
        if row >= ROWS {
            return Ok(sq(from.quadrant.next(), ROWS - 1));
        }
        Ok(sq(from.quadrant, row))
    }

    /// Walks every direction of the piece on `from` and reports whether `to`
    /// is reached before anything blocks the way.
    fn reachable(&self, piece: &ToyPiece, from: Square, to: Square) -> bool {
        for dir in piece.directions() {
            let mut current = from;
            let mut reverse = false;
            for _ in 0..piece.repetitions() {
                let Ok(next) = Self::raw_step(*dir, current, reverse) else {
                    break;
                };
                current = next;
                if next.quadrant != from.quadrant {
                    reverse = true;
                }
                if next == to {
                    return true;
                }
                if self.occupant(next).is_some() {
                    break;
                }
            }
        }
        false
    }
}

impl Board for ToyBoard {
    type Position = Square;
    type Piece = ToyPiece;

    fn turn(&self) -> Color {
        self.turn
    }

    fn positions_of(&self, color: Color) -> Vec<Square> {
        (0..self.cells.len())
            .filter(|&i| self.cells[i].is_some_and(|p| p.owner == color))
            .map(Square::from_index)
            .collect()
    }

    fn piece_at(&self, position: Square) -> Option<ToyPiece> {
        self.occupant(position)
    }

    fn step(
        &self,
        _piece: &ToyPiece,
        direction: &Dir,
        from: Square,
        reverse: bool,
    ) -> Result<Square, BoardError> {
        Self::raw_step(*direction, from, reverse)
    }

    fn is_legal_move(&self, from: Square, to: Square) -> bool {
        if self.is_game_over() || from == to {
            return false;
        }
        let Some(piece) = self.occupant(from) else {
            return false;
        };
        if piece.owner != self.turn {
            return false;
        }
        if self.occupant(to).is_some_and(|p| p.owner == self.turn) {
            return false;
        }
        self.reachable(&piece, from, to)
    }

    fn apply_move(&mut self, from: Square, to: Square) -> Result<(), BoardError> {
        if self.reject_moves || !self.is_legal_move(from, to) {
            return Err(BoardError::IllegalMove(format!("{:?} -> {:?}", from, to)));
        }

        let captured = self.occupant(to);
        self.cells[to.index()] = self.cells[from.index()].take();
        self.history.push((from, to));
        if captured.is_some_and(|p| p.kind == Kind::King) {
            self.winner = Some(self.turn);
        }
        self.turn = self.turn.next();
        Ok(())
    }

    fn is_game_over(&self) -> bool {
        self.winner.is_some() || self.history.len() >= self.max_moves
    }

    fn winner(&self) -> Option<Color> {
        self.winner
    }

    fn move_count(&self) -> usize {
        self.history.len()
    }

    fn move_at(&self, index: usize) -> Option<(Square, Square)> {
        self.history.get(index).copied()
    }

    fn time_remaining(&self, _color: Color) -> Duration {
        self.clock
    }
}
