//! Move enumeration from the rules engine's stepping primitives.
//!
//! Legal moves are derived piece by piece: every direction vector of the piece
//! is stepped once (single-step pieces) or walked until blocked (sliding
//! pieces), and each candidate square is confirmed with
//! [`Board::is_legal_move`]. Off-board steps are ordinary outcomes here and are
//! simply dropped.

use std::collections::HashSet;

use crate::board::{Board, BoardPosition, Piece};
use crate::move_key::MoveKey;

/// Returns every legal move of the piece standing on `origin`.
///
/// Moves come out in direction order, and for a sliding piece in slide order
/// along each direction. No (origin, destination) pair appears twice. An empty
/// square, or a piece of a player who is not to move, yields no moves.
pub fn legal_moves_from<B: Board>(board: &B, origin: B::Position) -> Vec<MoveKey<B::Position>> {
    let mut moves = Vec::new();
    let mut seen = HashSet::new();
    collect_moves_from(board, origin, &mut moves, &mut seen);
    moves
}

/// Returns every legal move for the player to move in `board`.
///
/// Origins are visited in the order reported by [`Board::positions_of`].
pub fn legal_moves<B: Board>(board: &B) -> Vec<MoveKey<B::Position>> {
    let mut moves = Vec::new();
    let mut seen = HashSet::new();
    for origin in board.positions_of(board.turn()) {
        collect_moves_from(board, origin, &mut moves, &mut seen);
    }
    moves
}

fn collect_moves_from<B: Board>(
    board: &B,
    origin: B::Position,
    moves: &mut Vec<MoveKey<B::Position>>,
    seen: &mut HashSet<MoveKey<B::Position>>,
) {
    let Some(piece) = board.piece_at(origin) else {
        return;
    };
    if piece.owner() != board.turn() {
        return;
    }

    let repetitions = piece.repetitions();
    for direction in piece.directions() {
        if repetitions <= 1 {
            let Ok(destination) = board.step(&piece, direction, origin, false) else {
                continue;
            };
            let key = MoveKey::new(origin, destination);
            if !seen.contains(&key) && board.is_legal_move(origin, destination) {
                seen.insert(key);
                moves.push(key);
            }
            continue;
        }

        // Once the slide leaves the origin's quadrant the direction is read in
        // the new quadrant's orientation for the rest of the walk.
        let mut current = origin;
        let mut reverse = false;
        for _ in 0..repetitions {
            let Ok(next) = board.step(&piece, direction, current, reverse) else {
                break;
            };
            current = next;
            if !reverse && next.quadrant() != origin.quadrant() {
                reverse = true;
            }

            if !board.is_legal_move(origin, next) {
                break;
            }
            let key = MoveKey::new(origin, next);
            if seen.insert(key) {
                moves.push(key);
            }
        }
    }
}
