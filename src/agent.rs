//! The interface a game runner uses to drive a player.

use crate::{board::Board, mcts::MCTS, Result};

/// A player that can be asked for moves by a game runner
pub trait Agent<B: Board> {
    /// Returns the move to play on `board` for the player to move
    fn play_move(&mut self, board: &B) -> Result<(B::Position, B::Position)>;

    /// Called once with the final position when the game has ended
    fn final_board(&mut self, board: &B);
}

impl<B: Board + 'static> Agent<B> for MCTS<B> {
    fn play_move(&mut self, board: &B) -> Result<(B::Position, B::Position)> {
        self.decide_move(board)
    }

    fn final_board(&mut self, board: &B) {
        self.on_game_end(board)
    }
}
