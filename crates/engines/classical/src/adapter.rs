//! The engine's view of the rules of chess.
//!
//! Search never copies the position: it plays a move, recurses and takes the
//! move back, so an implementation must support exact undo in LIFO order.

use chess_core::{Color, Game, Piece, VerboseMove};

pub trait RulesAdapter {
    /// Legal moves for the side to move, with SAN check markers filled in.
    fn legal_moves(&mut self) -> Vec<VerboseMove>;

    /// Legal captures only. The default filters [`RulesAdapter::legal_moves`].
    fn captures(&mut self) -> Vec<VerboseMove> {
        self.legal_moves()
            .into_iter()
            .filter(VerboseMove::is_capture)
            .collect()
    }

    /// Plays `mv`. Returns `None` and leaves the position untouched when the
    /// move is not legal here.
    fn apply(&mut self, mv: &VerboseMove) -> Option<VerboseMove>;

    /// Takes back the most recent move.
    fn undo(&mut self) -> Option<VerboseMove>;

    fn side_to_move(&self) -> Color;

    /// Piece on `sq`, a1 = 0 through h8 = 63.
    fn piece_at(&self, sq: u8) -> Option<Piece>;

    fn is_game_over(&mut self) -> bool;

    /// Stalemate, insufficient material, threefold repetition or the
    /// fifty-move rule.
    fn is_draw(&mut self) -> bool;

    fn is_checkmate(&mut self) -> bool;

    fn is_stalemate(&mut self) -> bool;

    fn is_threefold_repetition(&self) -> bool;

    fn move_history(&self) -> &[VerboseMove];

    fn to_fen(&self) -> String;

    fn to_pgn(&mut self) -> String;
}

impl RulesAdapter for Game {
    fn legal_moves(&mut self) -> Vec<VerboseMove> {
        Game::legal_moves(self)
    }

    fn captures(&mut self) -> Vec<VerboseMove> {
        Game::captures(self)
    }

    fn apply(&mut self, mv: &VerboseMove) -> Option<VerboseMove> {
        Game::apply(self, mv)
    }

    fn undo(&mut self) -> Option<VerboseMove> {
        Game::undo(self)
    }

    fn side_to_move(&self) -> Color {
        Game::side_to_move(self)
    }

    fn piece_at(&self, sq: u8) -> Option<Piece> {
        Game::piece_at(self, sq)
    }

    fn is_game_over(&mut self) -> bool {
        Game::is_game_over(self)
    }

    fn is_draw(&mut self) -> bool {
        Game::is_draw(self)
    }

    fn is_checkmate(&mut self) -> bool {
        Game::is_checkmate(self)
    }

    fn is_stalemate(&mut self) -> bool {
        Game::is_stalemate(self)
    }

    fn is_threefold_repetition(&self) -> bool {
        Game::is_threefold_repetition(self)
    }

    fn move_history(&self) -> &[VerboseMove] {
        self.history()
    }

    fn to_fen(&self) -> String {
        Game::to_fen(self)
    }

    fn to_pgn(&mut self) -> String {
        Game::to_pgn(self)
    }
}
