//! A game in progress: position plus the history needed for undo, repetition
//! detection and notation.

use serde::{Deserialize, Serialize};

use crate::board::{Position, Undo};
use crate::error::FenError;
use crate::movegen::{GenMode, generate_into, has_legal_move};
use crate::notation;
use crate::types::*;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
    FiftyMoves,
    Threefold,
    InsufficientMaterial,
}

impl Outcome {
    pub fn winner(self) -> Option<Color> {
        match self {
            Outcome::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// PGN result token.
    pub fn result_token(self) -> &'static str {
        match self.winner() {
            Some(Color::White) => "1-0",
            Some(Color::Black) => "0-1",
            None => "1/2-1/2",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    pos: Position,
    start_fen: String,
    moves: Vec<VerboseMove>,
    undos: Vec<Undo>,
    /// Position keys, one per ply, starting with the initial position.
    keys: Vec<u64>,
    /// Legal moves of the most recently queried position.
    cache: Option<(u64, Vec<VerboseMove>)>,
    scratch: Vec<Move>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Self::from_position(Position::from_fen(fen)?))
    }

    pub fn from_position(pos: Position) -> Self {
        Self {
            start_fen: notation::to_fen(&pos),
            keys: vec![pos.position_hash()],
            pos,
            moves: Vec::new(),
            undos: Vec::new(),
            cache: None,
            scratch: Vec::with_capacity(64),
        }
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn start_fen(&self) -> &str {
        &self.start_fen
    }

    pub fn side_to_move(&self) -> Color {
        self.pos.side_to_move
    }

    pub fn piece_at(&self, sq: u8) -> Option<Piece> {
        self.pos.piece_at(sq)
    }

    /// Moves played so far, oldest first.
    pub fn history(&self) -> &[VerboseMove] {
        &self.moves
    }

    fn key(&self) -> u64 {
        self.keys.last().copied().unwrap_or_default()
    }

    fn describe(&mut self, moves: &[Move]) -> Vec<VerboseMove> {
        let color = self.pos.side_to_move;
        moves
            .iter()
            .filter_map(|&mv| {
                let pc = self.pos.piece_at(mv.from)?;
                let captured = if mv.is_en_passant {
                    Some(PieceKind::Pawn)
                } else {
                    self.pos.piece_at(mv.to).map(|p| p.kind)
                };
                Some(VerboseMove {
                    mv,
                    color,
                    piece: pc.kind,
                    captured,
                    promotion: mv.promo,
                    san: notation::san(&mut self.pos, mv, moves),
                })
            })
            .collect()
    }

    /// All legal moves for the side to move, with SAN.
    pub fn legal_moves(&mut self) -> Vec<VerboseMove> {
        let key = self.key();
        if let Some((cached, moves)) = &self.cache
            && *cached == key
        {
            return moves.clone();
        }
        let mut buf = std::mem::take(&mut self.scratch);
        generate_into(&mut self.pos, GenMode::All, &mut buf);
        let moves = self.describe(&buf);
        self.scratch = buf;
        self.cache = Some((key, moves.clone()));
        moves
    }

    /// Legal captures only (en passant included).
    pub fn captures(&mut self) -> Vec<VerboseMove> {
        let key = self.key();
        if let Some((cached, moves)) = &self.cache
            && *cached == key
        {
            return moves.iter().filter(|m| m.is_capture()).cloned().collect();
        }
        let mut buf = std::mem::take(&mut self.scratch);
        generate_into(&mut self.pos, GenMode::Captures, &mut buf);
        let moves = self.describe(&buf);
        self.scratch = buf;
        moves
    }

    fn has_legal_move(&mut self) -> bool {
        let key = self.key();
        match &self.cache {
            Some((cached, moves)) if *cached == key => !moves.is_empty(),
            _ => has_legal_move(&mut self.pos),
        }
    }

    /// Plays `mv` if it is legal here. Returns the move as the rules layer
    /// describes it, or `None` when rejected.
    pub fn apply(&mut self, mv: &VerboseMove) -> Option<VerboseMove> {
        self.play(mv.mv)
    }

    /// Plays a generator-level move after checking it against the legal list.
    pub fn play(&mut self, mv: Move) -> Option<VerboseMove> {
        let played = self.legal_moves().into_iter().find(|m| m.mv == mv)?;
        self.push(played.clone());
        Some(played)
    }

    /// Plays a move given in SAN, tolerating missing or extra check markers.
    pub fn play_san(&mut self, text: &str) -> Option<VerboseMove> {
        let wanted = notation::normalize_san(text);
        let played = self
            .legal_moves()
            .into_iter()
            .find(|m| notation::normalize_san(&m.san) == wanted)?;
        self.push(played.clone());
        Some(played)
    }

    /// Plays a move given in coordinate form such as `e2e4` or `a7a8q`.
    pub fn play_coords(&mut self, text: &str) -> Option<VerboseMove> {
        let (from, to, promo) = notation::parse_coords(text)?;
        let played = self
            .legal_moves()
            .into_iter()
            .find(|m| m.from() == from && m.to() == to && m.promotion == promo)?;
        self.push(played.clone());
        Some(played)
    }

    fn push(&mut self, played: VerboseMove) {
        let undo = self.pos.make_move(played.mv);
        self.keys.push(self.pos.position_hash());
        self.undos.push(undo);
        self.moves.push(played);
    }

    /// Takes back the last move, if any.
    pub fn undo(&mut self) -> Option<VerboseMove> {
        let undo = self.undos.pop()?;
        let played = self.moves.pop()?;
        self.keys.pop();
        self.pos.unmake_move(played.mv, undo);
        Some(played)
    }

    pub fn in_check(&self) -> bool {
        self.pos.in_check(self.pos.side_to_move)
    }

    pub fn is_checkmate(&mut self) -> bool {
        self.in_check() && !self.has_legal_move()
    }

    pub fn is_stalemate(&mut self) -> bool {
        !self.in_check() && !self.has_legal_move()
    }

    pub fn is_fifty_move_draw(&self) -> bool {
        self.pos.is_fifty_move_draw()
    }

    pub fn is_insufficient_material(&self) -> bool {
        self.pos.is_insufficient_material()
    }

    /// The current position has occurred at least three times.
    pub fn is_threefold_repetition(&self) -> bool {
        let key = self.key();
        self.keys.iter().filter(|&&k| k == key).count() >= 3
    }

    pub fn is_draw(&mut self) -> bool {
        self.is_fifty_move_draw()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
            || self.is_stalemate()
    }

    pub fn is_game_over(&mut self) -> bool {
        self.outcome().is_some()
    }

    pub fn outcome(&mut self) -> Option<Outcome> {
        if self.is_checkmate() {
            return Some(Outcome::Checkmate {
                winner: self.side_to_move().other(),
            });
        }
        if self.is_stalemate() {
            Some(Outcome::Stalemate)
        } else if self.is_insufficient_material() {
            Some(Outcome::InsufficientMaterial)
        } else if self.is_threefold_repetition() {
            Some(Outcome::Threefold)
        } else if self.is_fifty_move_draw() {
            Some(Outcome::FiftyMoves)
        } else {
            None
        }
    }

    pub fn to_fen(&self) -> String {
        notation::to_fen(&self.pos)
    }

    /// PGN of the moves played so far. The result token comes from the
    /// current position, `*` while the game is still running.
    pub fn to_pgn(&mut self) -> String {
        self.to_pgn_with_tags(&[])
    }

    /// Like [`Game::to_pgn`], with extra tag pairs. Tags named here replace
    /// the placeholder values of the seven-tag roster.
    pub fn to_pgn_with_tags(&mut self, extra: &[(&str, String)]) -> String {
        let result = self.outcome().map_or("*", Outcome::result_token);
        let mut tags: Vec<(&str, String)> = ["Event", "Site", "Date", "Round", "White", "Black"]
            .into_iter()
            .map(|name| (name, "?".to_string()))
            .collect();
        tags.push(("Result", result.to_string()));
        for (name, value) in extra {
            match tags.iter_mut().find(|(n, _)| *n == *name) {
                Some(slot) => slot.1 = value.clone(),
                None => tags.push((name, value.clone())),
            }
        }

        let start = Position::from_fen(&self.start_fen).unwrap_or_default();
        if start != Position::startpos() {
            tags.push(("SetUp", "1".to_string()));
            tags.push(("FEN", self.start_fen.clone()));
        }

        notation::pgn(
            &tags,
            self.moves.iter().map(|m| m.san.as_str()),
            start.fullmove_number,
            start.side_to_move == Color::Black,
            result,
        )
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
