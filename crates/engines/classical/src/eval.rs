//! Incremental evaluation.
//!
//! The score is kept from White's point of view and adjusted by the delta
//! of each move instead of being recomputed from the board. Search saves an
//! [`EvalSnapshot`] before every move and restores it when the move is taken
//! back.

use std::fmt;

use chess_core::{Color, PieceKind, VerboseMove};
use serde::{Deserialize, Serialize};

use crate::adapter::RulesAdapter;
use crate::config::{ConfigError, EvalConfig};
use crate::pst::{KING_VALUE, PieceTables, TableKind, piece_value};

/// Centipawns. Stored white-relative unless a function says otherwise.
pub type Score = i32;

/// Knights, bishops, rooks and queens per side. Pawns and kings are not tracked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "CountsRepr", from = "CountsRepr")]
pub struct PieceCounts {
    counts: [[u8; 2]; 4],
}

impl PieceCounts {
    pub const STANDARD: PieceCounts = PieceCounts {
        counts: [[2, 2], [2, 2], [2, 2], [1, 1]],
    };

    pub const EMPTY: PieceCounts = PieceCounts {
        counts: [[0, 0]; 4],
    };

    const TRACKED: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    fn slot(kind: PieceKind) -> Option<usize> {
        match kind {
            PieceKind::Knight => Some(0),
            PieceKind::Bishop => Some(1),
            PieceKind::Rook => Some(2),
            PieceKind::Queen => Some(3),
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    /// Count for a tracked kind; always 0 for pawns and kings.
    pub fn get(&self, kind: PieceKind, color: Color) -> u8 {
        Self::slot(kind).map_or(0, |s| self.counts[s][color.idx()])
    }

    pub fn set(&mut self, kind: PieceKind, color: Color, count: u8) {
        if let Some(s) = Self::slot(kind) {
            self.counts[s][color.idx()] = count;
        }
    }

    fn add(&mut self, kind: PieceKind, color: Color) {
        if let Some(s) = Self::slot(kind) {
            let c = &mut self.counts[s][color.idx()];
            *c = c.saturating_add(1);
        }
    }

    fn remove(&mut self, kind: PieceKind, color: Color) {
        if let Some(s) = Self::slot(kind) {
            let c = &mut self.counts[s][color.idx()];
            *c = c.saturating_sub(1);
        }
    }

    /// Tracked pieces held by `color`.
    pub fn total(&self, color: Color) -> u32 {
        self.counts.iter().map(|c| c[color.idx()] as u32).sum()
    }

    /// Counts taken from the board of `rules`.
    pub fn from_rules<R: RulesAdapter + ?Sized>(rules: &R) -> Self {
        let mut counts = Self::EMPTY;
        for sq in 0..64 {
            if let Some(pc) = rules.piece_at(sq) {
                counts.add(pc.kind, pc.color);
            }
        }
        counts
    }
}

impl Default for PieceCounts {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for PieceCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in Self::TRACKED.into_iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(
                f,
                "{}:{}/{}",
                kind.to_char().to_ascii_uppercase(),
                self.get(kind, Color::White),
                self.get(kind, Color::Black)
            )?;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize)]
struct SideCounts {
    knight: u8,
    bishop: u8,
    rook: u8,
    queen: u8,
}

/// Serialized form: `{"white": {"knight": 2, ...}, "black": {...}}`.
#[derive(Serialize, Deserialize)]
struct CountsRepr {
    white: SideCounts,
    black: SideCounts,
}

impl From<PieceCounts> for CountsRepr {
    fn from(counts: PieceCounts) -> Self {
        let side = |color| SideCounts {
            knight: counts.get(PieceKind::Knight, color),
            bishop: counts.get(PieceKind::Bishop, color),
            rook: counts.get(PieceKind::Rook, color),
            queen: counts.get(PieceKind::Queen, color),
        };
        CountsRepr {
            white: side(Color::White),
            black: side(Color::Black),
        }
    }
}

impl From<CountsRepr> for PieceCounts {
    fn from(repr: CountsRepr) -> Self {
        let mut counts = PieceCounts::EMPTY;
        for (color, side) in [(Color::White, &repr.white), (Color::Black, &repr.black)] {
            counts.set(PieceKind::Knight, color, side.knight);
            counts.set(PieceKind::Bishop, color, side.bishop);
            counts.set(PieceKind::Rook, color, side.rook);
            counts.set(PieceKind::Queen, color, side.queen);
        }
        counts
    }
}

/// Everything [`Evaluator::update`] may change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EvalSnapshot {
    score: Score,
    counts: PieceCounts,
}

#[derive(Clone, Debug)]
pub struct Evaluator {
    score: Score,
    counts: PieceCounts,
    tables: PieceTables,
}

impl Evaluator {
    /// Evaluator for the standard starting position: equal material, score 0.
    pub fn new(config: &EvalConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            score: 0,
            counts: PieceCounts::STANDARD,
            tables: PieceTables::build(config)?,
        })
    }

    /// Evaluator attached to an arbitrary position, with counts and a static
    /// score derived from the board.
    pub fn for_position<R: RulesAdapter + ?Sized>(
        config: &EvalConfig,
        rules: &R,
    ) -> Result<Self, ConfigError> {
        let mut eval = Self::new(config)?;
        eval.sync(rules);
        Ok(eval)
    }

    /// Recomputes counts and score from scratch: material plus activity for
    /// every piece except the kings' material.
    pub fn sync<R: RulesAdapter + ?Sized>(&mut self, rules: &R) {
        self.counts = PieceCounts::from_rules(rules);
        let endgame = self.is_endgame();
        let mut score = 0;
        for sq in 0..64 {
            let Some(pc) = rules.piece_at(sq) else {
                continue;
            };
            let material = match pc.kind {
                PieceKind::King => 0,
                kind => piece_value(kind),
            };
            let activity = self
                .tables
                .value(TableKind::for_piece(pc.kind, endgame), pc.color, sq);
            score += pc.color.sign() * (material + activity);
        }
        self.score = score;
    }

    pub fn score(&self) -> Score {
        self.score
    }

    /// Score from `side`'s point of view.
    pub fn relative_score(&self, side: Color) -> Score {
        side.sign() * self.score
    }

    pub fn set_score(&mut self, score: Score) {
        self.score = score;
    }

    pub fn piece_counts(&self) -> PieceCounts {
        self.counts
    }

    pub fn set_piece_counts(&mut self, counts: PieceCounts) {
        self.counts = counts;
    }

    pub fn snapshot(&self) -> EvalSnapshot {
        EvalSnapshot {
            score: self.score,
            counts: self.counts,
        }
    }

    pub fn restore(&mut self, snapshot: EvalSnapshot) {
        self.score = snapshot.score;
        self.counts = snapshot.counts;
    }

    pub fn tables(&self) -> &PieceTables {
        &self.tables
    }

    /// True when every side that still has a queen has at most one other
    /// knight, bishop or rook. Without queens on the board this always holds.
    pub fn is_endgame(&self) -> bool {
        [Color::White, Color::Black].into_iter().all(|side| {
            self.counts.get(PieceKind::Queen, side) == 0 || self.counts.total(side) <= 2
        })
    }

    pub fn is_draw<R: RulesAdapter + ?Sized>(&self, rules: &mut R) -> bool {
        rules.is_draw()
    }

    /// Folds `mv`, just played by `mover` on `rules`, into the score.
    ///
    /// Terminal positions overwrite the score: 0 for a draw, the king's value
    /// for a mate.
    pub fn update<R: RulesAdapter + ?Sized>(
        &mut self,
        rules: &mut R,
        mv: &VerboseMove,
        mover: Color,
    ) -> Score {
        if rules.is_draw() {
            self.score = 0;
            return self.score;
        }
        if rules.is_checkmate() {
            self.score = mover.sign() * KING_VALUE;
            return self.score;
        }

        let them = mover.other();
        let table = TableKind::for_piece(mv.piece, self.is_endgame());
        let mut delta =
            self.tables.value(table, mover, mv.to()) - self.tables.value(table, mover, mv.from());

        if let Some(promoted) = mv.promotion {
            delta += piece_value(promoted);
            self.counts.add(promoted, mover);
        }

        if let Some(captured) = mv.captured {
            delta += piece_value(captured);
            if captured != PieceKind::Pawn {
                self.counts.remove(captured, them);
            }
            let table = TableKind::for_piece(captured, self.is_endgame());
            delta += self.tables.value(table, them, mv.to());
        }

        self.score += mover.sign() * delta;
        self.score
    }
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
