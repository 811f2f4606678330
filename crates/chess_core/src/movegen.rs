use crate::board::{DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS, Position};
use crate::types::*;

/// Which pseudo-legal moves the generator emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenMode {
    All,
    /// Only moves that remove an enemy piece (en passant included).
    Captures,
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    generate_into(pos, GenMode::All, out);
}

/// Legal generation with a mode filter. The position is restored before returning.
pub fn generate_into(pos: &mut Position, mode: GenMode, out: &mut Vec<Move>) {
    out.clear();
    Generator {
        pos: &*pos,
        mode,
        out: &mut *out,
    }
    .pseudo_moves();

    let mover = pos.side_to_move;
    // Drop moves that leave the mover's own king attacked.
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let illegal = pos.in_check(mover);
        pos.unmake_move(mv, undo);
        !illegal
    });
}

pub fn has_legal_move(pos: &mut Position) -> bool {
    let mut buf = Vec::with_capacity(64);
    legal_moves_into(pos, &mut buf);
    !buf.is_empty()
}

struct Generator<'a> {
    pos: &'a Position,
    mode: GenMode,
    out: &'a mut Vec<Move>,
}

impl Generator<'_> {
    fn pseudo_moves(&mut self) {
        let us = self.pos.side_to_move;
        for from in 0..64u8 {
            let Some(pc) = self.pos.piece_at(from) else {
                continue;
            };
            if pc.color != us {
                continue;
            }
            match pc.kind {
                PieceKind::Pawn => self.pawn(from, us),
                PieceKind::Knight => self.steps(from, us, &KNIGHT_DELTAS),
                PieceKind::Bishop => self.rays(from, us, &DIAGONALS),
                PieceKind::Rook => self.rays(from, us, &ORTHOGONALS),
                PieceKind::Queen => {
                    self.rays(from, us, &DIAGONALS);
                    self.rays(from, us, &ORTHOGONALS);
                }
                PieceKind::King => {
                    self.steps(from, us, &KING_DELTAS);
                    if self.mode == GenMode::All {
                        self.castles(from, us);
                    }
                }
            }
        }
    }

    /// Emits a target square unless it holds a friendly piece or the mode skips quiet moves.
    /// Returns whether a slider may continue past it.
    fn target(&mut self, from: u8, to: u8, us: Color) -> bool {
        match self.pos.piece_at(to) {
            None => {
                if self.mode == GenMode::All {
                    self.out.push(Move::new(from, to));
                }
                true
            }
            Some(pc) if pc.color != us => {
                self.out.push(Move::new(from, to));
                false
            }
            Some(_) => false,
        }
    }

    fn steps(&mut self, from: u8, us: Color, deltas: &[(i8, i8)]) {
        let (f, r) = (file_of(from), rank_of(from));
        for &(df, dr) in deltas {
            if let Some(to) = sq(f + df, r + dr) {
                self.target(from, to, us);
            }
        }
    }

    fn rays(&mut self, from: u8, us: Color, dirs: &[(i8, i8)]) {
        let (f0, r0) = (file_of(from), rank_of(from));
        for &(df, dr) in dirs {
            let (mut f, mut r) = (f0 + df, r0 + dr);
            while let Some(to) = sq(f, r) {
                if !self.target(from, to, us) {
                    break;
                }
                f += df;
                r += dr;
            }
        }
    }

    fn push_pawn_move(&mut self, from: u8, to: u8, promo_rank: i8) {
        if rank_of(to) == promo_rank {
            for kind in PieceKind::PROMOTIONS {
                self.out.push(Move::with_promo(from, to, kind));
            }
        } else {
            self.out.push(Move::new(from, to));
        }
    }

    fn pawn(&mut self, from: u8, us: Color) {
        let (f, r) = (file_of(from), rank_of(from));
        let (dir, start_rank, promo_rank) = match us {
            Color::White => (1, 1, 7),
            Color::Black => (-1, 6, 0),
        };

        if self.mode == GenMode::All
            && let Some(to) = sq(f, r + dir)
            && self.pos.piece_at(to).is_none()
        {
            self.push_pawn_move(from, to, promo_rank);
            if r == start_rank
                && let Some(to2) = sq(f, r + 2 * dir)
                && self.pos.piece_at(to2).is_none()
            {
                self.out.push(Move::new(from, to2));
            }
        }

        for df in [-1, 1] {
            let Some(to) = sq(f + df, r + dir) else {
                continue;
            };
            match self.pos.piece_at(to) {
                Some(pc) if pc.color != us => self.push_pawn_move(from, to, promo_rank),
                None if self.pos.en_passant == Some(to) => {
                    let mut mv = Move::new(from, to);
                    mv.is_en_passant = true;
                    self.out.push(mv);
                }
                _ => {}
            }
        }
    }

    fn castles(&mut self, from: u8, us: Color) {
        let rights = self.pos.castling;
        let them = us.other();
        for option in &CASTLES[us.idx()] {
            let allowed = match (option.king_to, us) {
                (6, Color::White) => rights.wk,
                (2, Color::White) => rights.wq,
                (62, Color::Black) => rights.bk,
                _ => rights.bq,
            };
            if !allowed || from != option.king_from {
                continue;
            }
            if self.pos.is_square_attacked(from, them) {
                return;
            }
            let clear = option.empty.iter().all(|&s| self.pos.piece_at(s).is_none());
            let safe = option
                .safe
                .iter()
                .all(|&s| !self.pos.is_square_attacked(s, them));
            if clear && safe {
                let mut mv = Move::new(option.king_from, option.king_to);
                mv.is_castle = true;
                self.out.push(mv);
            }
        }
    }
}

struct CastleOption {
    king_from: u8,
    king_to: u8,
    /// Squares between king and rook.
    empty: &'static [u8],
    /// Squares the king passes over or lands on.
    safe: &'static [u8],
}

const CASTLES: [[CastleOption; 2]; 2] = [
    [
        CastleOption {
            king_from: 4,
            king_to: 6,
            empty: &[5, 6],
            safe: &[5, 6],
        },
        CastleOption {
            king_from: 4,
            king_to: 2,
            empty: &[3, 2, 1],
            safe: &[3, 2],
        },
    ],
    [
        CastleOption {
            king_from: 60,
            king_to: 62,
            empty: &[61, 62],
            safe: &[61, 62],
        },
        CastleOption {
            king_from: 60,
            king_to: 58,
            empty: &[59, 58, 57],
            safe: &[59, 58],
        },
    ],
];

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
