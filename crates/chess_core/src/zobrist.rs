//! Zobrist keys for position identity.
//!
//! `Game` keeps one key per ply so threefold repetition reduces to counting
//! equal keys, and the legal-move cache is keyed by the same value.

use crate::board::Position;
use crate::types::{Color, Piece};

/// Pre-computed random values, indexed by [color][piece_kind][square].
pub struct ZobristKeys {
    pub pieces: [[[u64; 64]; 6]; 2],
    /// XOR-ed in when Black is to move.
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    pub castling: [u64; 4],
    /// En passant file (0-7).
    pub en_passant: [u64; 8],
}

const fn splitmix64(state: u64) -> (u64, u64) {
    let next = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = next;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (next, z ^ (z >> 31))
}

impl ZobristKeys {
    /// Fixed-seed generation, evaluated at compile time.
    pub const fn new() -> Self {
        let mut state = 0x5EED_C0DE_1234_5678u64;
        let mut pieces = [[[0u64; 64]; 6]; 2];
        let mut color = 0;
        while color < 2 {
            let mut kind = 0;
            while kind < 6 {
                let mut s = 0;
                while s < 64 {
                    let (next, value) = splitmix64(state);
                    state = next;
                    pieces[color][kind][s] = value;
                    s += 1;
                }
                kind += 1;
            }
            color += 1;
        }

        let (next, side_to_move) = splitmix64(state);
        state = next;

        let mut castling = [0u64; 4];
        let mut i = 0;
        while i < 4 {
            let (next, value) = splitmix64(state);
            state = next;
            castling[i] = value;
            i += 1;
        }

        let mut en_passant = [0u64; 8];
        let mut i = 0;
        while i < 8 {
            let (next, value) = splitmix64(state);
            state = next;
            en_passant[i] = value;
            i += 1;
        }

        ZobristKeys {
            pieces,
            side_to_move,
            castling,
            en_passant,
        }
    }

    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: u8) -> u64 {
        self.pieces[piece.color.idx()][piece.kind.idx()][sq as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

/// Full key of a position: placement, side to move, castling rights and the
/// en passant file. Move counters are deliberately left out.
pub fn hash_position(pos: &Position) -> u64 {
    let mut h = pos
        .pieces()
        .fold(0u64, |h, (s, pc)| h ^ ZOBRIST.piece_key(pc, s));
    if pos.side_to_move == Color::Black {
        h ^= ZOBRIST.side_to_move;
    }
    for (i, right) in pos.castling.as_array().into_iter().enumerate() {
        if right {
            h ^= ZOBRIST.castling[i];
        }
    }
    if let Some(ep) = pos.en_passant {
        h ^= ZOBRIST.en_passant[(ep % 8) as usize];
    }
    h
}

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
