//! Material values and piece-square tables.
//!
//! Tables are written the way a board diagram reads: index 0 is a8, index 63
//! is h1, values from White's point of view. Black uses the same tables
//! mirrored top to bottom.

use chess_core::{Color, PieceKind, file_of, rank_of};

use crate::config::{ConfigError, EvalConfig};

pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;
pub const KING_VALUE: i32 = 20_000;

/// Largest material swing a single capture can bring, used for delta pruning.
pub const BIG_DELTA: i32 = QUEEN_VALUE;

/// Material value of a piece in centipawns.
#[inline]
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => KING_VALUE,
    }
}

/// Identifies one of the seven tables. The king has separate middlegame and
/// endgame tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum TableKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    KingMidgame,
    KingEndgame,
}

impl TableKind {
    pub const ALL: [TableKind; 7] = [
        TableKind::Pawn,
        TableKind::Knight,
        TableKind::Bishop,
        TableKind::Rook,
        TableKind::Queen,
        TableKind::KingMidgame,
        TableKind::KingEndgame,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TableKind::Pawn => "pawn",
            TableKind::Knight => "knight",
            TableKind::Bishop => "bishop",
            TableKind::Rook => "rook",
            TableKind::Queen => "queen",
            TableKind::KingMidgame => "king_midgame",
            TableKind::KingEndgame => "king_endgame",
        }
    }

    pub fn from_name(name: &str) -> Option<TableKind> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn for_piece(kind: PieceKind, endgame: bool) -> TableKind {
        match kind {
            PieceKind::Pawn => TableKind::Pawn,
            PieceKind::Knight => TableKind::Knight,
            PieceKind::Bishop => TableKind::Bishop,
            PieceKind::Rook => TableKind::Rook,
            PieceKind::Queen => TableKind::Queen,
            PieceKind::King if endgame => TableKind::KingEndgame,
            PieceKind::King => TableKind::KingMidgame,
        }
    }

    fn idx(self) -> usize {
        self as usize
    }

    pub fn defaults(self) -> &'static [i32; 64] {
        match self {
            TableKind::Pawn => &PAWN_TABLE,
            TableKind::Knight => &KNIGHT_TABLE,
            TableKind::Bishop => &BISHOP_TABLE,
            TableKind::Rook => &ROOK_TABLE,
            TableKind::Queen => &QUEEN_TABLE,
            TableKind::KingMidgame => &KING_MIDGAME_TABLE,
            TableKind::KingEndgame => &KING_ENDGAME_TABLE,
        }
    }
}

/// Largest scaled table entry. With every piece on the board at this bonus,
/// material plus activity stays well below [`KING_VALUE`], so mate scores
/// and the search window keep their meaning.
pub const MAX_ACTIVITY: i32 = 200;

/// The normalized tables one evaluator works with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PieceTables {
    tables: [[i32; 64]; 7],
}

impl PieceTables {
    /// Starts from the built-in tables, swaps in any overrides, then scales
    /// every entry by the activity factor.
    pub fn build(config: &EvalConfig) -> Result<Self, ConfigError> {
        let mut tables = [[0; 64]; 7];
        for kind in TableKind::ALL {
            tables[kind.idx()] = *kind.defaults();
        }

        for (name, values) in &config.tables {
            let kind =
                TableKind::from_name(name).ok_or_else(|| ConfigError::UnknownTable(name.clone()))?;
            tables[kind.idx()] = values
                .as_slice()
                .try_into()
                .map_err(|_| ConfigError::TableSize {
                    table: kind.name(),
                    len: values.len(),
                })?;
        }

        let factor = config.activity_factor;
        if !factor.is_finite() || factor < 0.0 {
            return Err(ConfigError::ActivityFactor(factor));
        }
        for kind in TableKind::ALL {
            for v in tables[kind.idx()].iter_mut() {
                let scaled = (*v as f32 * factor).round();
                if scaled.abs() > MAX_ACTIVITY as f32 {
                    return Err(ConfigError::ActivityRange {
                        table: kind.name(),
                        value: scaled,
                    });
                }
                *v = scaled as i32;
            }
        }
        Ok(Self { tables })
    }

    /// Table entry for a piece of `color` standing on `sq` (a1 = 0).
    #[inline]
    pub fn value(&self, kind: TableKind, color: Color, sq: u8) -> i32 {
        let row = match color {
            Color::White => 7 - rank_of(sq),
            Color::Black => rank_of(sq),
        };
        self.tables[kind.idx()][(row * 8 + file_of(sq)) as usize]
    }
}

#[rustfmt::skip]
const PAWN_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
    50, 50, 50, 50, 50, 50, 50, 50,
    10, 10, 20, 30, 30, 20, 10, 10,
     5,  5, 10, 25, 25, 10,  5,  5,
     0,  0,  0, 20, 20,  0,  0,  0,
     5, -5,-10,  0,  0,-10, -5,  5,
     5, 10, 10,-20,-20, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const KNIGHT_TABLE: [i32; 64] = [
    -50,-40,-30,-30,-30,-30,-40,-50,
    -40,-20,  0,  0,  0,  0,-20,-40,
    -30,  0, 10, 15, 15, 10,  0,-30,
    -30,  5, 15, 20, 20, 15,  5,-30,
    -30,  0, 15, 20, 20, 15,  0,-30,
    -30,  5, 10, 15, 15, 10,  5,-30,
    -40,-20,  0,  5,  5,  0,-20,-40,
    -50,-40,-30,-30,-30,-30,-40,-50,
];

#[rustfmt::skip]
const BISHOP_TABLE: [i32; 64] = [
    -20,-10,-10,-10,-10,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5, 10, 10,  5,  0,-10,
    -10,  5,  5, 10, 10,  5,  5,-10,
    -10,  0, 10, 10, 10, 10,  0,-10,
    -10, 10, 10, 10, 10, 10, 10,-10,
    -10,  5,  0,  0,  0,  0,  5,-10,
    -20,-10,-10,-10,-10,-10,-10,-20,
];

#[rustfmt::skip]
const ROOK_TABLE: [i32; 64] = [
     0,  0,  0,  0,  0,  0,  0,  0,
     5, 10, 10, 10, 10, 10, 10,  5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     0,  0,  0,  5,  5,  0,  0,  0,
];

#[rustfmt::skip]
const QUEEN_TABLE: [i32; 64] = [
    -20,-10,-10, -5, -5,-10,-10,-20,
    -10,  0,  0,  0,  0,  0,  0,-10,
    -10,  0,  5,  5,  5,  5,  0,-10,
     -5,  0,  5,  5,  5,  5,  0, -5,
      0,  0,  5,  5,  5,  5,  0, -5,
    -10,  5,  5,  5,  5,  5,  0,-10,
    -10,  0,  5,  0,  0,  0,  0,-10,
    -20,-10,-10, -5, -5,-10,-10,-20,
];

#[rustfmt::skip]
const KING_MIDGAME_TABLE: [i32; 64] = [
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -30,-40,-40,-50,-50,-40,-40,-30,
    -20,-30,-30,-40,-40,-30,-30,-20,
    -10,-20,-20,-20,-20,-20,-20,-10,
     20, 20,  0,  0,  0,  0, 20, 20,
     20, 30, 10,  0,  0, 10, 30, 20,
];

#[rustfmt::skip]
const KING_ENDGAME_TABLE: [i32; 64] = [
    -50,-40,-30,-20,-20,-30,-40,-50,
    -30,-20,-10,  0,  0,-10,-20,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 30, 40, 40, 30,-10,-30,
    -30,-10, 20, 30, 30, 20,-10,-30,
    -30,-30,  0,  0,  0,  0,-30,-30,
    -50,-30,-30,-30,-30,-30,-30,-50,
];
