//! Text forms of moves and positions: SAN, FEN, PGN and coordinate input.

use crate::board::Position;
use crate::movegen::has_legal_move;
use crate::types::*;

/// Standard Algebraic Notation for `mv`, which must be legal in `pos`.
///
/// `legal` is the list `mv` came from (or any superset of the moves reaching
/// `mv.to`); it is only consulted for disambiguation. The position is played
/// forward and back to find the check marker.
pub fn san(pos: &mut Position, mv: Move, legal: &[Move]) -> String {
    let Some(pc) = pos.piece_at(mv.from) else {
        return mv.coords();
    };

    let mut out = if mv.is_castle {
        if file_of(mv.to) > file_of(mv.from) {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        }
    } else {
        let capture = mv.is_en_passant || pos.piece_at(mv.to).is_some();
        let mut s = String::new();
        if pc.kind == PieceKind::Pawn {
            if capture {
                s.push(file_char(mv.from));
            }
        } else {
            s.push(pc.kind.to_char().to_ascii_uppercase());
            s.push_str(&disambiguation(pos, mv, pc.kind, legal));
        }
        if capture {
            s.push('x');
        }
        s.push_str(&sq_to_coord(mv.to));
        if let Some(promo) = mv.promo {
            s.push('=');
            s.push(promo.to_char().to_ascii_uppercase());
        }
        s
    };

    let undo = pos.make_move(mv);
    let them = pos.side_to_move;
    if pos.in_check(them) {
        out.push(if has_legal_move(pos) { '+' } else { '#' });
    }
    pos.unmake_move(mv, undo);
    out
}

/// File, rank or full square needed to tell `mv` apart from same-kind moves
/// to the same destination.
fn disambiguation(pos: &Position, mv: Move, kind: PieceKind, legal: &[Move]) -> String {
    let rivals: Vec<u8> = legal
        .iter()
        .filter(|m| m.to == mv.to && m.from != mv.from)
        .filter(|m| pos.piece_at(m.from).is_some_and(|p| p.kind == kind))
        .map(|m| m.from)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|&s| file_of(s) != file_of(mv.from)) {
        file_char(mv.from).to_string()
    } else if rivals.iter().all(|&s| rank_of(s) != rank_of(mv.from)) {
        rank_char(mv.from).to_string()
    } else {
        sq_to_coord(mv.from)
    }
}

fn file_char(s: u8) -> char {
    (b'a' + s % 8) as char
}

fn rank_char(s: u8) -> char {
    (b'1' + s / 8) as char
}

/// Strips check markers and annotation glyphs so SAN typed by hand compares
/// equal to generated SAN.
pub fn normalize_san(text: &str) -> &str {
    text.trim().trim_end_matches(['+', '#', '!', '?'])
}

pub fn to_fen(pos: &Position) -> String {
    let mut board = String::with_capacity(72);
    for rank in (0..8).rev() {
        let mut empty = 0;
        for file in 0..8 {
            match pos.board[rank * 8 + file] {
                Some(pc) => {
                    if empty > 0 {
                        board.push_str(&empty.to_string());
                        empty = 0;
                    }
                    board.push(pc.fen_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            board.push_str(&empty.to_string());
        }
        if rank > 0 {
            board.push('/');
        }
    }

    let side = match pos.side_to_move {
        Color::White => "w",
        Color::Black => "b",
    };

    let mut castling = String::new();
    for (flag, c) in pos.castling.as_array().into_iter().zip(['K', 'Q', 'k', 'q']) {
        if flag {
            castling.push(c);
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }

    let ep = pos.en_passant.map_or_else(|| "-".to_string(), sq_to_coord);

    format!(
        "{board} {side} {castling} {ep} {} {}",
        pos.halfmove_clock, pos.fullmove_number
    )
}

/// Splits `e2e4` / `e7e8q` into squares and an optional promotion piece.
pub fn parse_coords(text: &str) -> Option<(u8, u8, Option<PieceKind>)> {
    let text = text.trim();
    if !(4..=5).contains(&text.len()) || !text.is_ascii() {
        return None;
    }
    let from = coord_to_sq(&text[0..2])?;
    let to = coord_to_sq(&text[2..4])?;
    let promo = match text[4..].chars().next() {
        None => None,
        Some(c) => match PieceKind::from_char(c)? {
            PieceKind::Pawn | PieceKind::King => return None,
            kind => Some(kind),
        },
    };
    Some((from, to, promo))
}

/// Renders a PGN game: tag pairs, numbered movetext wrapped at 80 columns, and
/// the result token.
///
/// `first_move_number` and `black_first` describe where the movetext starts,
/// which only differs from `1` / `false` for games set up from a FEN.
pub fn pgn<'a>(
    tags: &[(&str, String)],
    sans: impl IntoIterator<Item = &'a str>,
    first_move_number: u32,
    black_first: bool,
    result: &str,
) -> String {
    let mut out = String::new();
    for (name, value) in tags {
        let value = value.replace('\\', "\\\\").replace('"', "\\\"");
        out.push_str(&format!("[{name} \"{value}\"]\n"));
    }
    out.push('\n');

    let mut tokens = Vec::new();
    let mut number = first_move_number;
    let mut white_to_move = !black_first;
    for (i, san) in sans.into_iter().enumerate() {
        if white_to_move {
            tokens.push(format!("{number}."));
        } else if i == 0 {
            tokens.push(format!("{number}..."));
        }
        tokens.push(san.to_string());
        if !white_to_move {
            number += 1;
        }
        white_to_move = !white_to_move;
    }
    tokens.push(result.to_string());

    let mut line_len = 0;
    for token in tokens {
        if line_len > 0 && line_len + 1 + token.len() > 80 {
            out.push('\n');
            line_len = 0;
        } else if line_len > 0 {
            out.push(' ');
            line_len += 1;
        }
        line_len += token.len();
        out.push_str(&token);
    }
    out.push('\n');
    out
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
