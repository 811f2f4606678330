//! Move ordering: likely-strong moves first so alpha-beta cuts earlier.

use chess_core::VerboseMove;

use crate::pst::piece_value;

/// Sorts in place: promotions, then captures by descending
/// `value(captured) - value(mover)`, then checking moves, then the rest.
/// The sort is stable, so moves within a tier keep generation order.
pub fn order_moves(moves: &mut [VerboseMove]) {
    moves.sort_by_key(ordering_key);
}

fn ordering_key(mv: &VerboseMove) -> (u8, i32) {
    if mv.is_promotion() {
        (0, 0)
    } else if let Some(captured) = mv.captured {
        (1, piece_value(mv.piece) - piece_value(captured))
    } else if mv.gives_check() {
        (2, 0)
    } else {
        (3, 0)
    }
}

#[cfg(test)]
#[path = "ordering_tests.rs"]
mod ordering_tests;
