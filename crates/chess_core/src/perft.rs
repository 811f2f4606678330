//! Move-generation verification by exhaustive leaf counting.

use crate::{board::Position, movegen::legal_moves_into, types::Move};

/// Counts the leaf positions `depth` plies below `pos`.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    count(pos, &mut layers)
}

/// Per-root-move leaf counts, in generation order. Handy for bisecting a
/// mismatch against a reference generator.
pub fn divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    let Some(below) = depth.checked_sub(1) else {
        return Vec::new();
    };
    let mut roots = Vec::with_capacity(64);
    legal_moves_into(pos, &mut roots);
    let mut layers = vec![Vec::with_capacity(64); below as usize];
    roots
        .into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = count(pos, &mut layers);
            pos.unmake_move(mv, undo);
            (mv, nodes)
        })
        .collect()
}

// One move buffer per remaining ply, so the recursion never allocates.
fn count(pos: &mut Position, layers: &mut [Vec<Move>]) -> u64 {
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 1;
    };
    legal_moves_into(pos, buf);
    if rest.is_empty() {
        return buf.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in buf.iter().copied() {
        let undo = pos.make_move(mv);
        nodes += count(pos, rest);
        pos.unmake_move(mv, undo);
    }
    nodes
}
