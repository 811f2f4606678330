use super::*;
use crate::board::Position;

#[test]
fn test_zobrist_keys_unique() {
    let mut seen = std::collections::HashSet::new();
    for color in 0..2 {
        for kind in 0..6 {
            for s in 0..64 {
                assert!(
                    seen.insert(ZOBRIST.pieces[color][kind][s]),
                    "Duplicate piece key"
                );
            }
        }
    }
    assert!(seen.insert(ZOBRIST.side_to_move), "Side to move key collision");
    for key in ZOBRIST.castling.iter().chain(ZOBRIST.en_passant.iter()) {
        assert!(seen.insert(*key), "Castling/en passant key collision");
    }
}

#[test]
fn test_hash_ignores_move_counters() {
    let a = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 0 1").unwrap();
    let b = Position::from_fen("8/8/8/4k3/8/4K3/8/8 w - - 37 80").unwrap();
    assert_eq!(a.position_hash(), b.position_hash());
}

#[test]
fn test_hash_restored_after_unmake() {
    let mut pos = Position::startpos();
    let before = pos.position_hash();
    let mv = crate::types::Move::new(12, 28); // e2e4
    let undo = pos.make_move(mv);
    assert_ne!(pos.position_hash(), before);
    pos.unmake_move(mv, undo);
    assert_eq!(pos.position_hash(), before);
}
