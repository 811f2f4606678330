//! Draw and game-end detection through the `Game` API.

use chess_core::{Color, Game, Outcome, Position};

fn game(fen: &str) -> Game {
    Game::from_fen(fen).unwrap()
}

// =============================================================================
// Stalemate
// =============================================================================

#[test]
fn test_stalemate_king_in_corner() {
    let mut g = game("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1");
    assert!(g.legal_moves().is_empty());
    assert!(!g.in_check());
    assert!(g.is_stalemate());
    assert!(g.is_draw());
}

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    let mut g = game("6k1/6P1/6K1/8/8/8/8/8 b - - 0 1");
    assert_eq!(g.outcome(), Some(Outcome::Stalemate));
}

#[test]
fn test_checkmate_is_not_stalemate() {
    let mut g = game("r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4");
    assert!(g.is_checkmate());
    assert!(!g.is_stalemate());
    assert!(!g.is_draw());
    assert_eq!(g.outcome().and_then(Outcome::winner), Some(Color::White));
}

#[test]
fn test_check_is_not_checkmate() {
    let mut g = game("rnbqkbnr/ppppp1pp/8/5p1Q/4P3/8/PPPP1PPP/RNB1KBNR b KQkq - 1 2");
    assert!(g.in_check());
    assert!(!g.is_checkmate());
    assert!(!g.is_game_over());
}

// =============================================================================
// Fifty-move rule
// =============================================================================

#[test]
fn test_fifty_move_rule_at_100_halfmoves() {
    let mut g = game("8/8/8/4k3/8/4K3/4P3/8 w - - 100 60");
    assert!(g.is_fifty_move_draw());
    assert_eq!(g.outcome(), Some(Outcome::FiftyMoves));
}

#[test]
fn test_fifty_move_rule_reached_by_quiet_move() {
    let mut g = game("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    assert!(!g.is_draw());
    g.play_san("Kc3").unwrap();
    assert!(g.is_fifty_move_draw());
    g.undo();
    assert!(!g.is_fifty_move_draw());
}

#[test]
fn test_pawn_move_resets_clock() {
    let mut g = game("8/8/8/4k3/8/3K4/4P3/8 w - - 99 60");
    g.play_san("e4").unwrap();
    assert_eq!(g.position().halfmove_clock, 0);
    assert!(!g.is_fifty_move_draw());
}

// =============================================================================
// Insufficient material
// =============================================================================

#[test]
fn test_insufficient_material_cases() {
    let drawn = [
        "8/8/8/4k3/8/4K3/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KB2/8/8 w - - 0 1",
        "8/8/8/4k3/8/4KN2/8/8 w - - 0 1",
        "8/8/4b3/4k3/8/4K3/8/8 w - - 0 1",
        "5b2/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
    ];
    for fen in drawn {
        let mut g = game(fen);
        assert!(g.is_insufficient_material(), "{fen}");
        assert_eq!(g.outcome(), Some(Outcome::InsufficientMaterial), "{fen}");
    }
}

#[test]
fn test_sufficient_material_cases() {
    let live = [
        "2b5/8/8/4k3/8/4K3/8/2B5 w - - 0 1",
        "8/8/8/4k3/8/4K3/4P3/8 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4R3 w - - 0 1",
        "8/8/8/4k3/8/4K3/8/4Q3 w - - 0 1",
        "8/8/8/4k3/8/4K3/3NN3/8 w - - 0 1",
    ];
    for fen in live {
        assert!(!game(fen).is_insufficient_material(), "{fen}");
    }
}

#[test]
fn test_capture_into_bare_kings_ends_game() {
    let mut g = game("k7/8/8/8/4r3/4K3/8/8 w - - 0 1");
    g.play_san("Kxe4").unwrap();
    assert!(g.is_draw());
    assert!(g.is_game_over());
}

// =============================================================================
// Repetition
// =============================================================================

#[test]
fn test_position_hash_distinguishes_state() {
    let base = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        .unwrap()
        .position_hash();
    for fen in [
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w Kq - 0 1",
    ] {
        assert_ne!(Position::from_fen(fen).unwrap().position_hash(), base);
    }
}

#[test]
fn test_threefold_repetition_after_shuffle() {
    let mut g = Game::new();
    for _ in 0..2 {
        for mv in ["Nc3", "Nc6", "Nb1", "Nb8"] {
            assert!(!g.is_threefold_repetition());
            g.play_san(mv).unwrap();
        }
    }
    assert!(g.is_threefold_repetition());
    assert!(g.is_draw());
    assert_eq!(g.outcome(), Some(Outcome::Threefold));
}

#[test]
fn test_lost_castling_rights_break_repetition() {
    let mut g = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    // Both kings step out and back: the board repeats but the rights do not.
    for _ in 0..2 {
        for mv in ["Kf1", "Kf8", "Ke1", "Ke8"] {
            g.play_san(mv).unwrap();
        }
    }
    assert_eq!(g.to_fen(), "r3k2r/8/8/8/8/8/8/R3K2R w - - 8 5");
    assert!(!g.is_threefold_repetition());
}
