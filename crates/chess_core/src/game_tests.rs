use super::*;

#[test]
fn test_apply_rejects_illegal_move() {
    let mut game = Game::new();
    let mut bogus = game.legal_moves()[0].clone();
    bogus.mv = Move::new(12, 36); // e2e5
    assert!(game.apply(&bogus).is_none());
    assert!(game.history().is_empty());
}

#[test]
fn test_apply_and_undo_restore_position() {
    let mut game = Game::new();
    let before = game.to_fen();
    let mv = game.legal_moves().into_iter().find(|m| m.san == "Nf3").unwrap();
    let played = game.apply(&mv).unwrap();
    assert_eq!(played, mv);
    assert_eq!(game.side_to_move(), Color::Black);
    assert_eq!(game.history().len(), 1);

    assert_eq!(game.undo(), Some(mv));
    assert_eq!(game.to_fen(), before);
    assert!(game.undo().is_none());
}

#[test]
fn test_legal_moves_describe_captures() {
    let mut game = Game::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
    let ep = game
        .legal_moves()
        .into_iter()
        .find(|m| m.mv.is_en_passant)
        .unwrap();
    assert_eq!(ep.captured, Some(PieceKind::Pawn));
    assert_eq!(ep.piece, PieceKind::Pawn);
    assert_eq!(ep.san, "exd6");
    assert_eq!(game.captures(), vec![ep]);
}

#[test]
fn test_captures_match_filtered_legal_moves() {
    let mut game = Game::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let uncached = game.captures();
    let filtered: Vec<_> = game
        .legal_moves()
        .into_iter()
        .filter(|m| m.is_capture())
        .collect();
    assert_eq!(uncached, filtered);
    assert_eq!(game.captures(), filtered);
}

#[test]
fn test_checkmate_outcome() {
    let mut game = Game::new();
    for mv in ["f3", "e5", "g4", "Qh4#"] {
        game.play_san(mv).unwrap();
    }
    assert!(game.is_checkmate());
    assert!(!game.is_stalemate());
    assert!(!game.is_draw());
    assert!(game.is_game_over());
    assert_eq!(
        game.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::Black
        })
    );
}

#[test]
fn test_stalemate_is_a_draw() {
    let mut game = Game::from_fen("k7/2K5/1Q6/8/8/8/8/8 b - - 0 1").unwrap();
    assert!(game.is_stalemate());
    assert!(game.is_draw());
    assert_eq!(game.outcome(), Some(Outcome::Stalemate));
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_threefold_by_knight_shuffle() {
    let mut game = Game::new();
    let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8"];
    for mv in shuffle {
        game.play_san(mv).unwrap();
    }
    assert!(!game.is_threefold_repetition());
    for mv in shuffle {
        game.play_san(mv).unwrap();
    }
    assert!(game.is_threefold_repetition());
    assert_eq!(game.outcome(), Some(Outcome::Threefold));

    game.undo();
    assert!(!game.is_threefold_repetition());
}

#[test]
fn test_pgn_export() {
    let mut game = Game::new();
    for mv in ["e4", "e5", "Qh5", "Nc6", "Bc4", "Nf6", "Qxf7#"] {
        game.play_san(mv).unwrap();
    }
    let pgn = game.to_pgn_with_tags(&[("White", "classical".to_string())]);
    assert!(pgn.contains("[White \"classical\"]"));
    assert!(pgn.contains("[Result \"1-0\"]"));
    assert!(pgn.ends_with("1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# 1-0\n"));
    assert!(!pgn.contains("[FEN"));
}

#[test]
fn test_pgn_from_fen_records_setup() {
    let fen = "4k3/8/8/8/8/8/4P3/4K3 b - - 0 12";
    let mut game = Game::from_fen(fen).unwrap();
    game.play_san("Kd7").unwrap();
    let pgn = game.to_pgn();
    assert!(pgn.contains(&format!("[FEN \"{fen}\"]")));
    assert!(pgn.contains("12... Kd7 *"));
}

#[test]
fn test_play_san_tolerates_markers() {
    let mut game = Game::new();
    assert!(game.play_san("e4+").is_some());
    assert!(game.play_san("Ke7?").is_none());
    assert!(game.play_san("e5!").is_some());
}
