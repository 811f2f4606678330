use super::*;
use crate::game::Game;

fn san_of(fen: &str, coords: &str) -> String {
    let mut game = Game::from_fen(fen).unwrap();
    game.play_coords(coords).unwrap().san
}

#[test]
fn test_simple_san() {
    let mut game = Game::new();
    assert_eq!(game.play_coords("e2e4").unwrap().san, "e4");
    assert_eq!(game.play_coords("g8f6").unwrap().san, "Nf6");
    assert_eq!(game.play_coords("e4e5").unwrap().san, "e5");
    assert_eq!(game.play_coords("d7d5").unwrap().san, "d5");
    assert_eq!(game.play_coords("e5d6").unwrap().san, "exd6");
}

#[test]
fn test_file_and_rank_disambiguation() {
    assert_eq!(san_of("4k3/8/8/8/8/8/8/1N3N1K w - - 0 1", "b1d2"), "Nbd2");
    assert_eq!(san_of("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1", "a1a3"), "R1a3");
    assert_eq!(san_of("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1", "a5a3"), "R5a3");
}

#[test]
fn test_castling_and_promotion_san() {
    assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1g1"), "O-O");
    assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1c1"), "O-O-O");
    assert_eq!(san_of("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8q"), "a8=Q+");
    assert_eq!(san_of("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8n"), "a8=N");
}

#[test]
fn test_mate_marker() {
    let mut game = Game::new();
    for mv in ["f3", "e5", "g4"] {
        game.play_san(mv).unwrap();
    }
    let mate = game.play_san("Qh4").unwrap();
    assert_eq!(mate.san, "Qh4#");
    assert!(mate.gives_check());
    assert!(mate.gives_mate());
}

#[test]
fn test_fen_output() {
    let kiwipete = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let pos = Position::from_fen(kiwipete).unwrap();
    assert_eq!(to_fen(&pos), kiwipete);

    let mut game = Game::new();
    game.play_coords("e2e4").unwrap();
    assert_eq!(
        game.to_fen(),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn test_parse_coords() {
    assert_eq!(parse_coords("e2e4"), Some((12, 28, None)));
    assert_eq!(parse_coords("e7e8q"), Some((52, 60, Some(PieceKind::Queen))));
    assert_eq!(parse_coords("e7e8k"), None);
    assert_eq!(parse_coords("e2"), None);
    assert_eq!(parse_coords("z9e4"), None);
}

#[test]
fn test_normalize_san() {
    assert_eq!(normalize_san("Qh4#"), "Qh4");
    assert_eq!(normalize_san(" Nf3+!? "), "Nf3");
}

#[test]
fn test_pgn_movetext_numbering() {
    let text = pgn(&[("Event", "Test".to_string())], ["Nf6", "e5", "Nd5"], 3, true, "*");
    assert_eq!(text, "[Event \"Test\"]\n\n3... Nf6 4. e5 Nd5 *\n");
}

#[test]
fn test_pgn_wraps_long_movetext() {
    let sans = vec!["Nf3"; 60];
    let text = pgn(&[], sans, 1, false, "*");
    assert!(text.lines().all(|line| line.len() <= 80));
}
