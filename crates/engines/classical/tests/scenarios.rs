//! End-to-end behaviour of `ClassicalEngine` on a real `Game`.

use chess_core::{Color, Engine, Game, PieceKind};
use classical_engine::{ClassicalEngine, EngineConfig, PieceCounts, SearchConfig};

fn engine(search: SearchConfig) -> ClassicalEngine {
    ClassicalEngine::new(EngineConfig {
        search,
        ..EngineConfig::default()
    })
    .unwrap()
}

/// Plays SAN moves on the game, keeping the engine's evaluation in sync.
fn play_line(game: &mut Game, engine: &mut ClassicalEngine, line: &[&str]) {
    for san in line {
        let mv = game.play_san(san).unwrap();
        engine.observe_move(game, &mv);
    }
}

#[test]
fn depth_one_minimax_from_start_is_legal_and_deterministic() {
    let search = SearchConfig {
        depth: 1,
        use_alpha_beta: false,
        engine_color: Color::White,
        ..SearchConfig::default()
    };
    let mut game = Game::new();
    let legal = game.legal_moves();
    assert_eq!(legal.len(), 20);

    let first = engine(search.clone()).choose_move(&mut game).unwrap().unwrap();
    let second = engine(search).choose_move(&mut game).unwrap().unwrap();
    assert!(legal.contains(&first.mv));
    assert_eq!(first, second);
    // A knight reaching c3 or f3 gains the most activity.
    assert_eq!(first.score, 50);
}

#[test]
fn black_recaptures_the_checking_queen() {
    let search = SearchConfig {
        depth: 2,
        use_alpha_beta: true,
        use_quiescence: true,
        engine_color: Color::Black,
        ..SearchConfig::default()
    };
    let mut game = Game::new();
    let mut engine = engine(search);
    play_line(&mut game, &mut engine, &["e4", "e5", "Qh5", "Nc6", "Qxe5+"]);
    assert!(game.in_check());
    assert!(engine.wants_move(&game));

    let played = engine.make_move(&mut game).unwrap().unwrap();
    assert_eq!(played.san, "Nxe5");
    assert_eq!(played.captured, Some(PieceKind::Queen));

    let report = engine.report(&game);
    assert_eq!(report.san.as_deref(), Some("Nxe5"));
    assert_eq!(report.counts.get(PieceKind::Queen, Color::White), 0);
    assert!(report.eval < -700, "black is a queen up: {report}");
}

#[test]
fn choose_move_does_not_disturb_the_game() {
    let mut game = Game::new();
    let mut engine = engine(SearchConfig {
        depth: 2,
        use_quiescence: true,
        ..SearchConfig::default()
    });
    play_line(&mut game, &mut engine, &["d4", "d5", "c4"]);
    let fen = game.to_fen();
    let eval = engine.evaluator().snapshot();

    engine.choose_move(&mut game).unwrap().unwrap();
    assert_eq!(game.to_fen(), fen);
    assert_eq!(game.history().len(), 3);
    assert_eq!(engine.evaluator().snapshot(), eval);
    assert!(engine.last_stats().nodes > 0);
}

#[test]
fn engine_trait_drives_a_short_self_play_game() {
    let mut game = Game::new();
    let mut white = engine(SearchConfig {
        depth: 1,
        engine_color: Color::White,
        ..SearchConfig::default()
    });
    let mut black = engine(SearchConfig {
        depth: 1,
        engine_color: Color::Black,
        ..SearchConfig::default()
    });
    white.new_game(&mut game);
    black.new_game(&mut game);

    for _ in 0..12 {
        if game.is_game_over() {
            break;
        }
        let mover: &mut ClassicalEngine = if game.side_to_move() == Color::White {
            &mut white
        } else {
            &mut black
        };
        let result = mover.search(&mut game).unwrap();
        let mv = result.best_move.unwrap();
        let played = game.apply(&mv).unwrap();
        white.observe(&mut game, &played);
        black.observe(&mut game, &played);
    }

    assert_eq!(game.history().len(), 12);
    assert_eq!(white.evaluator().snapshot(), black.evaluator().snapshot());
    assert!(game.to_pgn().starts_with("[Event"));
}

#[test]
fn finished_game_yields_no_move() {
    let mut game = Game::new();
    let mut engine = engine(SearchConfig::default());
    play_line(&mut game, &mut engine, &["f3", "e5", "g4", "Qh4#"]);
    assert_eq!(engine.evaluator().score(), -classical_engine::KING_VALUE);
    assert!(engine.make_move(&mut game).unwrap().is_none());
    assert!(engine.search(&mut game).unwrap().best_move.is_none());
}

#[test]
fn attaching_mid_game_derives_counts_from_the_board() {
    let game = Game::from_fen("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1").unwrap();
    let engine = ClassicalEngine::for_position(EngineConfig::default(), &game).unwrap();
    let mut expected = PieceCounts::EMPTY;
    expected.set(PieceKind::Queen, Color::Black, 1);
    assert_eq!(engine.evaluator().piece_counts(), expected);
    assert!(engine.evaluator().is_endgame());
}

#[test]
fn zero_depth_is_rejected() {
    let err = ClassicalEngine::new(EngineConfig {
        search: SearchConfig {
            depth: 0,
            ..SearchConfig::default()
        },
        ..EngineConfig::default()
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "search depth must be at least 1, got 0");
}
