use super::*;

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::new();
    let mut game = Game::new();

    let result = engine.search(&mut game).unwrap();
    let mv = result.best_move.unwrap();

    assert!(game.legal_moves().contains(&mv));
    assert_eq!(result.nodes, 20);
}

#[test]
fn random_engine_is_reproducible_with_a_seed() {
    let mut a = RandomEngine::seeded(7);
    let mut b = RandomEngine::seeded(7);
    let mut game = Game::new();
    for _ in 0..10 {
        let ma = a.search(&mut game).unwrap().best_move.unwrap();
        let mb = b.search(&mut game).unwrap().best_move.unwrap();
        assert_eq!(ma, mb);
        game.apply(&ma).unwrap();
    }
}

#[test]
fn random_engine_handles_checkmate() {
    let mut engine = RandomEngine::new();
    let mut game =
        Game::from_fen("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
            .unwrap();

    assert!(engine.search(&mut game).unwrap().best_move.is_none());
}

#[test]
fn random_engine_handles_stalemate() {
    let mut engine = RandomEngine::new();
    let mut game = Game::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();

    assert!(engine.search(&mut game).unwrap().best_move.is_none());
}
