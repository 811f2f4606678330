//! The match files shipped with the crate parse and play.

use chess_play::{MatchConfig, MatchRunner, PlayerConfig};

const CLASSICAL_VS_RANDOM: &str = include_str!("../matches/classical_vs_random.toml");
const MINIMAX_VS_ALPHABETA: &str = include_str!("../matches/minimax_vs_alphabeta.toml");

#[test]
fn test_shipped_files_parse() {
    let config = MatchConfig::from_toml_str(CLASSICAL_VS_RANDOM).unwrap();
    assert_eq!(config.games, 4);
    assert_eq!(config.white.label(), "classical-ab-d3q");
    assert_eq!(config.black, PlayerConfig::Random { seed: Some(7) });

    let config = MatchConfig::from_toml_str(MINIMAX_VS_ALPHABETA).unwrap();
    assert_eq!(config.white.label(), "classical-mm-d2");
    assert_eq!(config.black.label(), "classical-ab-d2");
}

#[test]
fn test_shortened_match_runs() {
    let mut config = MatchConfig::from_toml_str(CLASSICAL_VS_RANDOM).unwrap();
    config.games = 2;
    config.max_moves = 16;
    config.override_depth(2);
    config.out = None;
    config.pgn = None;

    let results = MatchRunner::new(config).unwrap().run_match().unwrap();
    assert_eq!(results.summary.total_games(), 2);
    assert_eq!(results.games[0].white, "classical-ab-d2q");
    assert_eq!(results.games[1].black, "classical-ab-d2q");
    // Two random opening plies come first.
    assert!(results.games.iter().all(|g| g.moves.len() <= 18));
    assert!(results.pgn().contains("[Event \"chess_play match\"]"));
}
