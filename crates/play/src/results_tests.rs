use super::*;
use crate::config::PlayerConfig;
use crate::match_runner::MatchRunner;

fn short_random_match() -> MatchResults {
    let config = MatchConfig {
        games: 2,
        max_moves: 6,
        opening_seed: Some(3),
        white: PlayerConfig::Random { seed: Some(1) },
        black: PlayerConfig::Random { seed: Some(2) },
        ..Default::default()
    };
    MatchRunner::new(config).unwrap().run_match().unwrap()
}

#[test]
fn test_summary_counts_from_first_player() {
    let mut summary = MatchSummary::new("a".into(), "b".into());
    summary.record(Some(Color::White), true);
    summary.record(Some(Color::White), false);
    summary.record(Some(Color::Black), false);
    summary.record(None, true);
    assert_eq!((summary.wins, summary.losses, summary.draws), (2, 1, 1));
    assert_eq!(summary.total_games(), 4);
    assert!((summary.score() - 0.625).abs() < 1e-9);
}

#[test]
fn test_empty_summary_scores_even() {
    let summary = MatchSummary::new("a".into(), "b".into());
    assert_eq!(summary.score(), 0.5);
}

#[test]
fn test_json_save_and_load() {
    let results = short_random_match();
    let path = std::env::temp_dir().join(format!("chess_play_results_{}.json", std::process::id()));
    results.save(&path).unwrap();
    let loaded = MatchResults::load(&path).unwrap();
    let _ = std::fs::remove_file(&path);
    assert_eq!(loaded, results);
}

#[test]
fn test_load_missing_file() {
    let err = MatchResults::load(Path::new("/nonexistent/chess_play.json")).unwrap_err();
    assert!(matches!(err, ResultsError::Io { .. }));
}

#[test]
fn test_pgn_database_separates_games() {
    let results = short_random_match();
    let pgn = results.pgn();
    assert_eq!(pgn.matches("[Event ").count(), 2);
    assert!(pgn.contains("[Round \"2\"]"));
    assert!(pgn.contains("\n\n[Event "));
    assert!(pgn.ends_with('\n'));
}

#[test]
fn test_report_lists_every_game() {
    let results = short_random_match();
    let report = results.generate_report();
    assert!(report.starts_with("=== Match: random vs random ==="));
    assert_eq!(report.lines().filter(|l| l.starts_with("1 ") || l.starts_with("2 ")).count(), 2);
    assert!(report.contains("random: "));
}
