//! Match results storage and reporting

use std::fmt::Write as _;
use std::path::Path;

use chess_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::MatchConfig;
use crate::match_runner::GameRecord;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed results: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result of a match (multiple games), counted for the first player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSummary {
    pub first: String,
    pub second: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchSummary {
    pub fn new(first: String, second: String) -> Self {
        Self {
            first,
            second,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    /// Counts one game given its winner and the first player's seat.
    pub fn record(&mut self, winner: Option<Color>, first_is_white: bool) {
        match winner {
            None => self.draws += 1,
            Some(color) if color.is_white() == first_is_white => self.wins += 1,
            Some(_) => self.losses += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from the first player's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// Complete match output: configuration, summary and every game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResults {
    pub config: MatchConfig,
    pub summary: MatchSummary,
    pub games: Vec<GameRecord>,
}

impl MatchResults {
    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| io_error(path, source))
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| io_error(path, source))?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// All games as one PGN database.
    pub fn pgn(&self) -> String {
        self.games
            .iter()
            .map(|g| g.pgn.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n")
            + "\n"
    }

    pub fn save_pgn(&self, path: &Path) -> Result<(), ResultsError> {
        std::fs::write(path, self.pgn()).map_err(|source| io_error(path, source))
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let s = &self.summary;
        let mut report = String::new();
        let _ = writeln!(report, "=== Match: {} vs {} ===\n", s.first, s.second);
        let _ = writeln!(
            report,
            "{:<6} {:<22} {:<22} {:<8} {:>6} {:>7}",
            "Round", "White", "Black", "Result", "Plies", "Eval"
        );
        report.push_str(&"-".repeat(76));
        report.push('\n');
        for game in &self.games {
            let _ = writeln!(
                report,
                "{:<6} {:<22} {:<22} {:<8} {:>6} {:>7}",
                game.round,
                game.white,
                game.black,
                game.result,
                game.moves.len(),
                game.final_eval
            );
        }
        let _ = writeln!(
            report,
            "\n{}: {} wins, {} losses, {} draws (score {:.1}%)",
            s.first,
            s.wins,
            s.losses,
            s.draws,
            s.score() * 100.0
        );
        report
    }
}

fn io_error(path: &Path, source: std::io::Error) -> ResultsError {
    ResultsError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod results_tests;
