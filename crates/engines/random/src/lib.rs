//! Random Move Chess Engine
//!
//! Selects moves uniformly at random from all legal moves. Any search-based
//! player should beat it easily, which makes it a useful sparring partner
//! for smoke tests and match plumbing.

use chess_core::{Engine, EngineError, Game, SearchResult};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

#[cfg(test)]
mod lib_tests;

/// A chess engine that plays random legal moves.
#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn search(&mut self, game: &mut Game) -> Result<SearchResult, EngineError> {
        let moves = game.legal_moves();
        let best_move = moves.choose(&mut self.rng).cloned();
        Ok(SearchResult {
            best_move,
            score: 0,
            depth: 1,
            nodes: moves.len() as u64,
        })
    }

    fn name(&self) -> &str {
        "Random v1.0"
    }
}
