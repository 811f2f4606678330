//! Match configuration, read from TOML.
//!
//! ```toml
//! games = 4
//! max_moves = 160
//! random_opening_plies = 2
//!
//! [white]
//! kind = "classical"
//! [white.engine.search]
//! depth = 3
//! use_quiescence = true
//!
//! [black]
//! kind = "random"
//! seed = 7
//! ```

use std::path::PathBuf;

use chess_core::{Color, Engine, FenError, Position};
use classical_engine::{ClassicalEngine, ConfigError, EngineConfig};
use random_engine::RandomEngine;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchConfigError {
    #[error("a match needs at least one game")]
    NoGames,
    #[error("max_moves must be at least 1")]
    NoMoves,
    #[error("invalid start position: {0}")]
    StartFen(#[from] FenError),
    #[error("{seat:?} player: {source}")]
    Player {
        seat: Color,
        #[source]
        source: ConfigError,
    },
    #[error("scorekeeper evaluation: {0}")]
    Scorekeeper(#[source] ConfigError),
    #[error("invalid match configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Who sits in a seat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PlayerConfig {
    Classical {
        #[serde(default)]
        engine: EngineConfig,
    },
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
}

impl PlayerConfig {
    /// Short description used in summaries and PGN tags.
    pub fn label(&self) -> String {
        match self {
            PlayerConfig::Classical { engine } => {
                let search = &engine.search;
                format!(
                    "classical-{}-d{}{}",
                    if search.use_alpha_beta { "ab" } else { "mm" },
                    search.depth,
                    if search.use_quiescence { "q" } else { "" }
                )
            }
            PlayerConfig::Random { .. } => "random".to_string(),
        }
    }

    /// Builds a fresh engine for one game, seated as `seat`.
    ///
    /// `game_index` varies the random player's seed so repeated games differ
    /// while the whole match stays reproducible.
    pub fn build(&self, seat: Color, game_index: u32) -> Result<Box<dyn Engine>, ConfigError> {
        match self {
            PlayerConfig::Classical { engine } => {
                let mut config = engine.clone();
                config.search.engine_color = seat;
                Ok(Box::new(ClassicalEngine::new(config)?))
            }
            PlayerConfig::Random { seed: Some(seed) } => Ok(Box::new(RandomEngine::seeded(
                seed.wrapping_add(u64::from(game_index)),
            ))),
            PlayerConfig::Random { seed: None } => Ok(Box::new(RandomEngine::new())),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            PlayerConfig::Classical { engine } => engine.validate(),
            PlayerConfig::Random { .. } => Ok(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    pub games: u32,
    /// Plies played before a game is adjudicated a draw.
    pub max_moves: u32,
    /// Start position; the standard one when absent.
    pub start_fen: Option<String>,
    /// Uniformly random plies played before the engines take over.
    pub random_opening_plies: u32,
    pub opening_seed: Option<u64>,
    /// Swap seats every other game. Results are always counted for `white`.
    pub alternate_colors: bool,
    pub white: PlayerConfig,
    pub black: PlayerConfig,
    /// Game records and summary as JSON.
    pub out: Option<PathBuf>,
    pub pgn: Option<PathBuf>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            games: 2,
            max_moves: 200,
            start_fen: None,
            random_opening_plies: 0,
            opening_seed: None,
            alternate_colors: true,
            white: PlayerConfig::Classical {
                engine: EngineConfig::default(),
            },
            black: PlayerConfig::Random { seed: None },
            out: None,
            pgn: None,
        }
    }
}

impl MatchConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, MatchConfigError> {
        let config: MatchConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MatchConfigError> {
        if self.games == 0 {
            return Err(MatchConfigError::NoGames);
        }
        if self.max_moves == 0 {
            return Err(MatchConfigError::NoMoves);
        }
        if let Some(fen) = &self.start_fen {
            Position::from_fen(fen)?;
        }
        for (seat, player) in [(Color::White, &self.white), (Color::Black, &self.black)] {
            player
                .validate()
                .map_err(|source| MatchConfigError::Player { seat, source })?;
        }
        Ok(())
    }

    /// Sets the search depth of every classical player.
    pub fn override_depth(&mut self, depth: u8) {
        for player in [&mut self.white, &mut self.black] {
            if let PlayerConfig::Classical { engine } = player {
                engine.search.depth = depth;
            }
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
