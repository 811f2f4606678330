//! Engine configuration, loadable from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```toml
//! [search]
//! depth = 3
//! use_quiescence = true
//! engine_color = "white"
//!
//! [eval]
//! activity_factor = 0.5
//! ```

use std::collections::BTreeMap;

use chess_core::Color;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pst::PieceTables;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("search depth must be at least 1, got {0}")]
    Depth(u8),
    #[error("activity factor must be a finite, non-negative number, got {0}")]
    ActivityFactor(f32),
    #[error("unknown piece-square table '{0}'")]
    UnknownTable(String),
    #[error("table '{table}' has a scaled entry of {value}, beyond +/-{max}", max = crate::pst::MAX_ACTIVITY)]
    ActivityRange { table: &'static str, value: f32 },
    #[error("table '{table}' needs 64 entries, got {len}")]
    TableSize { table: &'static str, len: usize },
    #[error("invalid engine configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below the root. Must be at least 1.
    pub depth: u8,
    /// Negamax with alpha-beta bounds; plain minimax otherwise.
    pub use_alpha_beta: bool,
    /// Extend leaves with a captures-only search.
    pub use_quiescence: bool,
    pub use_move_ordering: bool,
    /// The side this engine plays for.
    pub engine_color: Color,
    /// Capture plies the quiescence search may add below a leaf.
    pub max_quiescence_depth: u8,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 3,
            use_alpha_beta: true,
            use_quiescence: false,
            use_move_ordering: true,
            engine_color: Color::Black,
            max_quiescence_depth: 16,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 {
            return Err(ConfigError::Depth(self.depth));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Scale applied to every piece-square entry.
    pub activity_factor: f32,
    /// Replacement tables keyed by name (`pawn`, `knight`, `bishop`, `rook`,
    /// `queen`, `king_midgame`, `king_endgame`), rank 8 first.
    pub tables: BTreeMap<String, Vec<i32>>,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            activity_factor: 1.0,
            tables: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub eval: EvalConfig,
}

impl EngineConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.search.validate()?;
        PieceTables::build(&self.eval)?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
