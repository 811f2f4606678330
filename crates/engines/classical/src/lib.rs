//! Classical Chess Engine
//!
//! Minimax or negamax alpha-beta search over an incrementally updated
//! evaluation (material, piece-square activity and a simple endgame switch
//! for the king), with optional quiescence search and move ordering.
//!
//! The engine works against any [`RulesAdapter`]; `chess_core::Game` is the
//! one shipped with the workspace.

mod adapter;
mod alphabeta;
mod config;
mod eval;
mod minimax;
mod ordering;
mod pst;
mod search;

use std::fmt;

use chess_core::{Color, Engine, EngineError, Game, SearchResult, VerboseMove};
use serde::Serialize;

pub use adapter::RulesAdapter;
pub use alphabeta::AlphaBeta;
pub use config::{ConfigError, EngineConfig, EvalConfig, SearchConfig};
pub use eval::{EvalSnapshot, Evaluator, PieceCounts, Score};
pub use minimax::Minimax;
pub use ordering::order_moves;
pub use pst::{BIG_DELTA, KING_VALUE, MAX_ACTIVITY, PieceTables, TableKind, piece_value};
pub use search::{
    INFINITY, MoveGuard, ScoredMove, SearchContext, SearchError, SearchStats, SearchStrategy,
};

/// What the engine knows after a move: for logging and records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoveReport {
    /// SAN of the last move played, if any.
    pub san: Option<String>,
    /// White-relative evaluation.
    pub eval: Score,
    pub counts: PieceCounts,
}

impl fmt::Display for MoveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} eval {} counts {}",
            self.san.as_deref().unwrap_or("-"),
            self.eval,
            self.counts
        )
    }
}

/// Search-based engine holding its own evaluator.
///
/// The evaluator is incremental, so every move played on the shared position
/// must reach the engine, either through [`ClassicalEngine::make_move`] or
/// [`ClassicalEngine::observe_move`].
#[derive(Debug, Clone)]
pub struct ClassicalEngine {
    config: EngineConfig,
    evaluator: Evaluator,
    last_stats: SearchStats,
}

impl ClassicalEngine {
    /// Engine for a game starting from the standard position.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.search.validate()?;
        let evaluator = Evaluator::new(&config.eval)?;
        Ok(Self {
            config,
            evaluator,
            last_stats: SearchStats::default(),
        })
    }

    /// Engine attached to the current position of `rules`.
    pub fn for_position<R: RulesAdapter>(
        config: EngineConfig,
        rules: &R,
    ) -> Result<Self, ConfigError> {
        config.search.validate()?;
        let evaluator = Evaluator::for_position(&config.eval, rules)?;
        Ok(Self {
            config,
            evaluator,
            last_stats: SearchStats::default(),
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Counters from the most recent search.
    pub fn last_stats(&self) -> SearchStats {
        self.last_stats
    }

    pub fn engine_color(&self) -> Color {
        self.config.search.engine_color
    }

    /// Whether it is this engine's turn in `rules`.
    pub fn wants_move<R: RulesAdapter>(&self, rules: &R) -> bool {
        rules.side_to_move() == self.engine_color()
    }

    /// Searches the side to move's best move without playing it.
    ///
    /// Returns `Ok(None)` when the game is already over. The position and
    /// the evaluator are left as they were, on success and on error.
    pub fn choose_move<R: RulesAdapter>(
        &mut self,
        rules: &mut R,
    ) -> Result<Option<ScoredMove>, SearchError> {
        let search = self.config.search.clone();
        let mut ctx = SearchContext::new(rules, &mut self.evaluator, &search);
        let result = if search.use_alpha_beta {
            AlphaBeta.choose_move(&mut ctx, search.depth)
        } else {
            Minimax.choose_move(&mut ctx, search.depth)
        };
        self.last_stats = ctx.stats();

        let stats = self.last_stats;
        match &result {
            Ok(Some(best)) => log::debug!(
                "depth {} chose {} ({}) nodes {} qnodes {} cutoffs {}",
                search.depth,
                best.mv.san,
                best.score,
                stats.nodes,
                stats.quiescence_nodes,
                stats.cutoffs
            ),
            Ok(None) => log::debug!("no move to search, game is over"),
            Err(err) => log::warn!("search aborted: {err}"),
        }
        result
    }

    /// Chooses a move, plays it on `rules` and updates the evaluation.
    pub fn make_move<R: RulesAdapter>(
        &mut self,
        rules: &mut R,
    ) -> Result<Option<VerboseMove>, SearchError> {
        if rules.is_game_over() {
            return Ok(None);
        }
        let Some(best) = self.choose_move(rules)? else {
            return Ok(None);
        };
        let played = rules
            .apply(&best.mv)
            .ok_or_else(|| SearchError::RejectedMove {
                san: best.mv.san.clone(),
            })?;
        self.evaluator.update(rules, &played, played.color);
        Ok(Some(played))
    }

    /// Folds a move that was already played on `rules` by someone else into
    /// the evaluation.
    pub fn observe_move<R: RulesAdapter>(&mut self, rules: &mut R, mv: &VerboseMove) -> Score {
        self.evaluator.update(rules, mv, mv.color)
    }

    pub fn report<R: RulesAdapter>(&self, rules: &R) -> MoveReport {
        MoveReport {
            san: rules.move_history().last().map(|m| m.san.clone()),
            eval: self.evaluator.score(),
            counts: self.evaluator.piece_counts(),
        }
    }
}

impl Engine for ClassicalEngine {
    fn search(&mut self, game: &mut Game) -> Result<SearchResult, EngineError> {
        if !self.wants_move(game) {
            log::warn!(
                "asked to move for {:?}, configured for {:?}",
                game.side_to_move(),
                self.engine_color()
            );
        }
        let best = self
            .choose_move(game)
            .map_err(|e| EngineError::Search(Box::new(e)))?;
        Ok(SearchResult {
            score: best.as_ref().map_or(self.evaluator.score(), |b| b.score),
            best_move: best.map(|b| b.mv),
            depth: self.config.search.depth,
            nodes: self.last_stats.nodes + self.last_stats.quiescence_nodes,
        })
    }

    fn observe(&mut self, game: &mut Game, mv: &VerboseMove) {
        self.observe_move(game, mv);
    }

    fn name(&self) -> &str {
        "Classical v2.0"
    }

    fn new_game(&mut self, game: &mut Game) {
        self.evaluator.sync(game);
        self.last_stats = SearchStats::default();
    }
}
