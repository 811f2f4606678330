//! Shared search plumbing: candidate generation, the scoped make/undo guard,
//! terminal classification and quiescence.

use std::ops::{Deref, DerefMut};

use chess_core::VerboseMove;
use serde::Serialize;
use thiserror::Error;

use crate::adapter::RulesAdapter;
use crate::config::SearchConfig;
use crate::eval::{EvalSnapshot, Evaluator, Score};
use crate::ordering::order_moves;
use crate::pst::BIG_DELTA;

/// Larger than any reachable evaluation, mate scores included.
pub const INFINITY: Score = 1_000_000;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("rules adapter rejected its own move {san}")]
    RejectedMove { san: String },
    #[error("no legal moves in {fen}, yet the position is neither checkmate nor stalemate")]
    MissingMoves { fen: String },
}

/// Counters for one `choose_move` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Moves played inside the main search, root moves included.
    pub nodes: u64,
    /// Quiescence entries, including ones that stand pat immediately.
    pub quiescence_nodes: u64,
    /// Beta cutoffs in alpha-beta and quiescence.
    pub cutoffs: u64,
}

/// A root move and its searched score, white-relative.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMove {
    pub mv: VerboseMove,
    pub score: Score,
}

/// A search algorithm. The root entry returns a move; the interior entry
/// scores positions below it.
pub trait SearchStrategy {
    fn choose_move<R: RulesAdapter>(
        &self,
        ctx: &mut SearchContext<'_, R>,
        depth: u8,
    ) -> Result<Option<ScoredMove>, SearchError>;
}

pub(crate) enum Node {
    /// Game over: the evaluator already holds the final score.
    Terminal,
    Open(Vec<VerboseMove>),
}

pub struct SearchContext<'a, R: RulesAdapter> {
    pub(crate) rules: &'a mut R,
    pub(crate) evaluator: &'a mut Evaluator,
    pub(crate) config: &'a SearchConfig,
    pub(crate) stats: SearchStats,
}

impl<'a, R: RulesAdapter> SearchContext<'a, R> {
    pub fn new(rules: &'a mut R, evaluator: &'a mut Evaluator, config: &'a SearchConfig) -> Self {
        Self {
            rules,
            evaluator,
            config,
            stats: SearchStats::default(),
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    pub fn evaluator(&self) -> &Evaluator {
        self.evaluator
    }

    pub fn rules(&self) -> &R {
        self.rules
    }

    fn ordered(&self, mut moves: Vec<VerboseMove>) -> Vec<VerboseMove> {
        if self.config.use_move_ordering {
            order_moves(&mut moves);
        }
        moves
    }

    /// Candidate moves, or `Terminal` when the game is over here.
    pub(crate) fn expand(&mut self) -> Result<Node, SearchError> {
        let moves = self.rules.legal_moves();
        if moves.is_empty() {
            if self.rules.is_checkmate() || self.rules.is_stalemate() {
                return Ok(Node::Terminal);
            }
            return Err(SearchError::MissingMoves {
                fen: self.rules.to_fen(),
            });
        }
        if self.rules.is_draw() {
            return Ok(Node::Terminal);
        }
        Ok(Node::Open(self.ordered(moves)))
    }

    /// Plays `mv` and folds it into the evaluation. Dropping the guard takes
    /// the move back and restores the evaluation.
    pub fn play<'c>(&'c mut self, mv: &VerboseMove) -> Result<MoveGuard<'c, 'a, R>, SearchError> {
        let snapshot = self.evaluator.snapshot();
        let played = self
            .rules
            .apply(mv)
            .ok_or_else(|| SearchError::RejectedMove { san: mv.san.clone() })?;
        self.evaluator.update(self.rules, &played, played.color);
        self.stats.nodes += 1;
        Ok(MoveGuard {
            ctx: self,
            snapshot,
        })
    }

    /// Captures-only search from the side to move's point of view, with
    /// fail-hard bounds and delta pruning.
    pub fn quiescence(&mut self, mut alpha: Score, beta: Score, ply: u8) -> Result<Score, SearchError> {
        self.stats.quiescence_nodes += 1;

        let stand_pat = self.evaluator.relative_score(self.rules.side_to_move());
        // A drawn node is terminal; the evaluator already scored it 0.
        if self.rules.is_draw() {
            return Ok(stand_pat);
        }
        if stand_pat >= beta {
            return Ok(beta);
        }
        // Even winning a queen would not lift this position to alpha.
        if stand_pat < alpha - BIG_DELTA {
            return Ok(alpha);
        }
        if stand_pat > alpha {
            alpha = stand_pat;
        }
        if ply >= self.config.max_quiescence_depth {
            return Ok(stand_pat);
        }

        let captures = self.rules.captures();
        if captures.is_empty() {
            return Ok(stand_pat);
        }

        for mv in &self.ordered(captures) {
            let score = {
                let mut child = self.play(mv)?;
                -child.quiescence(-beta, -alpha, ply + 1)?
            };
            if score >= beta {
                self.stats.cutoffs += 1;
                return Ok(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }
        Ok(alpha)
    }
}

/// A move played during search. Derefs to the context so the search can
/// recurse through it; dropping it undoes the move.
pub struct MoveGuard<'c, 'a, R: RulesAdapter> {
    ctx: &'c mut SearchContext<'a, R>,
    snapshot: EvalSnapshot,
}

impl<'a, R: RulesAdapter> Deref for MoveGuard<'_, 'a, R> {
    type Target = SearchContext<'a, R>;

    fn deref(&self) -> &Self::Target {
        &*self.ctx
    }
}

impl<R: RulesAdapter> DerefMut for MoveGuard<'_, '_, R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.ctx
    }
}

impl<R: RulesAdapter> Drop for MoveGuard<'_, '_, R> {
    fn drop(&mut self) {
        if self.ctx.rules.undo().is_none() {
            log::error!("undo found no move to take back");
        }
        self.ctx.evaluator.restore(self.snapshot);
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
