//! Negamax with alpha-beta pruning. Scores are from the side to move's point
//! of view; each ply negates the child's score and swaps the window.

use crate::adapter::RulesAdapter;
use crate::eval::Score;
use crate::search::{INFINITY, Node, ScoredMove, SearchContext, SearchError, SearchStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct AlphaBeta;

impl AlphaBeta {
    /// Fail-hard: the result is clamped to `[alpha, beta]`.
    fn score_node<R: RulesAdapter>(
        &self,
        ctx: &mut SearchContext<'_, R>,
        depth: u8,
        mut alpha: Score,
        beta: Score,
    ) -> Result<Score, SearchError> {
        if depth == 0 {
            if ctx.config.use_quiescence {
                return ctx.quiescence(alpha, beta, 0);
            }
            return Ok(ctx.evaluator.relative_score(ctx.rules.side_to_move()));
        }
        let Node::Open(moves) = ctx.expand()? else {
            return Ok(ctx.evaluator.relative_score(ctx.rules.side_to_move()));
        };

        for mv in &moves {
            let score = {
                let mut child = ctx.play(mv)?;
                -self.score_node(&mut child, depth - 1, -beta, -alpha)?
            };
            if score >= beta {
                ctx.stats.cutoffs += 1;
                return Ok(beta);
            }
            if score > alpha {
                alpha = score;
            }
        }
        Ok(alpha)
    }
}

impl SearchStrategy for AlphaBeta {
    fn choose_move<R: RulesAdapter>(
        &self,
        ctx: &mut SearchContext<'_, R>,
        depth: u8,
    ) -> Result<Option<ScoredMove>, SearchError> {
        let Node::Open(moves) = ctx.expand()? else {
            return Ok(None);
        };

        let sign = ctx.rules.side_to_move().sign();
        let mut alpha = -INFINITY;
        let beta = INFINITY;
        let mut best: Option<ScoredMove> = None;
        for mv in moves {
            let score = {
                let mut child = ctx.play(&mv)?;
                -self.score_node(&mut child, depth.saturating_sub(1), -beta, -alpha)?
            };
            log::trace!("alpha-beta root {} -> {}", mv.san, score);
            if best.is_none() || score > alpha {
                alpha = score;
                best = Some(ScoredMove {
                    mv,
                    score: sign * score,
                });
            }
        }
        Ok(best)
    }
}
