//! Plain minimax over the white-relative score: White maximizes, Black
//! minimizes. Kept alongside alpha-beta as the reference the pruned search
//! must agree with.

use crate::adapter::RulesAdapter;
use crate::eval::Score;
use crate::search::{INFINITY, Node, ScoredMove, SearchContext, SearchError, SearchStrategy};

#[derive(Debug, Clone, Copy, Default)]
pub struct Minimax;

impl Minimax {
    fn score_node<R: RulesAdapter>(
        &self,
        ctx: &mut SearchContext<'_, R>,
        depth: u8,
    ) -> Result<Score, SearchError> {
        if depth == 0 {
            return leaf(ctx);
        }
        let Node::Open(moves) = ctx.expand()? else {
            return Ok(ctx.evaluator.score());
        };

        let maximizing = ctx.rules.side_to_move().is_white();
        let mut best = if maximizing { -INFINITY } else { INFINITY };
        for mv in &moves {
            let score = {
                let mut child = ctx.play(mv)?;
                self.score_node(&mut child, depth - 1)?
            };
            if (maximizing && score > best) || (!maximizing && score < best) {
                best = score;
            }
        }
        Ok(best)
    }
}

/// Static score, or a full-window quiescence search converted back to White's
/// point of view.
fn leaf<R: RulesAdapter>(ctx: &mut SearchContext<'_, R>) -> Result<Score, SearchError> {
    if !ctx.config.use_quiescence {
        return Ok(ctx.evaluator.score());
    }
    let side = ctx.rules.side_to_move();
    Ok(side.sign() * ctx.quiescence(-INFINITY, INFINITY, 0)?)
}

impl SearchStrategy for Minimax {
    fn choose_move<R: RulesAdapter>(
        &self,
        ctx: &mut SearchContext<'_, R>,
        depth: u8,
    ) -> Result<Option<ScoredMove>, SearchError> {
        let Node::Open(moves) = ctx.expand()? else {
            return Ok(None);
        };

        let maximizing = ctx.rules.side_to_move().is_white();
        let mut best: Option<ScoredMove> = None;
        for mv in moves {
            let score = {
                let mut child = ctx.play(&mv)?;
                self.score_node(&mut child, depth.saturating_sub(1))?
            };
            log::trace!("minimax root {} -> {}", mv.san, score);
            let better = match &best {
                None => true,
                Some(b) if maximizing => score > b.score,
                Some(b) => score < b.score,
            };
            if better {
                best = Some(ScoredMove { mv, score });
            }
        }
        Ok(best)
    }
}
