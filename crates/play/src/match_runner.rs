//! Match runner for playing games between engines

use chess_core::{Color, Engine, EngineError, Game, Outcome};
use classical_engine::{EvalConfig, Evaluator, PieceCounts, Score};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{MatchConfig, MatchConfigError};
use crate::results::{MatchResults, MatchSummary};

#[derive(Debug, Error)]
pub enum MatchError {
    #[error(transparent)]
    Config(#[from] MatchConfigError),
    #[error("{player} failed to move: {source}")]
    Engine {
        player: String,
        #[source]
        source: EngineError,
    },
    #[error("{player} returned no move in {fen}")]
    NoMove { player: String, fen: String },
    #[error("{player} chose {san}, which is not legal in {fen}")]
    IllegalMove {
        player: String,
        san: String,
        fen: String,
    },
}

/// How a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    Rules(Outcome),
    /// `max_moves` plies were played; adjudicated a draw.
    MoveLimit,
}

impl Termination {
    pub fn winner(self) -> Option<Color> {
        match self {
            Termination::Rules(outcome) => outcome.winner(),
            Termination::MoveLimit => None,
        }
    }

    pub fn result_token(self) -> &'static str {
        match self {
            Termination::Rules(outcome) => outcome.result_token(),
            Termination::MoveLimit => "1/2-1/2",
        }
    }
}

/// Everything worth keeping about one finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub round: u32,
    pub white: String,
    pub black: String,
    pub result: String,
    pub termination: Termination,
    pub start_fen: String,
    pub moves: Vec<String>,
    pub final_fen: String,
    /// White-relative evaluation after the last move.
    pub final_eval: Score,
    pub final_counts: PieceCounts,
    pub pgn: String,
}

impl GameRecord {
    pub fn winner(&self) -> Option<Color> {
        self.termination.winner()
    }
}

/// Runs matches between two engines
pub struct MatchRunner {
    config: MatchConfig,
    rng: StdRng,
    /// Evaluation shown in the move log, independent of either player.
    scorekeeper: Evaluator,
    rounds: u32,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Result<Self, MatchConfigError> {
        config.validate()?;
        let scorekeeper =
            Evaluator::new(&EvalConfig::default()).map_err(MatchConfigError::Scorekeeper)?;
        let rng = match config.opening_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config,
            rng,
            scorekeeper,
            rounds: 0,
        })
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Play every configured game. Results are counted for the `white` player.
    pub fn run_match(&mut self) -> Result<MatchResults, MatchError> {
        let first = self.config.white.clone();
        let second = self.config.black.clone();
        let mut summary = MatchSummary::new(first.label(), second.label());
        let mut games = Vec::with_capacity(self.config.games as usize);

        for index in 0..self.config.games {
            let first_is_white = !self.config.alternate_colors || index % 2 == 0;
            let (white_cfg, black_cfg) = if first_is_white {
                (&first, &second)
            } else {
                (&second, &first)
            };
            let mut white = white_cfg
                .build(Color::White, index)
                .map_err(|source| MatchConfigError::Player {
                    seat: Color::White,
                    source,
                })?;
            let mut black = black_cfg
                .build(Color::Black, index)
                .map_err(|source| MatchConfigError::Player {
                    seat: Color::Black,
                    source,
                })?;

            let record = self.play(
                white.as_mut(),
                black.as_mut(),
                white_cfg.label(),
                black_cfg.label(),
            )?;
            summary.record(record.winner(), first_is_white);

            log::info!(
                "Game {}/{}: {} ({}) - Score: {}-{}-{}",
                index + 1,
                self.config.games,
                record.result,
                if first_is_white { "W" } else { "B" },
                summary.wins,
                summary.losses,
                summary.draws
            );
            games.push(record);
        }

        Ok(MatchResults {
            config: self.config.clone(),
            summary,
            games,
        })
    }

    /// Play a single game. Both engines observe every move, their own included.
    pub fn play_game(
        &mut self,
        white: &mut dyn Engine,
        black: &mut dyn Engine,
    ) -> Result<GameRecord, MatchError> {
        let names = (white.name().to_string(), black.name().to_string());
        self.play(white, black, names.0, names.1)
    }

    fn play(
        &mut self,
        white: &mut dyn Engine,
        black: &mut dyn Engine,
        white_name: String,
        black_name: String,
    ) -> Result<GameRecord, MatchError> {
        self.rounds += 1;
        let mut game = match &self.config.start_fen {
            Some(fen) => Game::from_fen(fen).map_err(MatchConfigError::from)?,
            None => Game::new(),
        };
        self.play_opening(&mut game);

        white.new_game(&mut game);
        black.new_game(&mut game);
        self.scorekeeper.sync(&game);

        let mut plies = 0;
        let termination = loop {
            if let Some(outcome) = game.outcome() {
                break Termination::Rules(outcome);
            }
            if plies >= self.config.max_moves {
                break Termination::MoveLimit;
            }

            let side = game.side_to_move();
            let number = game.position().fullmove_number;
            let mover: &mut dyn Engine = match side {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };
            let player = mover.name().to_string();
            let result = mover
                .search(&mut game)
                .map_err(|source| MatchError::Engine {
                    player: player.clone(),
                    source,
                })?;
            let Some(chosen) = result.best_move else {
                return Err(MatchError::NoMove {
                    player,
                    fen: game.to_fen(),
                });
            };
            let Some(played) = game.apply(&chosen) else {
                return Err(MatchError::IllegalMove {
                    player,
                    san: chosen.san,
                    fen: game.to_fen(),
                });
            };

            white.observe(&mut game, &played);
            black.observe(&mut game, &played);
            let eval = self.scorekeeper.update(&mut game, &played, played.color);
            log::info!(
                "{}{} {:<7} eval {:>6}  {}  [{}: {} nodes]",
                number,
                if side == Color::White { "." } else { "..." },
                played.san,
                eval,
                self.scorekeeper.piece_counts(),
                player,
                result.nodes
            );
            plies += 1;
        };

        let mut tags = vec![
            ("Event", "chess_play match".to_string()),
            ("Round", self.rounds.to_string()),
            ("White", white_name.clone()),
            ("Black", black_name.clone()),
        ];
        if termination == Termination::MoveLimit {
            tags.push(("Termination", "adjudication".to_string()));
        }
        log::debug!("game {} over: {:?}", self.rounds, termination);

        Ok(GameRecord {
            round: self.rounds,
            white: white_name,
            black: black_name,
            result: termination.result_token().to_string(),
            termination,
            start_fen: game.start_fen().to_string(),
            moves: game.history().iter().map(|m| m.san.clone()).collect(),
            final_fen: game.to_fen(),
            final_eval: self.scorekeeper.score(),
            final_counts: self.scorekeeper.piece_counts(),
            pgn: game.to_pgn_with_tags(&tags),
        })
    }

    /// Random plies from the start position, skipped once the game is over.
    fn play_opening(&mut self, game: &mut Game) {
        for _ in 0..self.config.random_opening_plies {
            if game.is_game_over() {
                break;
            }
            let moves = game.legal_moves();
            let Some(mv) = moves.choose(&mut self.rng) else {
                break;
            };
            if let Some(played) = game.apply(mv) {
                log::debug!("opening ply {}", played.san);
            }
        }
    }
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
