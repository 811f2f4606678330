pub mod board;
pub mod error;
pub mod game;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod types;
pub mod zobrist;

// Re-export core game logic (not engine-specific)
pub use board::*;
pub use error::{EngineError, FenError};
pub use game::{Game, Outcome};
pub use movegen::*;
pub use perft::{divide, perft};
pub use types::*;
pub use zobrist::ZOBRIST;

// =============================================================================
// Engine trait: implemented by every player (classical search, random, ...)
// =============================================================================

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The best move found (None if the game is already over)
    pub best_move: Option<VerboseMove>,
    /// White-relative evaluation in centipawns after the move
    pub score: i32,
    /// Search depth used
    pub depth: u8,
    /// Number of nodes searched (optional, for stats)
    pub nodes: u64,
}

/// Trait that all players implement so a controller can drive them uniformly.
pub trait Engine: Send {
    /// Pick a move for the side to move in `game`.
    ///
    /// The game may be explored with apply/undo during the call but must be
    /// handed back in the position it was received in.
    fn search(&mut self, game: &mut Game) -> Result<SearchResult, EngineError>;

    /// Called after any move is played on the shared game, including the
    /// engine's own. `game` already reflects `mv`.
    fn observe(&mut self, _game: &mut Game, _mv: &VerboseMove) {}

    fn name(&self) -> &str;

    /// Reset internal state for a new game starting from `game`.
    fn new_game(&mut self, _game: &mut Game) {}
}
