//! Headless controller for the ML-chess engines
//!
//! This crate provides infrastructure for:
//! - Describing players and matches in TOML
//! - Playing games between any [`chess_core::Engine`] implementations,
//!   logging each move with its evaluation and remaining pieces
//! - Saving game records as JSON and PGN
//!
//! # Usage
//!
//! ```bash
//! cargo run -p chess_play -- match.toml --games 10 --depth 3 --out results.json -v
//! ```

mod config;
mod match_runner;
mod results;

pub use config::*;
pub use match_runner::*;
pub use results::*;
