//! chess_play CLI
//!
//! Plays the match described by a TOML file and prints a report.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chess_play::{MatchConfig, MatchRunner};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess engines against each other", long_about = None)]
struct Args {
    /// Match configuration (TOML)
    config: PathBuf,

    /// Number of games, overriding the file
    #[arg(short, long)]
    games: Option<u32>,

    /// Search depth for every classical player
    #[arg(short, long)]
    depth: Option<u8>,

    /// Write game records and summary as JSON
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Write all games as PGN
    #[arg(long)]
    pgn: Option<PathBuf>,

    /// Log every move (same as RUST_LOG=info)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
    .init();

    let text = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read {}", args.config.display()))?;
    let mut config = MatchConfig::from_toml_str(&text)
        .with_context(|| format!("invalid match file {}", args.config.display()))?;
    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(depth) = args.depth {
        config.override_depth(depth);
    }
    if args.out.is_some() {
        config.out = args.out;
    }
    if args.pgn.is_some() {
        config.pgn = args.pgn;
    }

    let mut runner = MatchRunner::new(config).context("invalid command-line overrides")?;
    let results = runner.run_match().context("match aborted")?;
    println!("{}", results.generate_report());

    if let Some(path) = &results.config.out {
        results.save(path)?;
        log::info!("results written to {}", path.display());
    }
    if let Some(path) = &results.config.pgn {
        results.save_pgn(path)?;
        log::info!("games written to {}", path.display());
    }
    Ok(())
}
