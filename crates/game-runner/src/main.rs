mod autoplay;
mod config;
mod play;
mod policy;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;
use twenty48_core::session::Session;

use config::{Config, PolicyKind};

#[derive(Parser, Debug)]
#[command(author, version, about = "Play or autoplay 2048 games from the terminal")]
struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Board side length (overrides config)
    #[arg(long, value_name = "N")]
    size: Option<usize>,

    /// Winning tile value (overrides config)
    #[arg(long, value_name = "TILE")]
    target: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive play on stdin: w/a/s/d (or up/down/left/right), n = new game, q = quit
    Play {
        /// Seed for tile spawns
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let a simple policy play one or more games and report the results
    Autoplay {
        /// Number of games to play
        #[arg(long, value_name = "N")]
        games: Option<u32>,
        /// Base seed; game i uses seed + i
        #[arg(long)]
        seed: Option<u64>,
        /// Stop each game after this many accepted moves
        #[arg(long, value_name = "N")]
        max_moves: Option<u64>,
        #[arg(long, value_enum)]
        policy: Option<PolicyKind>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut cfg = match &cli.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path)?
        }
        None => Config::default(),
    };
    if let Some(size) = cli.size {
        cfg.size = size;
    }
    if let Some(target) = cli.target {
        cfg.target = target;
    }

    match cli.command {
        Command::Play { seed } => {
            cfg.validate()?;
            let session = match seed {
                Some(s) => Session::with_seed(cfg.size, s)?,
                None => Session::new(cfg.size)?,
            };
            let mut session = session.with_target(cfg.target)?;
            let stdin = std::io::stdin();
            play::run(&mut session, stdin.lock(), std::io::stdout().lock())?;
            let summary = session.summary();
            info!(
                "Session ended: {} moves, score {}, highest tile {}",
                summary.moves, summary.score, summary.highest_tile
            );
        }
        Command::Autoplay {
            games,
            seed,
            max_moves,
            policy,
        } => {
            if let Some(games) = games {
                cfg.autoplay.games = games;
            }
            if seed.is_some() {
                cfg.autoplay.seed = seed;
            }
            if max_moves.is_some() {
                cfg.autoplay.max_moves = max_moves;
            }
            if let Some(policy) = policy {
                cfg.autoplay.policy = policy;
            }
            cfg.validate()?;
            let report = autoplay::run(&cfg)?;
            info!(
                "Completed {} game(s) on {}x{}: {} won, best score {}, best tile {}, {} moves total",
                report.games,
                cfg.size,
                cfg.size,
                report.wins,
                report.best_score,
                report.best_tile,
                report.total_moves
            );
        }
    }
    Ok(())
}
