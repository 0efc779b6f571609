//! Headless 2048 runner (default binary).
//!
//! Plays one or more games with a built-in move policy and reports the
//! results. With `--json` every finished game's final snapshot is written to
//! stdout as one JSON line; logs go to stderr.

use std::io::Write;

use anyhow::{anyhow, bail, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use tile2048::core::config::DEFAULT_SEED;
use tile2048::core::GameConfig;
use tile2048::runner::{self, RunConfig, RunStats, Strategy};
use tile2048::types::{SpawnPolicy, SPAWN_HIGH_PROBABILITY};

#[derive(Debug, Parser)]
#[command(author, version, about = "Play 2048 games headlessly and report the results")]
struct Cli {
    /// Number of games to play
    #[arg(long, value_name = "N", default_value_t = 1)]
    games: u32,

    /// Seed for tile spawning (and the random strategy)
    #[arg(long, value_name = "SEED", env = "TILE2048_SEED", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Move policy: cycle, random or greedy
    #[arg(long, value_name = "NAME", default_value = "greedy")]
    strategy: String,

    /// Spawn after every move ("always") or only after moves that change the board ("on-change")
    #[arg(
        long,
        value_name = "POLICY",
        env = "TILE2048_SPAWN_POLICY",
        default_value = "always"
    )]
    spawn_policy: String,

    /// Probability that a spawned tile is a 4
    #[arg(long, value_name = "P", default_value_t = SPAWN_HIGH_PROBABILITY)]
    four_probability: f64,

    /// Stop each game after this many moves
    #[arg(long, value_name = "N")]
    max_moves: Option<u32>,

    /// Print each final snapshot as a JSON line on stdout
    #[arg(long)]
    json: bool,
}

fn run_config(cli: &Cli) -> Result<RunConfig> {
    if cli.games == 0 {
        bail!("--games must be at least 1");
    }
    if !(0.0..=1.0).contains(&cli.four_probability) {
        bail!(
            "--four-probability must be within [0, 1], got {}",
            cli.four_probability
        );
    }

    let strategy = Strategy::from_str(&cli.strategy)
        .ok_or_else(|| anyhow!("unknown strategy: {}", cli.strategy))?;
    let spawn_policy = SpawnPolicy::from_str(&cli.spawn_policy)
        .ok_or_else(|| anyhow!("unknown spawn policy: {}", cli.spawn_policy))?;

    Ok(RunConfig {
        games: cli.games,
        game: GameConfig::default()
            .with_seed(cli.seed)
            .with_spawn_policy(spawn_policy)
            .with_four_probability(cli.four_probability),
        strategy,
        max_moves: cli.max_moves,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = run_config(&cli)?;
    info!(
        "playing {} game(s): strategy {}, seed {}, spawn policy {}",
        config.games,
        config.strategy.as_str(),
        config.game.seed,
        config.game.spawn_policy.as_str()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summaries = runner::run(&config, |_, snapshot| -> Result<()> {
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(snapshot)?)?;
        }
        Ok(())
    })?;
    out.flush()?;

    let stats = RunStats::from_summaries(&summaries);
    info!(
        "{} game(s): mean score {:.1}, best score {}, best tile {}",
        stats.games, stats.mean_score, stats.best_score, stats.best_tile
    );
    Ok(())
}
