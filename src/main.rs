//! Command line entry point for the pickup league core
//!
//! Every subcommand works on a JSON league snapshot: players, matches with
//! their teams and results, the rating ledger and distinctions.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use pickup_league::config::{AppConfig, BalanceOptions};
use pickup_league::league::{InMemoryLeagueStore, LeagueSnapshot};
use pickup_league::utils::today;
use pickup_league::{PlayerId, VERSION};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Pickup League - balanced teams and replayed ratings
#[derive(Parser)]
#[command(
    name = "pickup-league",
    version,
    about = "Balanced team generation and full-replay ratings for a pickup soccer league",
    long_about = "Pickup League splits a roster into two fair teams using skill, gender and \
                 repeat-pairing objectives, and rebuilds every player's rating by replaying \
                 completed match history from scratch."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without running a command")]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Propose two balanced teams from a list of player ids
    Balance {
        #[arg(long, value_name = "FILE")]
        league: PathBuf,

        #[arg(long, value_delimiter = ',', required = true)]
        players: Vec<PlayerId>,

        /// Date the social lookback window ends on (defaults to today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,

        /// Commit the teams to this match and write the league back
        #[arg(long, value_name = "ID")]
        commit_to: Option<u64>,

        #[arg(long, help = "Ignore repeat pairings")]
        no_social: bool,

        #[arg(long)]
        skill_weight: Option<f64>,

        #[arg(long)]
        gender_weight: Option<f64>,

        #[arg(long)]
        social_weight: Option<f64>,

        #[arg(long)]
        gender_tolerance: Option<u32>,
    },

    /// Replay all completed matches and rebuild ratings
    Recalc {
        #[arg(long, value_name = "FILE")]
        league: PathBuf,

        #[arg(long, help = "Write the recalculated league back to the file")]
        write: bool,
    },

    /// Show the ranking table
    Ranking {
        #[arg(long, value_name = "FILE")]
        league: PathBuf,

        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show one player's statistics and rating history
    Stats {
        #[arg(long, value_name = "FILE")]
        league: PathBuf,

        #[arg(long)]
        player: PlayerId,
    },

    /// Show how often pairs of players shared a team
    Pairs {
        #[arg(long, value_name = "FILE")]
        league: PathBuf,

        #[arg(long, value_name = "YYYY-MM-DD")]
        as_of: Option<NaiveDate>,

        #[arg(long)]
        months: Option<u32>,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    pickup_league::config::validate_config(&config)?;
    Ok(config)
}

fn display_config(config: &AppConfig) {
    info!("Pickup League v{}", VERSION);
    info!("   Service: {}", config.service.name);
    info!(
        "   Weights: skill {} / gender {} / social {}",
        config.balancer.skill_weight, config.balancer.gender_weight, config.balancer.social_weight
    );
    info!(
        "   Gender tolerance: {}, social lookback: {} months",
        config.balancer.gender_tolerance, config.balancer.social_lookback_months
    );
    info!(
        "   Deltas: win {} / draw {} / loss {}, MVP bonus {}, floor {}",
        config.rating.win_delta,
        config.rating.draw_delta,
        config.rating.loss_delta,
        config.rating.mvp_bonus,
        config.rating.rating_floor
    );
}

fn load_league(config: &AppConfig, path: &Path) -> Result<InMemoryLeagueStore> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read league file {}", path.display()))?;
    let snapshot: LeagueSnapshot = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse league file {}", path.display()))?;
    info!(
        "Loaded {} players and {} matches from {}",
        snapshot.players.len(),
        snapshot.matches.len(),
        path.display()
    );
    Ok(InMemoryLeagueStore::from_config(config, snapshot)?)
}

fn save_league(store: &InMemoryLeagueStore, path: &Path) -> Result<()> {
    let raw = serde_json::to_string_pretty(&store.snapshot()?)?;
    std::fs::write(path, raw)
        .with_context(|| format!("Failed to write league file {}", path.display()))?;
    info!("Wrote league to {}", path.display());
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::Balance {
            league,
            players,
            as_of,
            commit_to,
            no_social,
            skill_weight,
            gender_weight,
            social_weight,
            gender_tolerance,
        } => {
            let store = load_league(config, &league)?;
            let options = BalanceOptions {
                skill_weight,
                gender_weight,
                social_weight,
                gender_tolerance,
                use_social: no_social.then_some(false),
                ..BalanceOptions::default()
            };
            let as_of = as_of.unwrap_or_else(today);

            let split = match commit_to {
                Some(match_id) => {
                    let (_, split) = store.generate_teams(match_id, &players, &options, as_of)?;
                    save_league(&store, &league)?;
                    split
                }
                None => store.preview_teams(&players, &options, as_of)?,
            };
            if !split.used_strict_gender {
                warn!("Gender tolerance could not be met; teams were balanced without it");
            }
            print_json(&split)
        }
        Command::Recalc { league, write } => {
            let store = load_league(config, &league)?;
            let summary = store.recalculate()?;
            info!(
                "Replayed {} matches ({} skipped), {} ledger entries",
                summary.matches_replayed, summary.matches_skipped, summary.ledger_entries
            );
            if write {
                save_league(&store, &league)?;
            }
            print_json(&summary)
        }
        Command::Ranking { league, limit } => {
            let store = load_league(config, &league)?;
            print_json(&store.ranking(limit)?)
        }
        Command::Stats { league, player } => {
            let store = load_league(config, &league)?;
            let stats = store.player_stats(player)?;
            let history = store.player_history(player)?;
            print_json(&serde_json::json!({ "stats": stats, "history": history }))
        }
        Command::Pairs {
            league,
            as_of,
            months,
        } => {
            let store = load_league(config, &league)?;
            print_json(&store.social_pairs(as_of.unwrap_or_else(today), months)?)
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        display_config(&config);
        info!("Configuration validation successful");
        return Ok(());
    }

    match args.command {
        Some(command) => run(&config, command),
        None => {
            display_config(&config);
            warn!("No command given; run with --help to list commands");
            Ok(())
        }
    }
}
