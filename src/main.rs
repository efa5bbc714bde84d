//! Command-line entry point for the tiered Elo engine
//!
//! Replays a season file (roster plus ordered match log) through the rating
//! engine and prints the final standings.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tiered_elo::config::{validate_config, AppConfig};
use tiered_elo::season::{standings, SeasonFile, Standing};
use tracing::{error, info};

/// Output format for the standings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

/// Tiered Elo - replay match results and print ratings
#[derive(Parser)]
#[command(
    name = "tiered-elo",
    version,
    about = "Replay a season of match results through a tiered-K Elo engine",
    long_about = "Reads a TOML season file with a player roster and an ordered match log, \
                 applies every match in order using Elo with K-factors chosen by games played \
                 and peak rating, and prints the resulting standings."
)]
struct Args {
    /// Season file path
    #[arg(value_name = "SEASON", help = "Path to the season file (TOML format)")]
    season: PathBuf,

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

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Dry run mode (validate inputs and exit)
    #[arg(long, help = "Validate configuration and season file without replaying")]
    dry_run: bool,
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

/// Load configuration with command line overrides applied
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::from_env()?,
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    validate_config(&config)?;
    Ok(config)
}

/// Render standings as a fixed-width table
fn format_table(table: &[Standing]) -> String {
    let width = table
        .iter()
        .map(|standing| standing.name.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    let mut out = format!(
        "{:>4}  {:<width$}  {:>9}  {:>6}  {:>9}  {:<6}  {:>4}\n",
        "rank", "name", "rating", "games", "peak", "tier", "k"
    );
    for standing in table {
        out.push_str(&format!(
            "{:>4}  {:<width$}  {:>9.2}  {:>6}  {:>9.2}  {:<6}  {:>4}\n",
            standing.rank,
            standing.name,
            standing.rating,
            standing.games_played,
            standing.highest_rating,
            standing.tier.to_string(),
            standing.k
        ));
    }
    out
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;
    init_logging(&config.service.log_level)?;

    info!("{} v{} starting", config.service.name, tiered_elo::VERSION);

    let season = SeasonFile::load(&args.season)?;

    if args.dry_run {
        let (engine, roster) = season.build_engine(&config.rating)?;
        let matches = season.resolve_matches(&roster)?;
        info!(
            "Season is valid: {} players, {} matches",
            engine.len(),
            matches.len()
        );
        return Ok(());
    }

    let engine = season.replay(&config.rating)?;
    let table = standings(&engine);

    match args.format {
        OutputFormat::Table => print!("{}", format_table(&table)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&table)?),
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiered_elo::KTier;

    fn standing(rank: usize, name: &str) -> Standing {
        Standing {
            rank,
            name: name.to_string(),
            rating: 1500.0,
            games_played: 3,
            highest_rating: 1500.0,
            tier: KTier::Novice,
            k: 40.0,
        }
    }

    #[test]
    fn test_table_aligns_non_ascii_names() {
        let table = format_table(&[standing(1, "Zoë Ångström"), standing(2, "bob")]);
        let widths: Vec<usize> = table.lines().map(|line| line.chars().count()).collect();

        assert_eq!(widths.len(), 3);
        assert!(widths.iter().all(|width| *width == widths[0]));
    }
}
