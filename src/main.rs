use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use std::path::PathBuf;
use std::time::Instant;

// Define modules used by main
mod error;
mod grid;
mod percolation;
mod simulation;
mod stats;
mod union_find;

use percolation_common::{OutputFormat, PercolationConfig, SamplingStrategy};
use simulation::PercolationStats;

/// Command-line arguments for the percolation threshold estimator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Grid size n (the lattice is n-by-n)
    #[arg(allow_negative_numbers = true)]
    n: Option<i64>,

    /// Number of independent trials
    #[arg(allow_negative_numbers = true)]
    trials: Option<i64>,

    /// Optional path to a config.toml; positional values override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Master seed for reproducible runs (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Shard trials across worker threads
    #[arg(long)]
    parallel: bool,

    /// Site sampling strategy: "rejection" or "shuffle"
    #[arg(long)]
    sampling: Option<SamplingStrategy>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,
}

fn build_config(args: &Args) -> Result<PercolationConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = PercolationConfig::load(path)?;
            if let Some(n) = args.n {
                config.grid.size = n;
            }
            if let Some(trials) = args.trials {
                config.trials.count = trials;
            }
            config
        }
        None => match (args.n, args.trials) {
            (Some(n), Some(trials)) => PercolationConfig::new(n, trials),
            _ => anyhow::bail!("usage: percolation-engine <N> <TRIALS> (or --config <PATH>)"),
        },
    };

    if args.seed.is_some() {
        config.trials.seed = args.seed;
    }
    if args.parallel {
        config.trials.parallel = true;
    }
    if let Some(sampling) = args.sampling {
        config.trials.sampling = sampling;
    }
    if args.json {
        config.output.format = OutputFormat::Json;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();

    let args = Args::parse();
    debug!("Arguments: {:?}", args);

    info!("Starting Percolation Engine...");

    // --- Load Configuration ---
    let config = build_config(&args)?;
    let seed = config.trials.seed.unwrap_or_else(rand::random);
    let params = config.get_trial_params(seed)?;

    if params.parallel {
        info!("Using {} Rayon threads.", rayon::current_num_threads());
    }
    info!("Master seed: {}", seed);

    // --- Run Trials ---
    let start_time = Instant::now();
    let stats = PercolationStats::from_params(&params).context("Percolation run failed")?;
    info!(
        "Run of {} trials on a {}x{} grid finished in {:.3} seconds.",
        stats.trials(),
        stats.grid_size(),
        stats.grid_size(),
        start_time.elapsed().as_secs_f64()
    );

    debug!("Per-trial thresholds: {:?}", stats.thresholds());

    if stats.is_degenerate() {
        warn!("Only one trial ran: standard deviation and confidence interval are undefined.");
    }

    // --- Report ---
    match config.output.format {
        OutputFormat::Json => {
            let report = stats.report(true);
            let json_string = serde_json::to_string_pretty(&report)
                .context("Error serializing report to JSON")?;
            println!("{}", json_string);
        }
        OutputFormat::Text => {
            println!("mean                    = {}", stats.mean());
            println!("stddev                  = {}", stats.stddev());
            println!(
                "95% confidence interval = [{}, {}]",
                stats.confidence_low(),
                stats.confidence_high()
            );
        }
    }

    info!("Percolation run complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("percolation-engine").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_positional_arguments() {
        let config = build_config(&parse(&["20", "30", "--seed", "4", "--parallel"])).unwrap();
        assert_eq!(config.grid.size, 20);
        assert_eq!(config.trials.count, 30);
        assert_eq!(config.trials.seed, Some(4));
        assert!(config.trials.parallel);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_sampling_and_json_flags() {
        let config = build_config(&parse(&["5", "2", "--sampling", "shuffle", "--json"])).unwrap();
        assert_eq!(config.trials.sampling, SamplingStrategy::Shuffle);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_non_positive_values_are_fatal() {
        assert!(build_config(&parse(&["0", "10"])).is_err());
        assert!(build_config(&parse(&["10", "-5"])).is_err());
    }

    #[test]
    fn test_oversized_grid_is_fatal() {
        let config = build_config(&parse(&["5000000000", "1"])).unwrap();
        assert!(config.get_trial_params(1).is_err());
    }

    #[test]
    fn test_missing_arguments() {
        assert!(build_config(&parse(&["10"])).is_err());
        assert!(build_config(&parse(&[])).is_err());
    }
}
