//! Luck versus talent simulation.
//!
//! Spawns a population, runs a scenario several times, and writes one JSON
//! report per scenario for external plotting.

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use fortune_core::config::{SimConfig, DEFAULT_CONFIG_PATH};
use fortune_core::events::FieldLogger;
use fortune_core::output::{write_population, write_scenario_report};
use fortune_core::setup::summarize_population;
use fortune_core::{run_scenario, Simulation};
use fortune_events::Scenario;

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "fortune_sim")]
#[command(about = "Luck versus talent Monte Carlo simulation")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducibility (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Iterations per run (overrides config)
    #[arg(long)]
    iterations: Option<u64>,

    /// Number of runs per scenario (overrides config)
    #[arg(long)]
    runs: Option<usize>,

    /// Scenario to run: baseline, talent, vision, combined
    #[arg(long, default_value_t = Scenario::Talent)]
    scenario: Scenario,

    /// Directory for JSON output
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Write every iteration's event field as JSONL
    #[arg(long)]
    log_fields: bool,

    /// Output the initial population as JSON
    #[arg(long)]
    output_population: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> fortune_core::Result<()> {
    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::load_or_default(DEFAULT_CONFIG_PATH),
    };
    if let Some(seed) = args.seed {
        config.simulation.seed = seed;
    }
    if let Some(iterations) = args.iterations {
        config.simulation.iterations = iterations;
    }
    if let Some(runs) = args.runs {
        config.simulation.runs = runs;
    }

    tracing::info!("Fortune Simulation");
    tracing::info!("Seed: {}", config.simulation.seed);
    tracing::info!("Scenario: {}", args.scenario);
    tracing::info!("Iterations: {}", config.simulation.iterations);
    tracing::info!("Runs: {}", config.simulation.runs);

    let mut sim = Simulation::new(&config)?;

    let summary = summarize_population(sim.population(), (config.talent.min, config.talent.max));
    for line in summary.to_string().lines() {
        tracing::info!("  {}", line);
    }

    if args.output_population {
        let path = write_population(sim.population(), &args.output_dir)?;
        tracing::info!("Wrote {}", path.display());
    }

    let mut logger = if args.log_fields {
        std::fs::create_dir_all(&args.output_dir)?;
        let path = args
            .output_dir
            .join(format!("fields_{}.jsonl", args.scenario));
        tracing::info!("Logging event fields to {}", path.display());
        FieldLogger::new(path)?
    } else {
        FieldLogger::null()
    };

    let report = run_scenario(
        &mut sim,
        args.scenario,
        config.simulation.runs,
        config.simulation.iterations,
        &mut logger,
    );

    let path = write_scenario_report(&report, &args.output_dir)?;
    tracing::info!("Wrote {}", path.display());

    for run in &report.runs {
        tracing::info!(
            "{}: mean {:.2}, median {:.2}, max {:.2}, top 10% hold {:.1}%",
            run.run_id,
            run.summary.mean,
            run.summary.median,
            run.summary.max,
            run.summary.top_decile_share * 100.0
        );
    }
    match report.mean_correlation() {
        Some(r) => tracing::info!(
            "Mean correlation between {} and property: {:.4}",
            report.attribute,
            r
        ),
        None => tracing::info!("Correlation between {} and property undefined", report.attribute),
    }

    Ok(())
}
