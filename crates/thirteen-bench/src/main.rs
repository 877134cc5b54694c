use std::path::PathBuf;

use clap::Parser;

use thirteen_bench::config::{BenchmarkConfig, ResolvedOutputs};
use thirteen_bench::logging::init_logging;
use thirteen_bench::runner::ArrangementRunner;

/// Benchmark harness for Thirteen Water arrangement policies.
#[derive(Debug, Parser)]
#[command(
    name = "thirteen-bench",
    author,
    version,
    about = "Deterministic Thirteen Water arrangement benchmark"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of hands to deal.
    #[arg(long, value_name = "HANDS")]
    hands: Option<usize>,

    /// Override the RNG seed for deal generation.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (nothing is dealt).
    #[arg(long)]
    validate_only: bool,

    /// Include card lists in hint events (forces THIRTEEN_DECISION_DETAILS=1).
    #[arg(long)]
    log_decision_details: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(hands) = cli.hands {
        config.deals.hands = hands;
    }

    if let Some(seed) = cli.seed {
        config.deals.seed = Some(seed);
    }

    if cli.log_decision_details {
        config.logging.decision_details = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let agent_count = config.agents.len();
    let run_id = config.run_id.clone();
    let hands = config.deals.hands;
    let seats = config.deals.seats.len();

    println!(
        "Loaded configuration '{run_id}' with {agent_count} agent{} ({hands} hands, {seats} seat{} each)",
        if agent_count == 1 { "" } else { "s" },
        if seats == 1 { "" } else { "s" }
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = ArrangementRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: no hands dealt.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Run complete for '{run_id}': {} hands × {} seats → {} rows at {}",
        summary.hands_played,
        summary.seats_per_hand,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
