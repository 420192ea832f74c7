use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use studiegang_analysis::{read_blocked, read_outcomes, BottleneckReport, OutcomeSummary};
use studiegang_cohort::CohortGenerator;
use studiegang_config::StudiegangConfig;
use studiegang_core::loader;
use studiegang_model::{run_simulation, RunOverrides};
use studiegang_telemetry::metrics::MetricsRecorder;

type CliResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file (defaults to config/studiegang.yaml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a synthetic student cohort with study plans
    Generate(GenerateArgs),
    /// Run the semester simulation (or replay if a scenario file is provided)
    Simulate(SimulateArgs),
    /// Print the cohort outcome summary from the latest run
    Analyze,
    /// Print the curriculum bottleneck report from the latest run
    Bottlenecks,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Seed for cohort generation (defaults to the configured simulation seed)
    #[arg(long)]
    pub seed: Option<u64>,
    /// Output path (defaults to the configured students path)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct SimulateArgs {
    /// Optional scenario file to replay; if not provided, configured defaults are used.
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,
    #[arg(long)]
    pub seed: Option<u64>,
    /// Simulation horizon in semesters
    #[arg(long)]
    pub semesters: Option<u32>,
    /// Expected final state hash; a mismatch fails the run with a bug report
    #[arg(long)]
    pub validate_hash: Option<String>,
}

pub fn load_config(path: Option<&Path>) -> Result<StudiegangConfig, Box<dyn std::error::Error + Send + Sync>> {
    let config = match path {
        Some(path) => StudiegangConfig::load_from_path(path)?,
        None => StudiegangConfig::load()?,
    };
    Ok(config)
}

pub fn run_generate(args: GenerateArgs, config: &StudiegangConfig) -> CliResult {
    let catalog = loader::load_catalog(&config.paths.catalog)?;
    let seed = args.seed.unwrap_or(config.simulation.seed);
    let output = args.output.as_deref().unwrap_or(&config.paths.students);

    let mut generator = CohortGenerator::new(config.cohort.clone(), seed);
    let students = generator.generate(&catalog, &config.simulation.core_category);
    loader::write_students(output, &students)?;

    info!(
        "Generated {} students (seed {}) to {}",
        students.len(),
        seed,
        output.display()
    );
    Ok(())
}

pub fn run_simulate(
    args: SimulateArgs,
    config: &StudiegangConfig,
    metrics: MetricsRecorder,
) -> CliResult {
    let overrides = RunOverrides {
        seed: args.seed,
        max_semesters: args.semesters,
    };
    let summary = run_simulation(
        config,
        args.scenario.as_deref(),
        &overrides,
        args.validate_hash.as_deref(),
        metrics.clone(),
    )?;
    report_metrics(config, &metrics);

    println!(
        "Simulation complete after {} semesters: {} graduated, {} dropped out, {} still enrolled (avg GPA {:.2})",
        summary.semesters,
        summary.graduated,
        summary.dropped_out,
        summary.enrolled,
        summary.avg_gpa
    );
    println!("State hash: {}", summary.state_hash);
    Ok(())
}

fn report_metrics(config: &StudiegangConfig, metrics: &MetricsRecorder) {
    if !config.telemetry.metrics {
        return;
    }
    match metrics.gather_metrics() {
        Ok(text) => tracing::debug!("Run metrics:\n{text}"),
        Err(err) => tracing::warn!("Failed to gather metrics: {err}"),
    }
}

pub fn run_analyze(config: &StudiegangConfig) -> CliResult {
    let outcomes = read_outcomes(&config.paths.outcomes)?;
    let summary = OutcomeSummary::build(&outcomes);
    println!("{summary}");
    Ok(())
}

pub fn run_bottlenecks(config: &StudiegangConfig) -> CliResult {
    let catalog = loader::load_catalog(&config.paths.catalog)?;
    let blocked = read_blocked(&config.paths.blocked)?;
    let outcomes = read_outcomes(&config.paths.outcomes)?;
    let report = BottleneckReport::build(&blocked, &outcomes, &catalog);
    println!("{report}");
    Ok(())
}
