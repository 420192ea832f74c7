//! ## studiegang-cli
//! **Unified operational interface**
//! Studiegång main entrypoint: cohort generation, deterministic simulation
//! runs (with scenario replay), and post-run analysis reports.

use clap::Parser;

use studiegang_telemetry::logging::EventLogger;
use studiegang_telemetry::metrics::MetricsRecorder;

mod commands;

use commands::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let config = commands::load_config(cli.config.as_deref())?;
    EventLogger::init_with_default(&config.telemetry.log_level);
    let metrics = MetricsRecorder::new();

    match cli.command {
        Commands::Generate(args) => commands::run_generate(args, &config),
        Commands::Simulate(args) => commands::run_simulate(args, &config, metrics),
        Commands::Analyze => commands::run_analyze(&config),
        Commands::Bottlenecks => commands::run_bottlenecks(&config),
    }
}
