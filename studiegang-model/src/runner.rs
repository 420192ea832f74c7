//! ## studiegang-model::runner
//! **Run orchestration**
//!
//! Loads inputs, applies scenario overrides, runs the model, writes every
//! artifact, and validates replay hashes. The CLI stays a thin shell around
//! this module.

use std::path::Path;

use tracing::{info, instrument};

use studiegang_config::StudiegangConfig;
use studiegang_core::loader;
use studiegang_telemetry::MetricsRecorder;

use crate::diagnostics::DiagnosticsCollector;
use crate::error::SimulationError;
use crate::model::{SimulationSummary, UniversityModel};
use crate::outcomes;
use crate::scenario::Scenario;

/// Overrides taken from the command line, applied after config and scenario.
#[derive(Debug, Default, Clone)]
pub struct RunOverrides {
    pub seed: Option<u64>,
    pub max_semesters: Option<u32>,
}

/// Runs the simulation end to end and writes all artifacts.
///
/// Precedence for simulation parameters: config file < scenario file < CLI
/// overrides. A hash given via `validate_hash` (or pinned in the scenario)
/// must match the final state hash; a mismatch produces a bug report and a
/// validation error.
#[instrument(skip_all, fields(scenario = ?scenario_path.map(Path::display)))]
pub fn run_simulation(
    config: &StudiegangConfig,
    scenario_path: Option<&Path>,
    run_overrides: &RunOverrides,
    validate_hash: Option<&str>,
    metrics: MetricsRecorder,
) -> Result<SimulationSummary, SimulationError> {
    let mut simulation = config.simulation.clone();

    let scenario = match scenario_path {
        Some(path) => {
            let scenario = Scenario::load(path)?;
            scenario.apply(&mut simulation);
            Some(scenario)
        }
        None => None,
    };

    if let Some(seed) = run_overrides.seed {
        simulation.seed = seed;
    }
    if let Some(max_semesters) = run_overrides.max_semesters {
        simulation.max_semesters = max_semesters;
    }

    let catalog = loader::load_catalog(&config.paths.catalog)?;
    let students = loader::load_students(&config.paths.students)?;

    info!(
        "Running simulation: seed {}, horizon {} semesters, {} students",
        simulation.seed,
        simulation.max_semesters,
        students.len()
    );

    let mut model = UniversityModel::new(
        catalog,
        students,
        simulation,
        config.dropout.clone(),
        metrics,
    );
    let summary = model.run();

    outcomes::write_results_csv(&config.paths.results, model.census_rows())?;
    outcomes::write_outcomes_csv(&config.paths.outcomes, &outcomes::student_outcomes(&model))?;
    outcomes::write_blocked_csv(&config.paths.blocked, &outcomes::blocked_course_rows(&model))?;
    outcomes::write_transcripts_json(&config.paths.transcripts, &model)?;

    let expected = validate_hash
        .map(str::to_string)
        .or_else(|| scenario.as_ref().and_then(|s| s.expected_hash.clone()));

    if let Some(expected) = expected {
        let mut diagnostics = DiagnosticsCollector::with_output_dir(&config.paths.diagnostics);
        validate_state_hash(&expected, &summary, &mut diagnostics)?;
    }

    Ok(summary)
}

fn validate_state_hash(
    expected: &str,
    summary: &SimulationSummary,
    diagnostics: &mut DiagnosticsCollector,
) -> Result<(), SimulationError> {
    if expected == summary.state_hash {
        info!("Replay validation successful: {}", summary.state_hash);
        return Ok(());
    }

    let report = format!(
        "Replay validation failed!\nExpected: {}\nActual: {}",
        expected, summary.state_hash
    );
    let filename = diagnostics.record_bug_report(&report)?;
    Err(SimulationError::Validation(format!(
        "{report}\nBug report saved to: {filename}"
    )))
}
