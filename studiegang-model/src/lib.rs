/*!
# Studiegång Model

Deterministic agent-based simulation of student progression through a
curriculum. Each simulated semester the model activates students in a
seeded-random order; a student checks the dropout rules, enrolls in planned
courses (recording blockages where prerequisites or term offerings get in the
way), attempts them with ability-weighted grade outcomes, and checks
graduation.

## Key Components:
- **Student Agents:** Per-student semester stepping with transcripts.
- **University Model:** Random activation, shared seeded RNG, census series.
- **State Hashing:** BLAKE3 digest over agent state for replay validation.
- **Scenarios:** Recorded seed + expected hash for reproducibility checks.
- **Artifacts:** CSV/JSON exports consumed by the analysis crate.
*/

pub mod agent;
pub mod collector;
pub mod diagnostics;
pub mod error;
pub mod model;
pub mod outcomes;
pub mod runner;
pub mod scenario;

pub use agent::{BlockReason, Blockage, StudentAgent};
pub use collector::{DataCollector, SemesterRow};
pub use diagnostics::DiagnosticsCollector;
pub use error::SimulationError;
pub use model::{SimulationSummary, UniversityModel};
pub use outcomes::{BlockedCourseRow, StudentOutcome};
pub use runner::{run_simulation, RunOverrides};
pub use scenario::Scenario;
