//! # studiegang-analysis
//!
//! Post-run analysis over the simulation artifacts: cohort outcome summaries
//! and curriculum bottleneck reports. Reads the CSV artifacts back and
//! renders sectioned text reports.

pub mod bottlenecks;
pub mod error;
pub mod loader;
pub mod outcomes;

pub use bottlenecks::BottleneckReport;
pub use error::AnalysisError;
pub use loader::{read_blocked, read_outcomes};
pub use outcomes::OutcomeSummary;
