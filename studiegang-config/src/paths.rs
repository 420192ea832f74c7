//! Input and artifact file locations.
//!
//! Defaults match the original data pipeline layout under `data/`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DataPathsConfig {
    /// Course catalog input (JSON, keyed by course code).
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,

    /// Synthetic cohort file (JSON array of profiles).
    #[serde(default = "default_students")]
    pub students: PathBuf,

    /// Per-semester census series (CSV).
    #[serde(default = "default_results")]
    pub results: PathBuf,

    /// Per-student outcome rows (CSV).
    #[serde(default = "default_outcomes")]
    pub outcomes: PathBuf,

    /// Course blockage records (CSV).
    #[serde(default = "default_blocked")]
    pub blocked: PathBuf,

    /// Full transcripts (JSON).
    #[serde(default = "default_transcripts")]
    pub transcripts: PathBuf,

    /// Directory for replay-failure bug reports.
    #[serde(default = "default_diagnostics")]
    pub diagnostics: PathBuf,
}

fn default_catalog() -> PathBuf {
    "data/course_catalog.json".into()
}
fn default_students() -> PathBuf {
    "data/synthetic_students.json".into()
}
fn default_results() -> PathBuf {
    "data/results.csv".into()
}
fn default_outcomes() -> PathBuf {
    "data/student_outcomes.csv".into()
}
fn default_blocked() -> PathBuf {
    "data/blocked_courses.csv".into()
}
fn default_transcripts() -> PathBuf {
    "data/transcripts.json".into()
}
fn default_diagnostics() -> PathBuf {
    "data".into()
}

impl Default for DataPathsConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            students: default_students(),
            results: default_results(),
            outcomes: default_outcomes(),
            blocked: default_blocked(),
            transcripts: default_transcripts(),
            diagnostics: default_diagnostics(),
        }
    }
}
