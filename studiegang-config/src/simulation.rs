//! Simulation loop configuration.
//!
//! Governs the run horizon, the graduation requirements, and the RNG seed
//! that makes a run reproducible.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct SimulationConfig {
    /// Seed for deterministic simulation.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Maximum number of semesters to simulate.
    #[serde(default = "default_max_semesters")]
    #[validate(range(min = 1, max = 40))]
    pub max_semesters: u32,

    /// Credits required for graduation.
    #[serde(default = "default_required_credits")]
    #[validate(range(min = 1, max = 400))]
    pub required_credits: u32,

    /// Catalog category whose courses are all mandatory for graduation.
    #[serde(default = "default_core_category")]
    #[validate(custom(function = validation::validate_non_empty))]
    pub core_category: String,
}

fn default_seed() -> u64 {
    42
}

fn default_max_semesters() -> u32 {
    14
}

fn default_required_credits() -> u32 {
    120
}

fn default_core_category() -> String {
    "CS Core".into()
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            max_semesters: default_max_semesters(),
            required_credits: default_required_credits(),
            core_category: default_core_category(),
        }
    }
}
