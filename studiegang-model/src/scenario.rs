//! ## studiegang-model::scenario
//! **Recorded runs and replay validation**
//!
//! A scenario file pins the seed (and optional overrides) of a run together
//! with the state hash it is expected to reproduce. Replaying a scenario is
//! the determinism check: any divergence is a validation failure.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use studiegang_config::SimulationConfig;

use crate::error::SimulationError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub seed: u64,

    /// Override for the semester horizon.
    #[serde(default)]
    pub max_semesters: Option<u32>,

    /// Override for the graduation credit requirement.
    #[serde(default)]
    pub required_credits: Option<u32>,

    /// State hash a replay must reproduce.
    #[serde(default)]
    pub expected_hash: Option<String>,
}

impl Scenario {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SimulationError::Validation(format!(
                "Scenario file not found: {}",
                path.display()
            )));
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SimulationError> {
        let content = serde_yaml::to_string(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Applies the scenario's pinned values onto a simulation config.
    pub fn apply(&self, config: &mut SimulationConfig) {
        config.seed = self.seed;
        if let Some(max_semesters) = self.max_semesters {
            config.max_semesters = max_semesters;
        }
        if let Some(required_credits) = self.required_credits {
            config.required_credits = required_credits;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_round_trips_through_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.scenario.yaml");

        let scenario = Scenario {
            seed: 7,
            max_semesters: Some(10),
            required_credits: None,
            expected_hash: Some("abc123".into()),
        };
        scenario.save(&path).unwrap();

        let loaded = Scenario::load(&path).unwrap();
        assert_eq!(loaded.seed, 7);
        assert_eq!(loaded.max_semesters, Some(10));
        assert_eq!(loaded.expected_hash.as_deref(), Some("abc123"));
    }

    #[test]
    fn apply_only_overrides_pinned_fields() {
        let scenario = Scenario {
            seed: 99,
            max_semesters: None,
            required_credits: Some(60),
            expected_hash: None,
        };
        let mut config = SimulationConfig::default();
        scenario.apply(&mut config);
        assert_eq!(config.seed, 99);
        assert_eq!(config.required_credits, 60);
        assert_eq!(config.max_semesters, SimulationConfig::default().max_semesters);
    }

    #[test]
    fn missing_scenario_is_a_validation_error() {
        assert!(matches!(
            Scenario::load("no/such/run.yaml"),
            Err(SimulationError::Validation(_))
        ));
    }
}
