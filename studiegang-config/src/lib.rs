//! # Studiegång Configuration System
//!
//! Hierarchical configuration management for the curriculum progression
//! simulator.
//!
//! ## Features
//! - **Unified Configuration**: Single source of truth across all components
//! - **Validation**: Runtime validation of every tunable parameter
//! - **Environment Awareness**: `STUDIEGANG_ENV` selects override files
//! - **Determinism**: The seed and every policy knob live here, so a config
//!   file plus a seed fully determines a run

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::Validate;

mod cohort;
mod dropout;
mod error;
mod paths;
mod simulation;
mod telemetry;
mod validation;

pub use cohort::CohortConfig;
pub use dropout::{
    DropoutPolicyConfig, EarlyAttritionConfig, LateAttritionConfig, ProbationConfig,
    StagnationConfig,
};
pub use error::ConfigError;
pub use paths::DataPathsConfig;
pub use simulation::SimulationConfig;
pub use telemetry::TelemetryConfig;

/// Top-level configuration container for all simulator components.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct StudiegangConfig {
    /// Simulation loop parameters (seed, horizon, graduation requirements).
    #[validate(nested)]
    pub simulation: SimulationConfig,

    /// Synthetic cohort generation parameters.
    #[validate(nested)]
    pub cohort: CohortConfig,

    /// Structured dropout policy rules.
    #[validate(nested)]
    pub dropout: DropoutPolicyConfig,

    /// Input and artifact file locations.
    #[validate(nested)]
    pub paths: DataPathsConfig,

    /// Telemetry and observability configuration.
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl StudiegangConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/studiegang.yaml` - base settings. If missing, defaults are used.
    /// 3. `config/<environment>.yaml` - environment-specific overrides.
    /// 4. `STUDIEGANG_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(StudiegangConfig::default()));

        if Path::new("config/studiegang.yaml").exists() {
            figment = figment.merge(Yaml::file("config/studiegang.yaml"));
        } else {
            warn!("config/studiegang.yaml not found, using default configuration");
        }

        let env = std::env::var("STUDIEGANG_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        figment
            .merge(Env::prefixed("STUDIEGANG_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path for testing/validation.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        Figment::from(Serialized::defaults(StudiegangConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("STUDIEGANG_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_validation() {
        let config = StudiegangConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn load_from_yaml_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studiegang.yaml");
        std::fs::write(
            &path,
            "simulation:\n  seed: 7\n  max_semesters: 10\ncohort:\n  students_per_term: 50\n",
        )
        .unwrap();

        let config = StudiegangConfig::load_from_path(&path).unwrap();
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.max_semesters, 10);
        assert_eq!(config.cohort.students_per_term, 50);
        // Untouched sections keep their defaults.
        assert_eq!(config.simulation.required_credits, 120);
    }

    #[test]
    fn invalid_override_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("studiegang.yaml");
        std::fs::write(&path, "simulation:\n  required_credits: 0\n").unwrap();

        assert!(matches!(
            StudiegangConfig::load_from_path(&path),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        assert!(matches!(
            StudiegangConfig::load_from_path("no/such/file.yaml"),
            Err(ConfigError::FileNotFound(_))
        ));
    }
}
