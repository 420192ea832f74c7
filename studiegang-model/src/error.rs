use thiserror::Error;

use studiegang_config::ConfigError;
use studiegang_core::CoreError;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Data error: {0}")]
    Data(#[from] CoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Scenario error: {0}")]
    Scenario(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
