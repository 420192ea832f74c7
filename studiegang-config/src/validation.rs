//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across multiple configuration modules.

use validator::ValidationError;

use crate::cohort::CohortConfig;

/// Validate that a value is a probability in `0.0..=1.0`.
pub fn validate_probability(value: f64) -> Result<(), ValidationError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::new("must_be_probability"))
    }
}

/// Validate that a string field is non-empty.
pub fn validate_non_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("must_not_be_empty"))
    } else {
        Ok(())
    }
}

/// Validate a tracing level name.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error"]
        .contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Cross-field checks for cohort generation: each min must not exceed its max.
pub fn validate_cohort_ranges(config: &CohortConfig) -> Result<(), ValidationError> {
    if config.ability_min > config.ability_max {
        return Err(ValidationError::new("ability_range_inverted"));
    }
    if config.dropout_chance_min > config.dropout_chance_max {
        return Err(ValidationError::new("dropout_chance_range_inverted"));
    }
    if config.min_courses_per_semester > config.max_courses_per_semester {
        return Err(ValidationError::new("courses_per_semester_range_inverted"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_bounds() {
        assert!(validate_probability(0.0).is_ok());
        assert!(validate_probability(1.0).is_ok());
        assert!(validate_probability(-0.1).is_err());
        assert!(validate_probability(1.1).is_err());
    }

    #[test]
    fn log_levels() {
        assert!(validate_log_level("info").is_ok());
        assert!(validate_log_level("DEBUG").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }
}
