//! Structured dropout policy configuration.
//!
//! Four attrition rules, checked in order at the start of each student
//! semester: early attrition, academic probation, stagnation, and late
//! attrition. Each rule is individually tunable.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

#[derive(Default, Debug, Serialize, Deserialize, Validate, Clone)]
pub struct DropoutPolicyConfig {
    /// Low-ability students leaving within their first few semesters.
    #[validate(nested)]
    pub early: EarlyAttritionConfig,

    /// Dismissal after consecutive semesters below the GPA floor.
    #[validate(nested)]
    pub probation: ProbationConfig,

    /// Dismissal for insufficient credit progress.
    #[validate(nested)]
    pub stagnation: StagnationConfig,

    /// Residual attrition among long-enrolled students.
    #[validate(nested)]
    pub late: LateAttritionConfig,
}

/// Early attrition: within `from_semester..=to_semester`, a student with
/// ability below `ability_below` drops out with probability `probability`.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct EarlyAttritionConfig {
    #[serde(default = "default_early_from")]
    #[validate(range(min = 1, max = 40))]
    pub from_semester: u32,

    #[serde(default = "default_early_to")]
    #[validate(range(min = 1, max = 40))]
    pub to_semester: u32,

    #[serde(default = "default_early_ability")]
    #[validate(custom(function = validation::validate_probability))]
    pub ability_below: f64,

    #[serde(default = "default_early_probability")]
    #[validate(custom(function = validation::validate_probability))]
    pub probability: f64,
}

fn default_early_from() -> u32 {
    2
}
fn default_early_to() -> u32 {
    4
}
fn default_early_ability() -> f64 {
    0.65
}
fn default_early_probability() -> f64 {
    0.15
}

impl Default for EarlyAttritionConfig {
    fn default() -> Self {
        Self {
            from_semester: default_early_from(),
            to_semester: default_early_to(),
            ability_below: default_early_ability(),
            probability: default_early_probability(),
        }
    }
}

/// Academic probation: after `min_semester`, a GPA below `gpa_below` for
/// `streak` consecutive semesters leads to dismissal.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct ProbationConfig {
    #[serde(default = "default_probation_min_semester")]
    #[validate(range(min = 1, max = 40))]
    pub min_semester: u32,

    #[serde(default = "default_probation_gpa")]
    #[validate(range(min = 0.0, max = 4.0))]
    pub gpa_below: f64,

    #[serde(default = "default_probation_streak")]
    #[validate(range(min = 1, max = 10))]
    pub streak: u32,
}

fn default_probation_min_semester() -> u32 {
    4
}
fn default_probation_gpa() -> f64 {
    2.0
}
fn default_probation_streak() -> u32 {
    2
}

impl Default for ProbationConfig {
    fn default() -> Self {
        Self {
            min_semester: default_probation_min_semester(),
            gpa_below: default_probation_gpa(),
            streak: default_probation_streak(),
        }
    }
}

/// Stagnation: fewer than `min_credits` completed by `semester` is a dismissal.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct StagnationConfig {
    #[serde(default = "default_stagnation_semester")]
    #[validate(range(min = 1, max = 40))]
    pub semester: u32,

    #[serde(default = "default_stagnation_credits")]
    #[validate(range(min = 0, max = 400))]
    pub min_credits: u32,
}

fn default_stagnation_semester() -> u32 {
    5
}
fn default_stagnation_credits() -> u32 {
    12
}

impl Default for StagnationConfig {
    fn default() -> Self {
        Self {
            semester: default_stagnation_semester(),
            min_credits: default_stagnation_credits(),
        }
    }
}

/// Late attrition: from `from_semester` on, every student drops out with
/// probability `probability` each semester.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct LateAttritionConfig {
    #[serde(default = "default_late_from")]
    #[validate(range(min = 1, max = 40))]
    pub from_semester: u32,

    #[serde(default = "default_late_probability")]
    #[validate(custom(function = validation::validate_probability))]
    pub probability: f64,
}

fn default_late_from() -> u32 {
    6
}
fn default_late_probability() -> f64 {
    0.02
}

impl Default for LateAttritionConfig {
    fn default() -> Self {
        Self {
            from_semester: default_late_from(),
            probability: default_late_probability(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn valid_default_policy() {
        DropoutPolicyConfig::default()
            .validate()
            .expect("Default policy should be valid");
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let mut policy = DropoutPolicyConfig::default();
        policy.late.probability = 1.5;
        assert!(policy.validate().is_err());
    }
}
