//! Synthetic cohort generation parameters.
//!
//! The generator draws per-student attributes from these ranges and packs
//! study plans against the per-semester course and credit caps.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
#[validate(schema(function = validation::validate_cohort_ranges))]
pub struct CohortConfig {
    /// Students generated per admission term (Fall, Spring, Summer).
    #[serde(default = "default_students_per_term")]
    #[validate(range(min = 1, max = 1_000_000))]
    pub students_per_term: u32,

    /// Lower bound for drawn academic ability.
    #[serde(default = "default_ability_min")]
    #[validate(custom(function = validation::validate_probability))]
    pub ability_min: f64,

    /// Upper bound for drawn academic ability.
    #[serde(default = "default_ability_max")]
    #[validate(custom(function = validation::validate_probability))]
    pub ability_max: f64,

    /// Lower bound for drawn baseline dropout disposition.
    #[serde(default = "default_dropout_chance_min")]
    #[validate(custom(function = validation::validate_probability))]
    pub dropout_chance_min: f64,

    /// Upper bound for drawn baseline dropout disposition.
    #[serde(default = "default_dropout_chance_max")]
    #[validate(custom(function = validation::validate_probability))]
    pub dropout_chance_max: f64,

    /// Total courses a study plan aims to cover (~120 credits at 3 each).
    #[serde(default = "default_target_courses")]
    #[validate(range(min = 1, max = 100))]
    pub target_courses: u32,

    /// Fewest courses planned into one semester.
    #[serde(default = "default_min_courses_per_semester")]
    #[validate(range(min = 1, max = 10))]
    pub min_courses_per_semester: u32,

    /// Most courses planned into one semester.
    #[serde(default = "default_max_courses_per_semester")]
    #[validate(range(min = 1, max = 10))]
    pub max_courses_per_semester: u32,

    /// Credit ceiling per planned semester.
    #[serde(default = "default_semester_credit_cap")]
    #[validate(range(min = 3, max = 30))]
    pub semester_credit_cap: u32,

    /// Plans never extend past this many semesters.
    #[serde(default = "default_plan_semester_limit")]
    #[validate(range(min = 1, max = 40))]
    pub plan_semester_limit: u32,
}

fn default_students_per_term() -> u32 {
    1000
}
fn default_ability_min() -> f64 {
    0.50
}
fn default_ability_max() -> f64 {
    0.95
}
fn default_dropout_chance_min() -> f64 {
    0.05
}
fn default_dropout_chance_max() -> f64 {
    0.20
}
fn default_target_courses() -> u32 {
    40
}
fn default_min_courses_per_semester() -> u32 {
    3
}
fn default_max_courses_per_semester() -> u32 {
    5
}
fn default_semester_credit_cap() -> u32 {
    15
}
fn default_plan_semester_limit() -> u32 {
    12
}

impl Default for CohortConfig {
    fn default() -> Self {
        Self {
            students_per_term: default_students_per_term(),
            ability_min: default_ability_min(),
            ability_max: default_ability_max(),
            dropout_chance_min: default_dropout_chance_min(),
            dropout_chance_max: default_dropout_chance_max(),
            target_courses: default_target_courses(),
            min_courses_per_semester: default_min_courses_per_semester(),
            max_courses_per_semester: default_max_courses_per_semester(),
            semester_credit_cap: default_semester_credit_cap(),
            plan_semester_limit: default_plan_semester_limit(),
        }
    }
}
