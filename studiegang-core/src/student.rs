//! ## studiegang-core::student
//! **Student profiles and study plans**
//!
//! A profile is the synthetic-generator record: static attributes plus the
//! per-semester study plan. Simulation state (transcript, credits, status
//! flags) lives in the model crate; the profile is immutable input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::CourseCode;
use crate::term::Term;

/// Planned courses per semester, keyed by 1-based semester number.
///
/// Serialized as a JSON object with stringified semester keys, matching the
/// synthetic student data format.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudyPlan {
    semesters: BTreeMap<u32, Vec<CourseCode>>,
}

impl StudyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, semester: u32, courses: Vec<CourseCode>) {
        self.semesters.insert(semester, courses);
    }

    /// Courses planned for the given semester. Empty past the plan's end.
    pub fn courses_for(&self, semester: u32) -> &[CourseCode] {
        self.semesters
            .get(&semester)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of semesters with at least one planned course.
    pub fn planned_semesters(&self) -> usize {
        self.semesters.len()
    }

    /// Total number of distinct planned course entries.
    pub fn planned_courses(&self) -> usize {
        self.semesters.values().map(Vec::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &Vec<CourseCode>)> {
        self.semesters.iter()
    }
}

/// One synthetic student, as produced by the cohort generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentProfile {
    pub id: u64,

    /// Probability-like ability score in `0.0..=1.0`; drives grade outcomes.
    pub academic_ability: f64,

    /// Baseline attrition disposition in `0.0..=1.0`. Carried through to the
    /// outcome artifacts for correlation analysis; the structured dropout
    /// policy in the model crate governs actual attrition.
    pub dropout_chance: f64,

    pub admission_term: Term,

    #[serde(default)]
    pub study_plan: StudyPlan,
}
