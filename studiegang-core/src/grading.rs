//! ## studiegang-core::grading
//! **Grade scale, transcripts, and GPA**
//!
//! Transcripts are append-only attempt logs: repeating a course adds a new
//! attempt, it never rewrites history. GPA is computed over the best grade
//! per attempted course, weighted by credits, so a passed repeat supersedes
//! the original failure without erasing it.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CourseCode;

/// Letter grade on the 4.0 scale. `F` is the only failing grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    /// Quality points on the 4.0 scale.
    pub fn points(self) -> f64 {
        match self {
            Grade::A => 4.0,
            Grade::B => 3.0,
            Grade::C => 2.0,
            Grade::D => 1.0,
            Grade::F => 0.0,
        }
    }

    pub fn is_passing(self) -> bool {
        !matches!(self, Grade::F)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" => Ok(Grade::A),
            "B" => Ok(Grade::B),
            "C" => Ok(Grade::C),
            "D" => Ok(Grade::D),
            "F" => Ok(Grade::F),
            other => Err(format!("unknown grade: {other}")),
        }
    }
}

/// One graded course attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Attempt {
    pub semester: u32,
    pub course: CourseCode,
    pub grade: Grade,
    pub credits: u32,
}

/// Append-only log of graded attempts for one student.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    attempts: Vec<Attempt>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, attempt: Attempt) {
        self.attempts.push(attempt);
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Best grade (and its credit value) per attempted course.
    pub fn best_grades(&self) -> BTreeMap<&CourseCode, (Grade, u32)> {
        let mut best: BTreeMap<&CourseCode, (Grade, u32)> = BTreeMap::new();
        for attempt in &self.attempts {
            match best.get(&attempt.course) {
                Some((grade, _)) if grade.points() >= attempt.grade.points() => {}
                _ => {
                    best.insert(&attempt.course, (attempt.grade, attempt.credits));
                }
            }
        }
        best
    }

    /// Credit-weighted GPA over the best grade per course.
    /// An empty transcript has a GPA of 0.0.
    pub fn gpa(&self) -> f64 {
        let best = self.best_grades();
        let total_credits: u32 = best.values().map(|(_, credits)| credits).sum();
        if total_credits == 0 {
            return 0.0;
        }
        let quality_points: f64 = best
            .values()
            .map(|(grade, credits)| grade.points() * f64::from(*credits))
            .sum();
        quality_points / f64::from(total_credits)
    }
}
