//! ## studiegang-core::catalog
//! **Course catalog with prerequisite graph**
//!
//! The catalog is the static curriculum description: per-course credits,
//! category, prerequisite and corequisite references, and the terms the
//! course is offered in. Stored as a `BTreeMap` so catalog iteration is
//! deterministic across runs.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::term::Term;

/// Course identifier, e.g. `CS1101`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCode(pub String);

impl CourseCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseCode {
    fn from(code: &str) -> Self {
        CourseCode(code.to_string())
    }
}

fn default_credits() -> u32 {
    3
}

/// A single catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub name: String,

    /// Credit value awarded on passing.
    #[serde(default = "default_credits")]
    pub credits: u32,

    /// Curriculum category, e.g. `CS Core` or `Math`.
    #[serde(default)]
    pub category: String,

    /// Courses that must be completed before enrolling.
    #[serde(default)]
    pub prerequisites: Vec<CourseCode>,

    /// Courses that must be taken alongside this one.
    #[serde(default)]
    pub corequisites: Vec<CourseCode>,

    /// Terms the course is offered in. Empty means unrestricted.
    #[serde(default)]
    pub terms_offered: Vec<Term>,
}

impl Course {
    /// Whether the course can be taken in the given term.
    pub fn offered_in(&self, term: Term) -> bool {
        self.terms_offered.is_empty() || self.terms_offered.contains(&term)
    }
}

/// The full curriculum, keyed by course code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    courses: BTreeMap<CourseCode, Course>,
}

impl Catalog {
    pub fn from_courses<I>(courses: I) -> Self
    where
        I: IntoIterator<Item = (CourseCode, Course)>,
    {
        Self {
            courses: courses.into_iter().collect(),
        }
    }

    pub fn get(&self, code: &CourseCode) -> Option<&Course> {
        self.courses.get(code)
    }

    pub fn contains(&self, code: &CourseCode) -> bool {
        self.courses.contains_key(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CourseCode, &Course)> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// All courses in the given category, in code order. These are the
    /// courses a student must complete to graduate.
    pub fn core_courses(&self, category: &str) -> Vec<CourseCode> {
        self.courses
            .iter()
            .filter(|(_, course)| course.category == category)
            .map(|(code, _)| code.clone())
            .collect()
    }

    /// Rejects empty catalogs and prerequisite/corequisite references to
    /// codes that are not in the catalog.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.courses.is_empty() {
            return Err(CoreError::EmptyCatalog);
        }
        for (code, course) in &self.courses {
            for referenced in course
                .prerequisites
                .iter()
                .chain(course.corequisites.iter())
            {
                if !self.courses.contains_key(referenced) {
                    return Err(CoreError::UnknownCourse {
                        referenced: referenced.clone(),
                        referencing: code.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(credits: u32, category: &str, prereqs: &[&str]) -> Course {
        Course {
            name: String::new(),
            credits,
            category: category.to_string(),
            prerequisites: prereqs.iter().map(|c| CourseCode::from(*c)).collect(),
            corequisites: Vec::new(),
            terms_offered: Vec::new(),
        }
    }

    #[test]
    fn core_courses_filters_by_category() {
        let catalog = Catalog::from_courses([
            (CourseCode::from("CS1101"), course(3, "CS Core", &[])),
            (CourseCode::from("MA1001"), course(4, "Math", &[])),
            (CourseCode::from("CS2201"), course(3, "CS Core", &["CS1101"])),
        ]);
        let core = catalog.core_courses("CS Core");
        assert_eq!(core, vec![CourseCode::from("CS1101"), CourseCode::from("CS2201")]);
    }

    #[test]
    fn validate_rejects_dangling_prerequisite() {
        let catalog = Catalog::from_courses([(
            CourseCode::from("CS2201"),
            course(3, "CS Core", &["CS9999"]),
        )]);
        assert!(matches!(
            catalog.validate(),
            Err(CoreError::UnknownCourse { .. })
        ));
    }

    #[test]
    fn validate_rejects_empty_catalog() {
        assert!(matches!(
            Catalog::default().validate(),
            Err(CoreError::EmptyCatalog)
        ));
    }

    #[test]
    fn unrestricted_course_is_offered_every_term() {
        let unrestricted = course(3, "Elective", &[]);
        assert!(unrestricted.offered_in(Term::Fall));
        assert!(unrestricted.offered_in(Term::Summer));

        let fall_only = Course {
            terms_offered: vec![Term::Fall],
            ..unrestricted
        };
        assert!(fall_only.offered_in(Term::Fall));
        assert!(!fall_only.offered_in(Term::Spring));
    }
}
