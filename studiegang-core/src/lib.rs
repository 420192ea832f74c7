//! # studiegang-core
//!
//! Foundation layer for the curriculum progression simulator.
//! Domain types shared by every other crate: the course catalog, academic
//! terms and the semester calendar, grades and transcripts, and the synthetic
//! student profile format.
//!
//! ### Key Submodules:
//! - `catalog`: Course catalog with prerequisite/corequisite references
//! - `term`: Academic term cycle and the shared semester calendar
//! - `grading`: Grade scale, attempt transcripts, GPA computation
//! - `student`: Student profiles and per-semester study plans
//! - `loader`: JSON data loading for catalogs and cohorts
//!
//! Determinism is a design constraint: every collection that feeds the
//! simulation RNG iterates in a stable order (BTree collections throughout).

pub mod catalog;
pub mod error;
pub mod grading;
pub mod loader;
pub mod student;
pub mod term;

pub mod prelude {
    pub use crate::catalog::{Catalog, Course, CourseCode};
    pub use crate::error::CoreError;
    pub use crate::grading::{Attempt, Grade, Transcript};
    pub use crate::student::{StudentProfile, StudyPlan};
    pub use crate::term::{AcademicCalendar, Term};
}

pub use catalog::{Catalog, Course, CourseCode};
pub use error::CoreError;
pub use grading::{Attempt, Grade, Transcript};
pub use student::{StudentProfile, StudyPlan};
pub use term::{AcademicCalendar, Term};
