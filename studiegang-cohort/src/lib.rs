//! # studiegang-cohort
//!
//! Seeded synthetic cohort generation.
//!
//! Produces student profiles with study plans built against a course catalog:
//! remaining core courses are planned first, semesters are packed up to the
//! configured course and credit caps, and per-student attributes are drawn
//! from configured ranges. The same seed and catalog always produce the same
//! cohort.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use studiegang_config::CohortConfig;
use studiegang_core::{Catalog, CourseCode, StudentProfile, StudyPlan, Term};

/// Seeded generator for synthetic student cohorts.
pub struct CohortGenerator {
    config: CohortConfig,
    rng: StdRng,
}

impl CohortGenerator {
    pub fn new(config: CohortConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates `students_per_term` profiles for each admission term.
    /// Ids are assigned sequentially from 1 across the whole cohort.
    pub fn generate(&mut self, catalog: &Catalog, core_category: &str) -> Vec<StudentProfile> {
        let core_courses = catalog.core_courses(core_category);
        let mut students =
            Vec::with_capacity(self.config.students_per_term as usize * Term::CYCLE.len());
        let mut student_id = 1u64;

        for term in Term::CYCLE {
            for _ in 0..self.config.students_per_term {
                students.push(self.generate_student(student_id, term, catalog, &core_courses));
                student_id += 1;
            }
        }

        info!(
            "Generated {} synthetic students ({} core courses in every plan)",
            students.len(),
            core_courses.len()
        );
        students
    }

    fn generate_student(
        &mut self,
        id: u64,
        admission_term: Term,
        catalog: &Catalog,
        core_courses: &[CourseCode],
    ) -> StudentProfile {
        let academic_ability =
            round2(self.rng.random_range(self.config.ability_min..=self.config.ability_max));
        let dropout_chance = round2(
            self.rng
                .random_range(self.config.dropout_chance_min..=self.config.dropout_chance_max),
        );

        let study_plan = self.build_plan(catalog, core_courses);
        debug!(
            "Student {id}: ability {academic_ability}, {} planned courses",
            study_plan.planned_courses()
        );

        StudentProfile {
            id,
            academic_ability,
            dropout_chance,
            admission_term,
            study_plan,
        }
    }

    /// Packs semesters with courses, core first, honoring the per-semester
    /// course and credit caps.
    fn build_plan(&mut self, catalog: &Catalog, core_courses: &[CourseCode]) -> StudyPlan {
        let mut plan = StudyPlan::new();
        let mut planned: Vec<CourseCode> = Vec::new();
        let mut remaining_core: Vec<CourseCode> = core_courses.to_vec();
        remaining_core.shuffle(&mut self.rng);

        for semester in 1..=self.config.plan_semester_limit {
            if planned.len() >= self.config.target_courses as usize {
                break;
            }

            // Core courses take priority until all are placed.
            let mut candidates: Vec<CourseCode> = if remaining_core.is_empty() {
                catalog
                    .iter()
                    .map(|(code, _)| code.clone())
                    .filter(|code| !planned.contains(code))
                    .collect()
            } else {
                remaining_core.clone()
            };
            candidates.shuffle(&mut self.rng);

            let max_courses = self.rng.random_range(
                self.config.min_courses_per_semester..=self.config.max_courses_per_semester,
            ) as usize;

            let mut semester_courses: Vec<CourseCode> = Vec::new();
            let mut semester_credits = 0u32;

            for code in candidates {
                if semester_courses.len() >= max_courses {
                    break;
                }
                let credits = catalog.get(&code).map(|c| c.credits).unwrap_or(3);
                if semester_credits + credits > self.config.semester_credit_cap {
                    continue;
                }

                semester_credits += credits;
                remaining_core.retain(|core| core != &code);
                planned.push(code.clone());
                semester_courses.push(code);
            }

            if !semester_courses.is_empty() {
                plan.insert(semester, semester_courses);
            }
        }

        plan
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
