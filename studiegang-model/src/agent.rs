//! ## studiegang-model::agent
//! **Per-student semester stepping**
//!
//! A student agent advances one semester at a time through five phases:
//! dropout rules, course selection (with prerequisite/term gating and
//! blockage recording), graded attempts, GPA recomputation, and the
//! graduation check. All randomness flows through the model's shared seeded
//! RNG, so agents never own entropy.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use studiegang_config::DropoutPolicyConfig;
use studiegang_core::{Attempt, Catalog, CourseCode, Grade, StudentProfile, Term, Transcript};

/// Shared, read-only per-step context.
pub struct AgentContext<'a> {
    pub catalog: &'a Catalog,
    pub core_courses: &'a [CourseCode],
    pub required_credits: u32,
    pub policy: &'a DropoutPolicyConfig,
}

/// Why a planned course could not be taken this semester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockReason {
    PrerequisiteMissing,
    NotOffered,
}

/// One planned course a student could not enroll in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blockage {
    pub student_id: u64,
    pub semester: u32,
    pub term: Term,
    pub course: CourseCode,
    pub reason: BlockReason,
    pub missing_prerequisites: Vec<CourseCode>,
}

/// What a single agent step produced, for metrics and bookkeeping.
#[derive(Debug, Default)]
pub struct StepOutcome {
    pub attempts: u32,
    pub blockages: Vec<Blockage>,
}

/// A student progressing through the curriculum.
#[derive(Debug, Clone)]
pub struct StudentAgent {
    pub id: u64,
    pub academic_ability: f64,
    pub dropout_chance: f64,
    pub admission_term: Term,
    study_plan: studiegang_core::StudyPlan,

    /// Semester about to be attempted (1-based).
    semester: u32,
    credits_completed: u32,
    completed: BTreeSet<CourseCode>,
    repeats: Vec<CourseCode>,
    transcript: Transcript,
    gpa: f64,
    low_gpa_streak: u32,
    times_blocked: u32,

    graduated: bool,
    dropped_out: bool,
    graduation_semester: Option<u32>,
}

impl StudentAgent {
    pub fn new(profile: StudentProfile) -> Self {
        Self {
            id: profile.id,
            academic_ability: profile.academic_ability,
            dropout_chance: profile.dropout_chance,
            admission_term: profile.admission_term,
            study_plan: profile.study_plan,
            semester: 1,
            credits_completed: 0,
            completed: BTreeSet::new(),
            repeats: Vec::new(),
            transcript: Transcript::new(),
            gpa: 0.0,
            low_gpa_streak: 0,
            times_blocked: 0,
            graduated: false,
            dropped_out: false,
            graduation_semester: None,
        }
    }

    pub fn graduated(&self) -> bool {
        self.graduated
    }

    pub fn dropped_out(&self) -> bool {
        self.dropped_out
    }

    pub fn is_enrolled(&self) -> bool {
        !self.graduated && !self.dropped_out
    }

    pub fn gpa(&self) -> f64 {
        self.gpa
    }

    pub fn credits_completed(&self) -> u32 {
        self.credits_completed
    }

    /// Semesters the student has actually been enrolled in.
    pub fn semesters_enrolled(&self) -> u32 {
        self.semester.saturating_sub(1)
    }

    pub fn graduation_semester(&self) -> Option<u32> {
        self.graduation_semester
    }

    pub fn times_blocked(&self) -> u32 {
        self.times_blocked
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn completed_courses(&self) -> impl Iterator<Item = &CourseCode> {
        self.completed.iter()
    }

    /// Advances the student by one semester.
    pub fn step(&mut self, ctx: &AgentContext<'_>, rng: &mut StdRng) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if !self.is_enrolled() {
            return outcome;
        }

        if self.check_dropout(ctx.policy, rng) {
            debug!("Student {} dropped out in semester {}", self.id, self.semester);
            return outcome;
        }

        let term = Term::for_semester(self.admission_term, self.semester);
        let selection = self.select_courses(ctx, term, &mut outcome.blockages);
        self.attempt_courses(ctx, &selection, rng, &mut outcome);
        self.gpa = self.transcript.gpa();
        self.check_graduation(ctx);

        self.semester += 1;
        outcome
    }

    /// Applies the structured dropout rules in order. Returns true when the
    /// student leaves; the semester counter is left untouched in that case.
    fn check_dropout(&mut self, policy: &DropoutPolicyConfig, rng: &mut StdRng) -> bool {
        // Early attrition among low-ability students.
        let early = &policy.early;
        if (early.from_semester..=early.to_semester).contains(&self.semester)
            && self.academic_ability < early.ability_below
            && rng.random_bool(early.probability)
        {
            self.dropped_out = true;
            return true;
        }

        // Academic probation: consecutive semesters below the GPA floor.
        let probation = &policy.probation;
        if self.semester >= probation.min_semester && self.gpa < probation.gpa_below {
            self.low_gpa_streak += 1;
            if self.low_gpa_streak >= probation.streak {
                self.dropped_out = true;
                return true;
            }
        } else {
            self.low_gpa_streak = 0;
        }

        // Stagnation: too few credits by the checkpoint semester.
        let stagnation = &policy.stagnation;
        if self.semester == stagnation.semester && self.credits_completed < stagnation.min_credits {
            self.dropped_out = true;
            return true;
        }

        // Residual late attrition.
        let late = &policy.late;
        if self.semester >= late.from_semester && rng.random_bool(late.probability) {
            self.dropped_out = true;
            return true;
        }

        false
    }

    /// Planned courses for this semester that the student can actually take.
    /// Courses failing the prerequisite or term check are recorded as
    /// blockages; corequisites of admitted courses are pulled in unchecked.
    fn select_courses(
        &mut self,
        ctx: &AgentContext<'_>,
        term: Term,
        blockages: &mut Vec<Blockage>,
    ) -> Vec<CourseCode> {
        let mut planned: Vec<CourseCode> = self.study_plan.courses_for(self.semester).to_vec();
        for repeat in &self.repeats {
            if !planned.contains(repeat) {
                planned.push(repeat.clone());
            }
        }
        planned.retain(|code| !self.completed.contains(code));

        let mut selection: Vec<CourseCode> = Vec::new();
        for code in planned {
            if selection.contains(&code) {
                continue;
            }
            let Some(course) = ctx.catalog.get(&code) else {
                warn!("Student {}: planned course {code} is not in the catalog", self.id);
                continue;
            };

            let missing: Vec<CourseCode> = course
                .prerequisites
                .iter()
                .filter(|prereq| !self.completed.contains(prereq))
                .cloned()
                .collect();

            if !missing.is_empty() {
                self.times_blocked += 1;
                blockages.push(Blockage {
                    student_id: self.id,
                    semester: self.semester,
                    term,
                    course: code,
                    reason: BlockReason::PrerequisiteMissing,
                    missing_prerequisites: missing,
                });
                continue;
            }

            if !course.offered_in(term) {
                self.times_blocked += 1;
                blockages.push(Blockage {
                    student_id: self.id,
                    semester: self.semester,
                    term,
                    course: code,
                    reason: BlockReason::NotOffered,
                    missing_prerequisites: Vec::new(),
                });
                continue;
            }

            for coreq in &course.corequisites {
                if !self.completed.contains(coreq) && !selection.contains(coreq) {
                    selection.push(coreq.clone());
                }
            }
            if !selection.contains(&code) {
                selection.push(code);
            }
        }

        selection
    }

    fn attempt_courses(
        &mut self,
        ctx: &AgentContext<'_>,
        selection: &[CourseCode],
        rng: &mut StdRng,
        outcome: &mut StepOutcome,
    ) {
        for code in selection {
            let credits = ctx.catalog.get(code).map(|c| c.credits).unwrap_or(3);
            let grade = assign_grade(self.academic_ability, rng);
            outcome.attempts += 1;

            self.transcript.record(Attempt {
                semester: self.semester,
                course: code.clone(),
                grade,
                credits,
            });

            if grade.is_passing() {
                self.completed.insert(code.clone());
                self.credits_completed += credits;
                self.repeats.retain(|repeat| repeat != code);
            } else if !self.repeats.contains(code) {
                self.repeats.push(code.clone());
            }
        }
    }

    fn check_graduation(&mut self, ctx: &AgentContext<'_>) {
        if self.credits_completed >= ctx.required_credits
            && ctx.core_courses.iter().all(|core| self.completed.contains(core))
        {
            self.graduated = true;
            if self.graduation_semester.is_none() {
                self.graduation_semester = Some(self.semester);
            }
        }
    }
}

/// Draws a letter grade from the ability-weighted distribution.
///
/// Weights: A 4a, B 2.5a, C 2(1-a), D 1.5(1-a), F 4(1-a).
pub fn assign_grade(ability: f64, rng: &mut StdRng) -> Grade {
    let inverse = 1.0 - ability;
    let weighted = [
        (Grade::A, ability * 4.0),
        (Grade::B, ability * 2.5),
        (Grade::C, inverse * 2.0),
        (Grade::D, inverse * 1.5),
        (Grade::F, inverse * 4.0),
    ];
    let total: f64 = weighted.iter().map(|(_, w)| w).sum();
    let mut draw = rng.random::<f64>() * total;
    for (grade, weight) in weighted {
        if draw < weight {
            return grade;
        }
        draw -= weight;
    }
    // Floating point remainder lands on the last non-zero weight.
    Grade::F
}
