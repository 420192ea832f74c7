//! ## studiegang-analysis::bottlenecks
//! **Curriculum bottleneck report**
//!
//! Cross-references `blocked_courses.csv` with `student_outcomes.csv` to find
//! the courses that most often stall progression: which courses students get
//! blocked from, which missing prerequisites cause it, when the blockages
//! happen, and how being blocked correlates with graduation.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use studiegang_core::{Catalog, CourseCode, Term};
use studiegang_model::{BlockReason, BlockedCourseRow, StudentOutcome};

const TOP_COURSES_SHOWN: usize = 15;

/// Aggregate blockage statistics for one course.
#[derive(Debug, Clone)]
pub struct CourseBlockStats {
    pub course: CourseCode,
    pub name: String,
    pub total_blockages: usize,
    pub distinct_students: usize,
    pub prerequisite_missing: usize,
    pub not_offered: usize,
    /// Mean semester in which the blockage happened.
    pub mean_semester: f64,
    /// Mean final GPA of the blocked students.
    pub mean_gpa: f64,
    /// Graduation rate of the students blocked from this course.
    pub blocked_graduation_rate: f64,
}

/// How often each student was blocked, bucketed, with graduation rates.
#[derive(Debug, Clone)]
pub struct ImpactBand {
    pub label: &'static str,
    pub students: usize,
    pub graduated: usize,
}

impl ImpactBand {
    pub fn graduation_rate(&self) -> f64 {
        if self.students == 0 {
            0.0
        } else {
            self.graduated as f64 / self.students as f64
        }
    }
}

#[derive(Debug, Clone)]
pub struct BottleneckReport {
    pub total_blockages: usize,
    pub students_affected: usize,
    /// Sorted by total blockages, descending.
    pub course_stats: Vec<CourseBlockStats>,
    /// Missing prerequisite -> how often it held a student back.
    pub missing_prereq_counts: Vec<(CourseCode, usize)>,
    pub blockages_by_semester: BTreeMap<u32, usize>,
    pub blockages_by_term: BTreeMap<Term, usize>,
    pub impact_bands: Vec<ImpactBand>,
    /// Courses that students are blocked from AND that block others as a
    /// missing prerequisite.
    pub critical_courses: Vec<CourseCode>,
}

fn band_label(times_blocked: u32) -> &'static str {
    match times_blocked {
        0 => "Never blocked",
        1..=2 => "Blocked 1-2 times",
        3..=4 => "Blocked 3-4 times",
        5..=9 => "Blocked 5-9 times",
        _ => "Blocked 10+ times",
    }
}

const BAND_ORDER: [&str; 5] = [
    "Never blocked",
    "Blocked 1-2 times",
    "Blocked 3-4 times",
    "Blocked 5-9 times",
    "Blocked 10+ times",
];

fn split_missing_prereqs(row: &BlockedCourseRow) -> impl Iterator<Item = CourseCode> + '_ {
    row.missing_prereqs
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(CourseCode::from)
}

impl BottleneckReport {
    pub fn build(
        blocked: &[BlockedCourseRow],
        outcomes: &[StudentOutcome],
        catalog: &Catalog,
    ) -> Self {
        let mut per_course: BTreeMap<CourseCode, Vec<&BlockedCourseRow>> = BTreeMap::new();
        for row in blocked {
            per_course.entry(row.blocked_course.clone()).or_default().push(row);
        }

        let mut course_stats: Vec<CourseBlockStats> = per_course
            .iter()
            .map(|(course, rows)| {
                let students: BTreeSet<u64> = rows.iter().map(|r| r.student_id).collect();
                let graduated: BTreeSet<u64> = rows
                    .iter()
                    .filter(|r| r.student_graduated)
                    .map(|r| r.student_id)
                    .collect();
                let mean_semester =
                    rows.iter().map(|r| f64::from(r.semester)).sum::<f64>() / rows.len() as f64;
                let mean_gpa =
                    rows.iter().map(|r| r.student_gpa).sum::<f64>() / rows.len() as f64;
                CourseBlockStats {
                    course: course.clone(),
                    name: catalog
                        .get(course)
                        .map(|c| c.name.clone())
                        .unwrap_or_default(),
                    total_blockages: rows.len(),
                    distinct_students: students.len(),
                    prerequisite_missing: rows
                        .iter()
                        .filter(|r| r.reason == BlockReason::PrerequisiteMissing)
                        .count(),
                    not_offered: rows
                        .iter()
                        .filter(|r| r.reason == BlockReason::NotOffered)
                        .count(),
                    mean_semester,
                    mean_gpa,
                    blocked_graduation_rate: if students.is_empty() {
                        0.0
                    } else {
                        graduated.len() as f64 / students.len() as f64
                    },
                }
            })
            .collect();
        course_stats.sort_by(|a, b| {
            b.total_blockages
                .cmp(&a.total_blockages)
                .then_with(|| a.course.cmp(&b.course))
        });

        let mut missing: BTreeMap<CourseCode, usize> = BTreeMap::new();
        for row in blocked {
            for prereq in split_missing_prereqs(row) {
                *missing.entry(prereq).or_default() += 1;
            }
        }
        let mut missing_prereq_counts: Vec<(CourseCode, usize)> = missing.into_iter().collect();
        missing_prereq_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let mut blockages_by_semester: BTreeMap<u32, usize> = BTreeMap::new();
        let mut blockages_by_term: BTreeMap<Term, usize> = BTreeMap::new();
        for row in blocked {
            *blockages_by_semester.entry(row.semester).or_default() += 1;
            *blockages_by_term.entry(row.term).or_default() += 1;
        }

        let mut band_counts: BTreeMap<&'static str, (usize, usize)> = BTreeMap::new();
        for outcome in outcomes {
            let entry = band_counts.entry(band_label(outcome.num_times_blocked)).or_default();
            entry.0 += 1;
            if outcome.graduated {
                entry.1 += 1;
            }
        }
        let impact_bands: Vec<ImpactBand> = BAND_ORDER
            .iter()
            .filter_map(|label| {
                band_counts.get(label).map(|&(students, graduated)| ImpactBand {
                    label,
                    students,
                    graduated,
                })
            })
            .collect();

        let blocked_from: BTreeSet<&CourseCode> =
            course_stats.iter().map(|s| &s.course).collect();
        let critical_courses: Vec<CourseCode> = missing_prereq_counts
            .iter()
            .filter(|(code, _)| blocked_from.contains(code))
            .map(|(code, _)| code.clone())
            .collect();

        let students_affected: BTreeSet<u64> = blocked.iter().map(|r| r.student_id).collect();

        Self {
            total_blockages: blocked.len(),
            students_affected: students_affected.len(),
            course_stats,
            missing_prereq_counts,
            blockages_by_semester,
            blockages_by_term,
            impact_bands,
            critical_courses,
        }
    }
}

impl fmt::Display for BottleneckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Curriculum Bottleneck Report ===")?;
        if self.total_blockages == 0 {
            writeln!(f, "No blocked enrollments recorded. The curriculum is clear.")?;
            return Ok(());
        }
        writeln!(
            f,
            "{} blockages across {} students",
            self.total_blockages, self.students_affected
        )?;

        writeln!(f)?;
        writeln!(f, "Most blocked courses:")?;
        for stats in self.course_stats.iter().take(TOP_COURSES_SHOWN) {
            writeln!(
                f,
                "  {:<10} {:<32} {:>4} blockages, {:>4} students, {:>4} prereq / {:>3} offering, mean sem {:.1}, mean GPA {:.2}, grad rate {:.1}%",
                stats.course.as_str(),
                stats.name,
                stats.total_blockages,
                stats.distinct_students,
                stats.prerequisite_missing,
                stats.not_offered,
                stats.mean_semester,
                stats.mean_gpa,
                stats.blocked_graduation_rate * 100.0
            )?;
        }

        if !self.missing_prereq_counts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Most common missing prerequisites:")?;
            for (code, count) in self.missing_prereq_counts.iter().take(TOP_COURSES_SHOWN) {
                writeln!(f, "  {:<10} held students back {} times", code.as_str(), count)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Blockages by semester:")?;
        for (semester, count) in &self.blockages_by_semester {
            writeln!(f, "  semester {semester:>2}: {count}")?;
        }
        writeln!(f, "Blockages by term:")?;
        for (term, count) in &self.blockages_by_term {
            writeln!(f, "  {:<6} {}", term.to_string(), count)?;
        }

        writeln!(f)?;
        writeln!(f, "Graduation rate by blockage exposure:")?;
        for band in &self.impact_bands {
            writeln!(
                f,
                "  {:<18} {:>5} students, {:.1}% graduated",
                band.label,
                band.students,
                band.graduation_rate() * 100.0
            )?;
        }

        if !self.critical_courses.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Critical courses (both blocked and blocking): {}",
                self.critical_courses
                    .iter()
                    .map(CourseCode::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studiegang_core::Course;

    fn catalog() -> Catalog {
        Catalog::from_courses([
            (
                CourseCode::from("CS2201"),
                Course {
                    name: "Data Structures".into(),
                    credits: 3,
                    category: "CS Core".into(),
                    prerequisites: vec!["CS1101".into()],
                    corequisites: Vec::new(),
                    terms_offered: Vec::new(),
                },
            ),
            (
                CourseCode::from("CS1101"),
                Course {
                    name: "Intro to Programming".into(),
                    credits: 3,
                    category: "CS Core".into(),
                    prerequisites: Vec::new(),
                    corequisites: Vec::new(),
                    terms_offered: Vec::new(),
                },
            ),
        ])
    }

    fn blocked_row(student_id: u64, course: &str, missing: &str, graduated: bool) -> BlockedCourseRow {
        BlockedCourseRow {
            student_id,
            semester: 2,
            term: Term::Spring,
            blocked_course: course.into(),
            reason: if missing.is_empty() {
                BlockReason::NotOffered
            } else {
                BlockReason::PrerequisiteMissing
            },
            missing_prereqs: missing.to_string(),
            student_gpa: 2.5,
            student_graduated: graduated,
        }
    }

    fn outcome_row(id: u64, times_blocked: u32, graduated: bool) -> StudentOutcome {
        StudentOutcome {
            id,
            admission_term: Term::Fall,
            academic_ability: 0.7,
            dropout_chance: 0.1,
            credits_completed: 60,
            gpa: 2.8,
            graduated,
            dropped_out: !graduated,
            semesters_enrolled: 8,
            graduation_semester: graduated.then_some(8),
            num_times_blocked: times_blocked,
        }
    }

    #[test]
    fn report_ranks_courses_by_blockage_count() {
        let blocked = vec![
            blocked_row(1, "CS2201", "CS1101", false),
            blocked_row(2, "CS2201", "CS1101", true),
            blocked_row(3, "CS1101", "", false),
        ];
        let outcomes = vec![
            outcome_row(1, 2, false),
            outcome_row(2, 1, true),
            outcome_row(3, 1, false),
        ];
        let report = BottleneckReport::build(&blocked, &outcomes, &catalog());

        assert_eq!(report.total_blockages, 3);
        assert_eq!(report.students_affected, 3);
        assert_eq!(report.course_stats[0].course.as_str(), "CS2201");
        assert_eq!(report.course_stats[0].total_blockages, 2);
        assert_eq!(report.course_stats[0].prerequisite_missing, 2);
        assert!((report.course_stats[0].mean_semester - 2.0).abs() < 1e-9);
        assert!((report.course_stats[0].blocked_graduation_rate - 0.5).abs() < 1e-9);
    }

    #[test]
    fn critical_courses_are_blocked_and_blocking() {
        let blocked = vec![
            blocked_row(1, "CS2201", "CS1101", false),
            blocked_row(2, "CS1101", "", false),
        ];
        let outcomes = vec![outcome_row(1, 1, false), outcome_row(2, 1, false)];
        let report = BottleneckReport::build(&blocked, &outcomes, &catalog());
        assert_eq!(report.critical_courses, vec![CourseCode::from("CS1101")]);
    }

    #[test]
    fn impact_bands_keep_fixed_order() {
        let outcomes = vec![
            outcome_row(1, 0, true),
            outcome_row(2, 3, false),
            outcome_row(3, 12, false),
        ];
        let report = BottleneckReport::build(&[], &outcomes, &catalog());
        let labels: Vec<&str> = report.impact_bands.iter().map(|b| b.label).collect();
        assert_eq!(
            labels,
            vec!["Never blocked", "Blocked 3-4 times", "Blocked 10+ times"]
        );
    }

    #[test]
    fn empty_report_prints_all_clear() {
        let report = BottleneckReport::build(&[], &[], &catalog());
        let text = report.to_string();
        assert!(text.contains("No blocked enrollments recorded"));
    }

    #[test]
    fn multi_prereq_cell_is_split_on_commas() {
        let blocked = vec![blocked_row(1, "CS2201", "CS1101, MA1001", false)];
        let report = BottleneckReport::build(&blocked, &[], &catalog());
        assert_eq!(report.missing_prereq_counts.len(), 2);
    }
}
