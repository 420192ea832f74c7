//! ## studiegang-analysis::outcomes
//! **Cohort outcome summary**
//!
//! Aggregates `student_outcomes.csv` into graduation/dropout totals, GPA and
//! credit statistics, time-to-degree distribution, and a per-admission-term
//! breakdown. Rendered as a sectioned text report via `Display`.

use std::collections::BTreeMap;
use std::fmt;

use studiegang_core::Term;
use studiegang_model::StudentOutcome;

/// Mean/min/max over a numeric column. Empty columns report zeros.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColumnStats {
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    fn over(values: impl Iterator<Item = f64>) -> Self {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        if count == 0 {
            return Self::default();
        }
        Self {
            mean: sum / count as f64,
            min,
            max,
        }
    }
}

/// One row of the per-admission-term breakdown.
#[derive(Debug, Clone)]
pub struct TermCohortRow {
    pub term: Term,
    pub students: usize,
    pub graduated: usize,
    pub dropped_out: usize,
    pub avg_gpa: f64,
}

impl TermCohortRow {
    pub fn graduation_rate(&self) -> f64 {
        if self.students == 0 {
            0.0
        } else {
            self.graduated as f64 / self.students as f64
        }
    }
}

/// Aggregate view of a finished cohort.
#[derive(Debug, Clone)]
pub struct OutcomeSummary {
    pub students: usize,
    pub graduated: usize,
    pub dropped_out: usize,
    pub still_enrolled: usize,
    pub gpa: ColumnStats,
    pub credits: ColumnStats,
    /// Mean semesters to degree, over graduates only.
    pub avg_semesters_to_graduate: f64,
    /// Graduation semester -> number of graduates.
    pub graduation_timing: BTreeMap<u32, usize>,
    pub by_admission_term: Vec<TermCohortRow>,
}

impl OutcomeSummary {
    pub fn build(outcomes: &[StudentOutcome]) -> Self {
        let graduated = outcomes.iter().filter(|o| o.graduated).count();
        let dropped_out = outcomes.iter().filter(|o| o.dropped_out).count();
        let still_enrolled = outcomes.len() - graduated - dropped_out;

        // GPA statistics skip students who never completed a course.
        let gpa = ColumnStats::over(outcomes.iter().map(|o| o.gpa).filter(|g| *g > 0.0));
        let credits = ColumnStats::over(outcomes.iter().map(|o| o.credits_completed as f64));

        let mut graduation_timing: BTreeMap<u32, usize> = BTreeMap::new();
        let mut semesters_sum = 0u64;
        for outcome in outcomes.iter().filter(|o| o.graduated) {
            if let Some(semester) = outcome.graduation_semester {
                *graduation_timing.entry(semester).or_default() += 1;
                semesters_sum += u64::from(semester);
            }
        }
        let avg_semesters_to_graduate = if graduated == 0 {
            0.0
        } else {
            semesters_sum as f64 / graduated as f64
        };

        let by_admission_term = Term::CYCLE
            .iter()
            .map(|&term| {
                let cohort: Vec<&StudentOutcome> =
                    outcomes.iter().filter(|o| o.admission_term == term).collect();
                TermCohortRow {
                    term,
                    students: cohort.len(),
                    graduated: cohort.iter().filter(|o| o.graduated).count(),
                    dropped_out: cohort.iter().filter(|o| o.dropped_out).count(),
                    avg_gpa: ColumnStats::over(
                        cohort.iter().map(|o| o.gpa).filter(|g| *g > 0.0),
                    )
                    .mean,
                }
            })
            .filter(|row| row.students > 0)
            .collect();

        Self {
            students: outcomes.len(),
            graduated,
            dropped_out,
            still_enrolled,
            gpa,
            credits,
            avg_semesters_to_graduate,
            graduation_timing,
            by_admission_term,
        }
    }

    pub fn graduation_rate(&self) -> f64 {
        if self.students == 0 {
            0.0
        } else {
            self.graduated as f64 / self.students as f64
        }
    }
}

impl fmt::Display for OutcomeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Cohort Outcome Summary ===")?;
        writeln!(f, "Students:        {}", self.students)?;
        writeln!(
            f,
            "Graduated:       {} ({:.1}%)",
            self.graduated,
            self.graduation_rate() * 100.0
        )?;
        writeln!(f, "Dropped out:     {}", self.dropped_out)?;
        writeln!(f, "Still enrolled:  {}", self.still_enrolled)?;
        writeln!(f)?;
        writeln!(
            f,
            "GPA:     mean {:.2}, min {:.2}, max {:.2}",
            self.gpa.mean, self.gpa.min, self.gpa.max
        )?;
        writeln!(
            f,
            "Credits: mean {:.1}, min {:.0}, max {:.0}",
            self.credits.mean, self.credits.min, self.credits.max
        )?;

        if !self.graduation_timing.is_empty() {
            writeln!(f)?;
            writeln!(
                f,
                "Time to degree: {:.1} semesters on average",
                self.avg_semesters_to_graduate
            )?;
            for (semester, count) in &self.graduation_timing {
                writeln!(f, "  semester {semester:>2}: {count} graduates")?;
            }
        }

        if !self.by_admission_term.is_empty() {
            writeln!(f)?;
            writeln!(f, "By admission term:")?;
            for row in &self.by_admission_term {
                writeln!(
                    f,
                    "  {:<6} {:>5} students, {:>5} graduated ({:.1}%), {:>5} dropped, avg GPA {:.2}",
                    row.term.to_string(),
                    row.students,
                    row.graduated,
                    row.graduation_rate() * 100.0,
                    row.dropped_out,
                    row.avg_gpa
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: u64, term: Term, graduated: bool, dropped: bool) -> StudentOutcome {
        StudentOutcome {
            id,
            admission_term: term,
            academic_ability: 0.8,
            dropout_chance: 0.1,
            credits_completed: if graduated { 120 } else { 30 },
            gpa: if graduated { 3.5 } else { 2.0 },
            graduated,
            dropped_out: dropped,
            semesters_enrolled: 10,
            graduation_semester: graduated.then_some(10),
            num_times_blocked: 0,
        }
    }

    #[test]
    fn summary_partitions_the_cohort() {
        let outcomes = vec![
            outcome(1, Term::Fall, true, false),
            outcome(2, Term::Fall, false, true),
            outcome(3, Term::Spring, false, false),
        ];
        let summary = OutcomeSummary::build(&outcomes);
        assert_eq!(summary.students, 3);
        assert_eq!(summary.graduated, 1);
        assert_eq!(summary.dropped_out, 1);
        assert_eq!(summary.still_enrolled, 1);
    }

    #[test]
    fn graduation_timing_counts_graduates_only() {
        let outcomes = vec![
            outcome(1, Term::Fall, true, false),
            outcome(2, Term::Fall, true, false),
            outcome(3, Term::Fall, false, true),
        ];
        let summary = OutcomeSummary::build(&outcomes);
        assert_eq!(summary.graduation_timing.get(&10), Some(&2));
        assert!((summary.avg_semesters_to_graduate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn term_breakdown_skips_empty_terms() {
        let outcomes = vec![outcome(1, Term::Fall, true, false)];
        let summary = OutcomeSummary::build(&outcomes);
        assert_eq!(summary.by_admission_term.len(), 1);
        assert_eq!(summary.by_admission_term[0].term, Term::Fall);
    }

    #[test]
    fn empty_cohort_renders_without_panicking() {
        let summary = OutcomeSummary::build(&[]);
        assert_eq!(summary.students, 0);
        assert!((summary.graduation_rate() - 0.0).abs() < 1e-9);
        let _ = summary.to_string();
    }
}
