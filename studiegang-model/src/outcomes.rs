//! ## studiegang-model::outcomes
//! **Artifact export**
//!
//! Flattens the finished model into the tabular artifacts the analysis crate
//! consumes: per-student outcomes, blockage records (with the student's final
//! GPA and graduation flag attached), the census series, and full transcripts
//! as JSON.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use studiegang_core::{CourseCode, Term, Transcript};

use crate::agent::{BlockReason, Blockage, StudentAgent};
use crate::collector::SemesterRow;
use crate::error::SimulationError;
use crate::model::UniversityModel;

/// One row of `student_outcomes.csv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentOutcome {
    pub id: u64,
    pub admission_term: Term,
    pub academic_ability: f64,
    pub dropout_chance: f64,
    pub credits_completed: u32,
    pub gpa: f64,
    pub graduated: bool,
    pub dropped_out: bool,
    pub semesters_enrolled: u32,
    pub graduation_semester: Option<u32>,
    pub num_times_blocked: u32,
}

impl StudentOutcome {
    fn from_agent(agent: &StudentAgent) -> Self {
        Self {
            id: agent.id,
            admission_term: agent.admission_term,
            academic_ability: agent.academic_ability,
            dropout_chance: agent.dropout_chance,
            credits_completed: agent.credits_completed(),
            gpa: (agent.gpa() * 100.0).round() / 100.0,
            graduated: agent.graduated(),
            dropped_out: agent.dropped_out(),
            semesters_enrolled: agent.semesters_enrolled(),
            graduation_semester: agent.graduation_semester(),
            num_times_blocked: agent.times_blocked(),
        }
    }
}

/// One row of `blocked_courses.csv`. Carries the blocked student's final GPA
/// and graduation flag so the bottleneck analysis can correlate impact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockedCourseRow {
    pub student_id: u64,
    pub semester: u32,
    pub term: Term,
    pub blocked_course: CourseCode,
    pub reason: BlockReason,
    /// Comma-joined missing prerequisite codes; empty when not offered.
    pub missing_prereqs: String,
    pub student_gpa: f64,
    pub student_graduated: bool,
}

impl BlockedCourseRow {
    fn new(blockage: &Blockage, gpa: f64, graduated: bool) -> Self {
        Self {
            student_id: blockage.student_id,
            semester: blockage.semester,
            term: blockage.term,
            blocked_course: blockage.course.clone(),
            reason: blockage.reason,
            missing_prereqs: blockage
                .missing_prerequisites
                .iter()
                .map(CourseCode::as_str)
                .collect::<Vec<_>>()
                .join(", "),
            student_gpa: (gpa * 100.0).round() / 100.0,
            student_graduated: graduated,
        }
    }
}

/// Transcript entry in `transcripts.json`.
#[derive(Debug, Serialize, Deserialize)]
pub struct TranscriptRecord {
    pub id: u64,
    pub transcript: Transcript,
    pub completed_courses: Vec<CourseCode>,
}

/// Per-student outcome rows for a finished model.
pub fn student_outcomes(model: &UniversityModel) -> Vec<StudentOutcome> {
    model.agents().iter().map(StudentOutcome::from_agent).collect()
}

/// Blockage rows with final student state attached.
pub fn blocked_course_rows(model: &UniversityModel) -> Vec<BlockedCourseRow> {
    let by_id: BTreeMap<u64, &StudentAgent> =
        model.agents().iter().map(|agent| (agent.id, agent)).collect();

    model
        .blockages()
        .iter()
        .map(|blockage| {
            let (gpa, graduated) = by_id
                .get(&blockage.student_id)
                .map(|agent| (agent.gpa(), agent.graduated()))
                .unwrap_or((0.0, false));
            BlockedCourseRow::new(blockage, gpa, graduated)
        })
        .collect()
}

fn ensure_parent(path: &Path) -> Result<(), SimulationError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), SimulationError> {
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the census series (`results.csv`).
pub fn write_results_csv(path: &Path, rows: &[SemesterRow]) -> Result<(), SimulationError> {
    write_csv(path, rows)?;
    info!("Wrote {} census rows to {}", rows.len(), path.display());
    Ok(())
}

/// Writes per-student outcomes (`student_outcomes.csv`).
pub fn write_outcomes_csv(path: &Path, rows: &[StudentOutcome]) -> Result<(), SimulationError> {
    write_csv(path, rows)?;
    info!("Wrote {} student outcomes to {}", rows.len(), path.display());
    Ok(())
}

/// Writes blockage records (`blocked_courses.csv`).
pub fn write_blocked_csv(path: &Path, rows: &[BlockedCourseRow]) -> Result<(), SimulationError> {
    write_csv(path, rows)?;
    info!("Wrote {} blockage records to {}", rows.len(), path.display());
    Ok(())
}

/// Writes full transcripts as JSON.
pub fn write_transcripts_json(path: &Path, model: &UniversityModel) -> Result<(), SimulationError> {
    ensure_parent(path)?;
    let records: Vec<TranscriptRecord> = model
        .agents()
        .iter()
        .map(|agent| TranscriptRecord {
            id: agent.id,
            transcript: agent.transcript().clone(),
            completed_courses: agent.completed_courses().cloned().collect(),
        })
        .collect();
    fs::write(path, serde_json::to_string_pretty(&records)?)?;
    info!("Wrote {} transcripts to {}", records.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use studiegang_config::{DropoutPolicyConfig, SimulationConfig};
    use studiegang_core::{Catalog, Course, StudentProfile, StudyPlan};
    use studiegang_telemetry::MetricsRecorder;

    fn finished_model() -> UniversityModel {
        let catalog = Catalog::from_courses([(
            CourseCode::from("CS1101"),
            Course {
                name: String::new(),
                credits: 4,
                category: "CS Core".into(),
                prerequisites: Vec::new(),
                corequisites: Vec::new(),
                terms_offered: Vec::new(),
            },
        )]);
        let mut plan = StudyPlan::new();
        plan.insert(1, vec!["CS1101".into()]);
        let students = vec![StudentProfile {
            id: 1,
            academic_ability: 0.9,
            dropout_chance: 0.1,
            admission_term: Term::Fall,
            study_plan: plan,
        }];
        let config = SimulationConfig {
            seed: 42,
            max_semesters: 4,
            required_credits: 4,
            core_category: "CS Core".into(),
        };
        let mut model = UniversityModel::new(
            catalog,
            students,
            config,
            DropoutPolicyConfig::default(),
            MetricsRecorder::new(),
        );
        model.run();
        model
    }

    #[test]
    fn outcome_rows_cover_every_student() {
        let model = finished_model();
        let outcomes = student_outcomes(&model);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].id, 1);
    }

    #[test]
    fn artifacts_round_trip_through_csv() {
        let model = finished_model();
        let dir = tempfile::tempdir().unwrap();

        let outcomes_path = dir.path().join("student_outcomes.csv");
        write_outcomes_csv(&outcomes_path, &student_outcomes(&model)).unwrap();

        let mut reader = csv::Reader::from_path(&outcomes_path).unwrap();
        let rows: Vec<StudentOutcome> = reader
            .deserialize()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].admission_term, Term::Fall);
    }

    #[test]
    fn transcripts_serialize_to_json() {
        let model = finished_model();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcripts.json");
        write_transcripts_json(&path, &model).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let records: Vec<TranscriptRecord> = serde_json::from_str(&content).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].transcript.is_empty());
    }
}
