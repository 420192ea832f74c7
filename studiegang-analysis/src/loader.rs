//! Artifact loading: reads the simulation's CSV exports back into rows.

use std::path::Path;

use tracing::info;

use studiegang_model::{BlockedCourseRow, StudentOutcome};

use crate::error::AnalysisError;

pub fn read_outcomes<P: AsRef<Path>>(path: P) -> Result<Vec<StudentOutcome>, AnalysisError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AnalysisError::MissingArtifact(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let rows: Vec<StudentOutcome> = reader.deserialize().collect::<Result<_, _>>()?;
    info!("Loaded {} outcome rows from {}", rows.len(), path.display());
    Ok(rows)
}

pub fn read_blocked<P: AsRef<Path>>(path: P) -> Result<Vec<BlockedCourseRow>, AnalysisError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AnalysisError::MissingArtifact(path.to_path_buf()));
    }
    let mut reader = csv::Reader::from_path(path)?;
    let rows: Vec<BlockedCourseRow> = reader.deserialize().collect::<Result<_, _>>()?;
    info!(
        "Loaded {} blockage rows from {}",
        rows.len(),
        path.display()
    );
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use studiegang_core::Term;

    #[test]
    fn missing_artifact_is_reported() {
        let err = read_outcomes("no/such/student_outcomes.csv").unwrap_err();
        assert!(matches!(err, AnalysisError::MissingArtifact(_)));
    }

    #[test]
    fn outcomes_round_trip_through_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("student_outcomes.csv");

        let row = StudentOutcome {
            id: 1,
            admission_term: Term::Spring,
            academic_ability: 0.8,
            dropout_chance: 0.1,
            credits_completed: 120,
            gpa: 3.25,
            graduated: true,
            dropped_out: false,
            semesters_enrolled: 11,
            graduation_semester: Some(11),
            num_times_blocked: 2,
        };
        let mut writer = csv::Writer::from_path(&path).unwrap();
        writer.serialize(&row).unwrap();
        writer.flush().unwrap();

        let rows = read_outcomes(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].admission_term, Term::Spring);
        assert_eq!(rows[0].graduation_semester, Some(11));
    }
}
