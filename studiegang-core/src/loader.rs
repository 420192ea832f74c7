//! ## studiegang-core::loader
//! **JSON data loading**
//!
//! Reads the catalog and cohort files in the formats the original data
//! pipeline produced: `course_catalog.json` (object keyed by course code)
//! and `synthetic_students.json` (array of profiles).

use std::fs;
use std::path::Path;

use tracing::info;

use crate::catalog::Catalog;
use crate::error::CoreError;
use crate::student::StudentProfile;

/// Loads and validates a course catalog.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, CoreError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CoreError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&content)?;
    catalog.validate()?;
    info!("Loaded catalog with {} courses from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Loads a cohort of student profiles.
pub fn load_students<P: AsRef<Path>>(path: P) -> Result<Vec<StudentProfile>, CoreError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CoreError::FileNotFound(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    let students: Vec<StudentProfile> = serde_json::from_str(&content)?;
    info!("Loaded {} student profiles from {}", students.len(), path.display());
    Ok(students)
}

/// Writes a cohort of student profiles as pretty-printed JSON.
pub fn write_students<P: AsRef<Path>>(
    path: P,
    students: &[StudentProfile],
) -> Result<(), CoreError> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(students)?;
    fs::write(path, content)?;
    info!("Wrote {} student profiles to {}", students.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::StudyPlan;
    use crate::term::Term;

    #[test]
    fn missing_catalog_is_reported() {
        let err = load_catalog("no/such/catalog.json").unwrap_err();
        assert!(matches!(err, CoreError::FileNotFound(_)));
    }

    #[test]
    fn catalog_loads_from_original_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("course_catalog.json");
        fs::write(
            &path,
            r#"{
                "CS1101": {
                    "name": "Programming I",
                    "credits": 4,
                    "category": "CS Core",
                    "prerequisites": [],
                    "corequisites": [],
                    "terms_offered": ["Fall", "Spring"]
                },
                "CS2201": {
                    "name": "Data Structures",
                    "credits": 3,
                    "category": "CS Core",
                    "prerequisites": ["CS1101"]
                }
            }"#,
        )
        .unwrap();

        let catalog = load_catalog(&path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.core_courses("CS Core").len(), 2);
    }

    #[test]
    fn students_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("students.json");

        let mut plan = StudyPlan::new();
        plan.insert(1, vec!["CS1101".into()]);
        let students = vec![StudentProfile {
            id: 1,
            academic_ability: 0.75,
            dropout_chance: 0.1,
            admission_term: Term::Fall,
            study_plan: plan,
        }];

        write_students(&path, &students).unwrap();
        let loaded = load_students(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 1);
        assert_eq!(loaded[0].study_plan.planned_courses(), 1);
    }
}
