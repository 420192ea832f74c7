use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::CourseCode;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Data file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Course {referenced} is referenced by {referencing} but missing from the catalog")]
    UnknownCourse {
        referenced: CourseCode,
        referencing: CourseCode,
    },

    #[error("Catalog contains no courses")]
    EmptyCatalog,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
