//! ## studiegang-model::collector
//! **Per-semester census series**
//!
//! The collector captures one census row per simulated semester, before the
//! semester's activity runs. The series is the `results.csv` artifact.

use serde::{Deserialize, Serialize};

/// One census row: cohort status entering a semester.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterRow {
    pub semester: u32,
    pub graduated: usize,
    pub dropped_out: usize,
    pub enrolled: usize,
    pub avg_gpa: f64,
}

#[derive(Debug, Default)]
pub struct DataCollector {
    rows: Vec<SemesterRow>,
}

impl DataCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collect(&mut self, row: SemesterRow) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[SemesterRow] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_accumulate_in_order() {
        let mut collector = DataCollector::new();
        for semester in 1..=3 {
            collector.collect(SemesterRow {
                semester,
                graduated: 0,
                dropped_out: 0,
                enrolled: 10,
                avg_gpa: 0.0,
            });
        }
        let semesters: Vec<u32> = collector.rows().iter().map(|r| r.semester).collect();
        assert_eq!(semesters, vec![1, 2, 3]);
    }
}
