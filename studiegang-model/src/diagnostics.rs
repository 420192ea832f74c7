//! Diagnostics for failed replay validation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::error;

use crate::error::SimulationError;

#[derive(Debug)]
pub struct DiagnosticsCollector {
    output_dir: PathBuf,
    bug_reports: Vec<String>,
}

impl Default for DiagnosticsCollector {
    fn default() -> Self {
        Self::with_output_dir(".")
    }
}

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collector writing its bug reports under `dir`.
    pub fn with_output_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            output_dir: dir.as_ref().to_path_buf(),
            bug_reports: Vec::new(),
        }
    }

    /// Writes a timestamped bug report file and returns its path.
    pub fn record_bug_report(&mut self, report: &str) -> Result<String, SimulationError> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(format!("bug_report_{}.yaml", Utc::now().timestamp()));
        fs::write(&path, report)?;

        let filename = path.display().to_string();
        error!("Bug report saved to: {filename}");
        self.bug_reports.push(filename.clone());
        Ok(filename)
    }

    pub fn bug_reports(&self) -> &[String] {
        &self.bug_reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bug_reports_land_in_the_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagnostics = DiagnosticsCollector::with_output_dir(dir.path());

        let filename = diagnostics.record_bug_report("hash mismatch").unwrap();
        assert_eq!(diagnostics.bug_reports(), &[filename.clone()]);

        let content = std::fs::read_to_string(&filename).unwrap();
        assert_eq!(content, "hash mismatch");
        assert!(filename.starts_with(dir.path().to_str().unwrap()));
    }
}
