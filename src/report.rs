//! Switch test report and export functionality

use crate::switch::Outcome;
use crate::tests::{describe_outcome, StepRecord, Verdict};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Complete report of one automated run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequenceReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// One entry per switch that was waited for
    pub steps: Vec<StepEntry>,
    /// "pass" or "fail"
    pub verdict: String,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report generation timestamp
    pub generated_at: String,
    /// Application version
    pub version: String,
    /// Device that was tested
    pub device: String,
    /// Per-press timeout in seconds
    pub timeout_secs: u64,
}

/// Single step entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEntry {
    pub expected: String,
    pub observed: String,
    pub status: String,
}

impl From<&StepRecord> for StepEntry {
    fn from(step: &StepRecord) -> Self {
        let status = match (&step.observed, step.matched()) {
            (_, true) => "ok",
            (Outcome::Timeout, false) => "timeout",
            (Outcome::Error(_), false) => "error",
            (Outcome::Pressed(_), false) => "wrong switch",
        };
        Self {
            expected: step.expected.name.to_string(),
            observed: describe_outcome(&step.observed),
            status: status.to_string(),
        }
    }
}

impl SequenceReport {
    /// Create a report for a finished run
    pub fn new(device: &Path, timeout: Duration, steps: &[StepRecord], verdict: &Verdict) -> Self {
        let now: DateTime<Utc> = Utc::now();

        Self {
            metadata: ReportMetadata {
                generated_at: now.to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                device: device.display().to_string(),
                timeout_secs: timeout.as_secs(),
            },
            steps: steps.iter().map(StepEntry::from).collect(),
            verdict: if verdict.is_pass() { "pass" } else { "fail" }.to_string(),
        }
    }

    /// Export report to JSON file
    pub fn export_json(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export report to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
