use std::path::PathBuf;

use health_output::VerificationReport;
use serde::Serialize;

/// Row counts and timing for one pipeline stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageSummary {
    pub stage: &'static str,
    pub description: &'static str,
    pub rows_in: usize,
    pub rows_out: usize,
    pub duration_ms: u128,
}

/// Result of one download attempt.
#[derive(Debug, Clone, Serialize)]
pub struct FetchSummary {
    pub source: &'static str,
    pub url: String,
    pub path: PathBuf,
    pub bytes: Option<u64>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub fetches: Vec<FetchSummary>,
    pub stages: Vec<StageSummary>,
    pub database: PathBuf,
    pub table: String,
    pub csv: PathBuf,
    pub rows_written: usize,
}

/// Serializable view of a verification report.
#[derive(Debug, Clone, Serialize)]
pub struct VerifySummary {
    pub database: PathBuf,
    pub table: String,
    pub passed: bool,
    pub row_count: Option<i64>,
    pub checks: Vec<VerifyCheck>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyCheck {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl From<&VerificationReport> for VerifySummary {
    fn from(report: &VerificationReport) -> Self {
        Self {
            database: report.database.clone(),
            table: report.table.clone(),
            passed: report.passed(),
            row_count: report.row_count,
            checks: report
                .checks
                .iter()
                .map(|check| VerifyCheck {
                    name: check.name,
                    passed: check.passed,
                    detail: check.detail.clone(),
                })
                .collect(),
        }
    }
}
