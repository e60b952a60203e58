//! Report snapshot artifacts.
//!
//! The dashboard tooling materializes reports from a JSON snapshot rather
//! than a database. Rows keep the status as its raw wire string so that
//! corrupted upstream data is caught when the row is parsed or
//! aggregated, instead of being silently coerced.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::{LaporError, Result};
use crate::domain::report::{Classification, EvaluationStatus, Report};

/// Current snapshot layout version.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// One report as persisted in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub report_id: Uuid,
    pub title: String,
    /// Raw status wire string; validated when the row is used.
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReportRow {
    /// Parse this row into a typed report.
    ///
    /// # Errors
    ///
    /// Returns `InvalidStatus` when the status string is not one of the
    /// four lifecycle variants.
    pub fn to_report(&self) -> Result<Report> {
        let status =
            EvaluationStatus::parse(&self.status).ok_or_else(|| LaporError::InvalidStatus {
                report_id: self.report_id,
                status: self.status.clone(),
            })?;
        Ok(Report {
            report_id: self.report_id,
            title: self.title.clone(),
            status,
            classification: self.classification.clone(),
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
        })
    }
}

impl From<&Report> for ReportRow {
    fn from(report: &Report) -> Self {
        Self {
            report_id: report.report_id,
            title: report.title.clone(),
            status: report.status.as_str().to_string(),
            classification: report.classification.clone(),
            submitted_at: report.submitted_at,
            updated_at: report.updated_at,
        }
    }
}

/// A point-in-time collection of reports for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSnapshot {
    pub schema_version: u32,
    pub generated_at: DateTime<Utc>,
    pub reports: Vec<ReportRow>,
}

impl ReportSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            generated_at: Utc::now(),
            reports: Vec::new(),
        }
    }

    /// Load a snapshot from JSON on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write the snapshot as pretty JSON, refreshing `generated_at`.
    pub fn write_to_path(&mut self, path: &Path) -> Result<()> {
        self.generated_at = Utc::now();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Append a typed report as a new row.
    pub fn push_report(&mut self, report: &Report) {
        self.reports.push(ReportRow::from(report));
    }

    /// Mutable access to the row with the given id.
    ///
    /// # Errors
    ///
    /// Returns `ReportNotFound` when no row matches.
    pub fn find_row_mut(&mut self, report_id: Uuid) -> Result<&mut ReportRow> {
        self.reports
            .iter_mut()
            .find(|r| r.report_id == report_id)
            .ok_or(LaporError::ReportNotFound(report_id))
    }
}

impl Default for ReportSnapshot {
    fn default() -> Self {
        Self::new()
    }
}
