//! Evaluation aggregator: the counts behind the dashboard cards.

use serde::{Deserialize, Serialize};

use crate::domain::error::{LaporError, Result};
use crate::domain::report::{EvaluationStatus, Report};
use crate::metrics::METRICS;
use crate::snapshot::ReportRow;

/// Per-status counts over a collection of reports.
///
/// # Invariants
///
/// `total_reports` equals the sum of the four per-status counters. The
/// aggregator rejects out-of-enum statuses rather than miscounting, so
/// the invariant holds for every value it produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub total_reports: usize,
    pub ready_for_evaluation: usize,
    pub in_evaluation: usize,
    pub completed: usize,
    pub needs_re_review: usize,
}

impl SummaryStats {
    /// Tally one report's status.
    pub fn record(&mut self, status: EvaluationStatus) {
        self.total_reports += 1;
        match status {
            EvaluationStatus::ReadyForEvaluation => self.ready_for_evaluation += 1,
            EvaluationStatus::InEvaluation => self.in_evaluation += 1,
            EvaluationStatus::Completed => self.completed += 1,
            EvaluationStatus::NeedsReReview => self.needs_re_review += 1,
        }
    }

    /// Aggregate an already-typed collection.
    ///
    /// Infallible: a closed enum cannot carry an out-of-range status.
    pub fn from_reports<'a, I>(reports: I) -> Self
    where
        I: IntoIterator<Item = &'a Report>,
    {
        let mut stats = Self::default();
        for report in reports {
            stats.record(report.status);
        }
        stats
    }

    /// Count for a single status bucket.
    pub fn count_for(&self, status: EvaluationStatus) -> usize {
        match status {
            EvaluationStatus::ReadyForEvaluation => self.ready_for_evaluation,
            EvaluationStatus::InEvaluation => self.in_evaluation,
            EvaluationStatus::Completed => self.completed,
            EvaluationStatus::NeedsReReview => self.needs_re_review,
        }
    }

    /// Sum of the four status buckets.
    pub fn bucket_total(&self) -> usize {
        self.ready_for_evaluation + self.in_evaluation + self.completed + self.needs_re_review
    }

    /// Whether `total_reports` matches the bucket sum.
    pub fn is_consistent(&self) -> bool {
        self.total_reports == self.bucket_total()
    }
}

/// Compute summary stats over snapshot rows in one pass.
///
/// Pure and stateless: repeated calls over fresh snapshots are
/// independent, and the input is never mutated.
///
/// # Errors
///
/// Returns `InvalidStatus` when any row carries a status outside the four
/// lifecycle variants. The dashboard has no "other" bucket, so a corrupted
/// row must surface instead of being swallowed or miscounted.
pub fn summarize(rows: &[ReportRow]) -> Result<SummaryStats> {
    let mut stats = SummaryStats::default();
    for row in rows {
        let status =
            EvaluationStatus::parse(&row.status).ok_or_else(|| LaporError::InvalidStatus {
                report_id: row.report_id,
                status: row.status.clone(),
            })?;
        stats.record(status);
    }
    METRICS.inc_snapshots_summarized();
    Ok(stats)
}
