//! Report entity and the evaluation-status lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::error::{LaporError, Result};
use crate::metrics::METRICS;
use crate::taxonomy::Taxonomy;

/// Position of a report in the evaluation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    /// Waiting in the queue for an evaluator.
    ReadyForEvaluation,

    /// An evaluator has claimed the report and is working on it.
    InEvaluation,

    /// Evaluation finished and accepted.
    Completed,

    /// A finished pass was flagged for another round.
    NeedsReReview,
}

impl EvaluationStatus {
    /// All variants, in dashboard display order.
    pub const ALL: [Self; 4] = [
        Self::ReadyForEvaluation,
        Self::InEvaluation,
        Self::Completed,
        Self::NeedsReReview,
    ];

    /// Wire name used in snapshots and artifacts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadyForEvaluation => "ready_for_evaluation",
            Self::InEvaluation => "in_evaluation",
            Self::Completed => "completed",
            Self::NeedsReReview => "needs_re_review",
        }
    }

    /// Parse a wire name back into a status.
    ///
    /// Returns `None` for anything outside the four lifecycle variants;
    /// callers decide whether that is an error (see the aggregator).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "ready_for_evaluation" => Some(Self::ReadyForEvaluation),
            "in_evaluation" => Some(Self::InEvaluation),
            "completed" => Some(Self::Completed),
            "needs_re_review" => Some(Self::NeedsReReview),
            _ => None,
        }
    }

    /// Display label shown on the dashboard cards.
    pub fn label(&self) -> &'static str {
        match self {
            Self::ReadyForEvaluation => "Siap Dievaluasi",
            Self::InEvaluation => "Dalam Evaluasi",
            Self::Completed => "Selesai",
            Self::NeedsReReview => "Perlu Review Ulang",
        }
    }

    /// Whether this status has no outgoing transitions.
    ///
    /// `NeedsReReview` is not terminal: it drains back into the queue via
    /// [`Report::requeue`].
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Whether the lifecycle permits moving from `self` to `next`.
    pub fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (*self, next),
            (Self::ReadyForEvaluation, Self::InEvaluation)
                | (Self::InEvaluation, Self::Completed)
                | (Self::InEvaluation, Self::NeedsReReview)
                | (Self::NeedsReReview, Self::ReadyForEvaluation)
        )
    }
}

impl std::fmt::Display for EvaluationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report's nonconformity classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Category name, exactly as listed in the taxonomy.
    pub category: String,

    /// Subcategory describing the specific finding.
    pub subcategory: String,
}

/// A compliance-inspection report moving through the evaluation workflow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    /// Unique identifier for this report.
    pub report_id: Uuid,

    /// Short human-readable description of the finding.
    pub title: String,

    /// Current position in the evaluation lifecycle.
    pub status: EvaluationStatus,

    /// Nonconformity classification, when one has been assigned.
    pub classification: Option<Classification>,

    /// When the report entered the queue.
    pub submitted_at: DateTime<Utc>,

    /// When the status last changed.
    pub updated_at: DateTime<Utc>,
}

impl Report {
    /// Create a new report at the head of the evaluation queue.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            report_id: Uuid::new_v4(),
            title: title.into(),
            status: EvaluationStatus::ReadyForEvaluation,
            classification: None,
            submitted_at: now,
            updated_at: now,
        }
    }

    /// Assign a nonconformity classification, validated against `taxonomy`.
    ///
    /// Both levels must match the catalog exactly (case-sensitive).
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` when the category is not in the catalog,
    /// `SubcategoryNotFound` when the category exists but the subcategory
    /// is not listed under it.
    pub fn classify(&mut self, taxonomy: &Taxonomy, category: &str, subcategory: &str) -> Result<()> {
        let subcategories = taxonomy.subcategories_of(category)?;
        if !subcategories.iter().any(|s| s == subcategory) {
            return Err(LaporError::SubcategoryNotFound {
                category: category.to_string(),
                subcategory: subcategory.to_string(),
            });
        }
        self.classification = Some(Classification {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
        });
        Ok(())
    }

    /// `ReadyForEvaluation -> InEvaluation`: an evaluator takes the report.
    pub fn claim(&mut self) -> Result<()> {
        self.transition_to(EvaluationStatus::InEvaluation)
    }

    /// `InEvaluation -> Completed`: pass finalized with no flagged issues.
    pub fn complete(&mut self) -> Result<()> {
        self.transition_to(EvaluationStatus::Completed)
    }

    /// `InEvaluation -> NeedsReReview`: pass finalized but flagged for
    /// another round.
    pub fn flag_for_re_review(&mut self) -> Result<()> {
        self.transition_to(EvaluationStatus::NeedsReReview)
    }

    /// `NeedsReReview -> ReadyForEvaluation`: re-enter the evaluation queue.
    pub fn requeue(&mut self) -> Result<()> {
        self.transition_to(EvaluationStatus::ReadyForEvaluation)
    }

    /// Apply one lifecycle transition.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` when the lifecycle does not permit the
    /// move; the report's status is left unchanged.
    fn transition_to(&mut self, next: EvaluationStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(LaporError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        tracing::debug!(
            report_id = %self.report_id,
            from = %self.status,
            to = %next,
            "status transition"
        );
        self.status = next;
        self.updated_at = Utc::now();
        METRICS.inc_transitions();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_ready_for_evaluation() {
        let report = Report::new("Tumpukan sampah di area loading dock");
        assert_eq!(report.status, EvaluationStatus::ReadyForEvaluation);
        assert!(report.classification.is_none());
        assert_eq!(report.submitted_at, report.updated_at);
    }

    #[test]
    fn test_claim_moves_report_into_evaluation() {
        let mut report = Report::new("temuan");
        report.claim().unwrap();
        assert_eq!(report.status, EvaluationStatus::InEvaluation);
    }

    #[test]
    fn test_completed_is_terminal() {
        let mut report = Report::new("temuan");
        report.claim().unwrap();
        report.complete().unwrap();

        let err = report.claim().unwrap_err();
        assert!(matches!(
            err,
            LaporError::InvalidTransition {
                from: EvaluationStatus::Completed,
                to: EvaluationStatus::InEvaluation,
            }
        ));
        // Rejected transition leaves the status untouched.
        assert_eq!(report.status, EvaluationStatus::Completed);
    }

    #[test]
    fn test_re_review_cycle_returns_to_queue() {
        let mut report = Report::new("temuan");
        report.claim().unwrap();
        report.flag_for_re_review().unwrap();
        report.requeue().unwrap();
        assert_eq!(report.status, EvaluationStatus::ReadyForEvaluation);
    }

    #[test]
    fn test_requeue_requires_re_review_flag() {
        let mut report = Report::new("temuan");
        assert!(report.requeue().is_err());
        report.claim().unwrap();
        assert!(report.requeue().is_err());
        assert_eq!(report.status, EvaluationStatus::InEvaluation);
    }

    #[test]
    fn test_classify_validates_both_levels() {
        let taxonomy = Taxonomy::builtin();
        let mut report = Report::new("temuan");

        report
            .classify(
                taxonomy,
                "Pengelolaan Sampah",
                "[ENV] Sampah dibuang tidak pada tempat sampah",
            )
            .unwrap();
        let classification = report.classification.as_ref().unwrap();
        assert_eq!(classification.category, "Pengelolaan Sampah");

        let err = report
            .classify(taxonomy, "Pengelolaan Sampah", "[ENV] tidak terdaftar")
            .unwrap_err();
        assert!(matches!(err, LaporError::SubcategoryNotFound { .. }));

        let err = report
            .classify(taxonomy, "Kategori Fiktif", "apa saja")
            .unwrap_err();
        assert!(matches!(err, LaporError::CategoryNotFound(_)));
    }

    #[test]
    fn test_status_wire_names_round_trip() {
        for status in EvaluationStatus::ALL {
            assert_eq!(EvaluationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EvaluationStatus::parse("archived"), None);
    }

    #[test]
    fn test_status_labels_match_dashboard_cards() {
        assert_eq!(
            EvaluationStatus::ReadyForEvaluation.label(),
            "Siap Dievaluasi"
        );
        assert_eq!(EvaluationStatus::InEvaluation.label(), "Dalam Evaluasi");
        assert_eq!(EvaluationStatus::Completed.label(), "Selesai");
        assert_eq!(EvaluationStatus::NeedsReReview.label(), "Perlu Review Ulang");
    }
}
