//! Domain-level error taxonomy for lapor.

use uuid::Uuid;

use crate::domain::report::EvaluationStatus;

/// Errors produced by taxonomy asset validation.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyValidationError {
    #[error("duplicate category name: {name}")]
    DuplicateCategory { name: String },

    #[error("category {name} has an empty subcategory list")]
    EmptySubcategories { name: String },

    #[error("category name must not be empty")]
    EmptyCategoryName,
}

/// Lapor domain errors.
#[derive(Debug, thiserror::Error)]
pub enum LaporError {
    #[error("no such nonconformity category: {0}")]
    CategoryNotFound(String),

    #[error("category {category} has no subcategory: {subcategory}")]
    SubcategoryNotFound {
        category: String,
        subcategory: String,
    },

    #[error("report not found: {0}")]
    ReportNotFound(Uuid),

    #[error("invalid transition: {from} -> {to}")]
    InvalidTransition {
        from: EvaluationStatus,
        to: EvaluationStatus,
    },

    #[error("report {report_id} carries unknown status: {status:?}")]
    InvalidStatus { report_id: Uuid, status: String },

    #[error("invalid taxonomy: {0}")]
    Validation(#[from] TaxonomyValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for lapor domain operations.
pub type Result<T> = std::result::Result<T, LaporError>;
