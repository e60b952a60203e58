//! Lapor Core Library
//!
//! Domain logic for tracking compliance-inspection reports ("laporan")
//! through the evaluation workflow: the status lifecycle, the static
//! nonconformity taxonomy, and the aggregation behind the dashboard
//! summary cards.

pub mod domain;
pub mod metrics;
pub mod reporting;
pub mod snapshot;
pub mod summary;
pub mod taxonomy;
pub mod telemetry;

pub use domain::{
    Classification, EvaluationStatus, LaporError, Report, Result, TaxonomyValidationError,
};

pub use reporting::{render_summary_md, write_summary_json, SummaryArtifact};

pub use snapshot::{ReportRow, ReportSnapshot, SNAPSHOT_SCHEMA_VERSION};

pub use summary::{summarize, SummaryStats};

pub use taxonomy::{NonconformityCategory, Taxonomy};
