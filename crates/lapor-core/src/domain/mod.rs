//! Domain models for lapor.
//!
//! Canonical definitions for the core entities:
//! - `Report`: a compliance-inspection report moving through evaluation
//! - `EvaluationStatus`: the four-state evaluation lifecycle
//! - `Classification`: a report's nonconformity category/subcategory pair

pub mod digest;
pub mod error;
pub mod report;

// Re-export main types and errors
pub use error::{LaporError, Result, TaxonomyValidationError};
pub use report::{Classification, EvaluationStatus, Report};
