//! Static nonconformity taxonomy (the "ketidaksesuaian" catalog).
//!
//! The catalog ships as a versioned JSON asset embedded into the binary,
//! and can also be loaded from disk so deployments can revise the
//! reference data without a rebuild. It is read-only for the lifetime of
//! the process: no mutation API is exposed.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::digest::digest_json;
use crate::domain::error::{LaporError, Result, TaxonomyValidationError};
use crate::metrics::METRICS;

/// Embedded revision of the catalog.
const BUILTIN_ASSET: &str = include_str!("../assets/taxonomy.json");

static BUILTIN: OnceLock<Taxonomy> = OnceLock::new();

/// One nonconformity category and the findings filed under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonconformityCategory {
    /// Unique human-readable label, e.g. "Pengelolaan Sampah".
    pub name: String,

    /// Ordered, non-empty list of specific findings under this category.
    pub subcategories: Vec<String>,
}

/// The two-level nonconformity catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxonomy {
    /// Asset layout version, bumped on breaking changes.
    pub schema_version: u32,

    categories: Vec<NonconformityCategory>,
}

impl Taxonomy {
    /// Parse and validate a catalog from its JSON form.
    ///
    /// # Errors
    ///
    /// Serialization errors for malformed JSON; `Validation` when the
    /// content breaks a catalog invariant (duplicate or empty category
    /// name, empty subcategory list).
    pub fn from_json(raw: &str) -> Result<Self> {
        let taxonomy: Taxonomy = serde_json::from_str(raw)?;
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Load and validate a catalog from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// The embedded catalog revision, parsed and validated once per process.
    ///
    /// The asset is compiled in, so a failure here is a build defect rather
    /// than a runtime condition.
    pub fn builtin() -> &'static Taxonomy {
        BUILTIN.get_or_init(|| {
            Taxonomy::from_json(BUILTIN_ASSET).expect("embedded taxonomy asset is valid")
        })
    }

    /// All categories, in source-definition order.
    pub fn categories(&self) -> &[NonconformityCategory] {
        &self.categories
    }

    /// Subcategories of the exactly-named category.
    ///
    /// Lookups are case-sensitive with no fuzzy matching.
    ///
    /// # Errors
    ///
    /// Returns `CategoryNotFound` when no category matches.
    pub fn subcategories_of(&self, name: &str) -> Result<&[String]> {
        METRICS.inc_taxonomy_lookups();
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.subcategories.as_slice())
            .ok_or_else(|| LaporError::CategoryNotFound(name.to_string()))
    }

    /// Whether the catalog lists `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Deterministic content digest of this catalog revision.
    pub fn digest(&self) -> Result<String> {
        digest_json(self)
    }

    fn validate(&self) -> std::result::Result<(), TaxonomyValidationError> {
        let mut seen = BTreeSet::new();
        for category in &self.categories {
            if category.name.is_empty() {
                return Err(TaxonomyValidationError::EmptyCategoryName);
            }
            if !seen.insert(category.name.as_str()) {
                return Err(TaxonomyValidationError::DuplicateCategory {
                    name: category.name.clone(),
                });
            }
            if category.subcategories.is_empty() {
                return Err(TaxonomyValidationError::EmptySubcategories {
                    name: category.name.clone(),
                });
            }
        }
        Ok(())
    }
}
