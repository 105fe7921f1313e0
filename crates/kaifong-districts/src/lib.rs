//! Curated location data for the kaifong engine.
//!
//! This crate owns the static three-level Hong Kong taxonomy
//! (region → district → area) and the informal alias table the engine
//! builds its index from. The data is supplied whole and never mutated at
//! runtime; [`validate`] is the data-owner check that runs in this crate's
//! tests, not at query time.

use std::fmt;

pub mod aliases;
pub mod dataset;

pub use aliases::{AliasTable, hong_kong_aliases};
pub use dataset::hong_kong;
pub use error::{Result, TaxonomyError};

/// One row of the three-level location taxonomy.
///
/// `region` and `district` are always present; `area` is the optional
/// sub-area level. Rows are immutable once constructed and many rows share
/// the same (region, district) pair, one per curated area.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationRecord {
    /// Top-level region (e.g. "Kowloon")
    pub region: String,
    /// District within the region (e.g. "Yau Tsim Mong")
    pub district: String,
    /// Optional sub-area within the district (e.g. "Mong Kok")
    pub area: Option<String>,
}

impl LocationRecord {
    /// Create a district-level record with no sub-area.
    pub fn new(region: impl Into<String>, district: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            district: district.into(),
            area: None,
        }
    }

    /// Create an area-level record.
    pub fn with_area(
        region: impl Into<String>,
        district: impl Into<String>,
        area: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            district: district.into(),
            area: Some(area.into()),
        }
    }

    /// Present names from most to least specific: area (if any), district, region.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.area
            .as_deref()
            .into_iter()
            .chain([self.district.as_str(), self.region.as_str()])
    }

    /// The name shown to users for this row: the area if present, else the district.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.area.as_deref().unwrap_or(&self.district)
    }

    /// Composite identity key, `region|district|area-or-empty`.
    ///
    /// Two rows describe the same location iff their keys are equal.
    #[must_use]
    pub fn composite_key(&self) -> String {
        format!(
            "{}|{}|{}",
            self.region,
            self.district,
            self.area.as_deref().unwrap_or_default()
        )
    }
}

impl fmt::Display for LocationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.area {
            Some(area) => write!(f, "{}, {}, {}", area, self.district, self.region),
            None => write!(f, "{}, {}", self.district, self.region),
        }
    }
}

/// Validate a taxonomy before it is compiled into an application.
///
/// Checks the structural invariants the query engine assumes but never
/// re-checks: every row names a non-empty region and district, an area
/// (when present) is non-empty, and no two rows share the same
/// (region, district, area) identity.
pub fn validate(records: &[LocationRecord]) -> Result<()> {
    let mut seen = ahash::AHashSet::with_capacity(records.len());

    for (index, record) in records.iter().enumerate() {
        if record.region.trim().is_empty() {
            return Err(TaxonomyError::EmptyRegion { index });
        }
        if record.district.trim().is_empty() {
            return Err(TaxonomyError::EmptyDistrict { index });
        }
        if let Some(area) = &record.area
            && area.trim().is_empty()
        {
            return Err(TaxonomyError::EmptyArea { index });
        }
        if !seen.insert(record.composite_key()) {
            return Err(TaxonomyError::DuplicateRecord {
                key: record.composite_key(),
            });
        }
    }

    tracing::debug!(records = records.len(), "taxonomy validated");
    Ok(())
}

mod error {
    use thiserror::Error;

    pub type Result<T> = std::result::Result<T, TaxonomyError>;

    #[derive(Error, Debug)]
    pub enum TaxonomyError {
        #[error("record {index} has an empty region")]
        EmptyRegion { index: usize },
        #[error("record {index} has an empty district")]
        EmptyDistrict { index: usize },
        #[error("record {index} has an empty area")]
        EmptyArea { index: usize },
        #[error("duplicate taxonomy record: {key}")]
        DuplicateRecord { key: String },
    }
}
