//! The location index: normalized name/alias keys mapped to match records.
//!
//! The index is built once from the taxonomy and alias table and is
//! immutable afterwards, so it can be shared across threads without
//! locking. Construction registers every present name of every record plus
//! that name's aliases; lookup is a substring scan that prefers the most
//! specific granularity.

use std::fmt;

use ahash::AHashMap;
use tracing::{trace, warn};

pub use error::IndexError;
use error::Result;
use kaifong_districts::{AliasTable, LocationRecord};

use crate::normalize::normalize;

/// Confidence deduction for keys derived from an alias rather than the
/// canonical name.
const ALIAS_CONFIDENCE_PENALTY: f64 = 0.05;
/// Floor for alias confidence.
const MIN_CONFIDENCE: f64 = 0.80;

/// Which taxonomy level an index key names.
///
/// Ordered from least to most specific, so `Ord` comparisons prefer the
/// finer granularity.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Granularity {
    /// Top-level region (e.g. "Kowloon")
    Region,
    /// District within a region (e.g. "Yau Tsim Mong")
    District,
    /// Sub-area within a district (e.g. "Mong Kok")
    Area,
}

impl Granularity {
    /// Base confidence assigned to a canonical-name key of this granularity.
    #[must_use]
    pub fn base_confidence(self) -> f64 {
        match self {
            Self::Region => 0.85,
            Self::District => 0.90,
            Self::Area => 0.95,
        }
    }

    /// Specificity rank, finer levels ranking higher.
    #[must_use]
    pub fn rank(self) -> u8 {
        match self {
            Self::Region => 1,
            Self::District => 2,
            Self::Area => 3,
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Region => "region",
            Self::District => "district",
            Self::Area => "area",
        };
        f.write_str(label)
    }
}

/// A match record stored in the index under one normalized key.
///
/// Several entries may reference the same taxonomy row — one per present
/// name plus one per alias of each name.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct IndexEntry {
    /// The normalized lookup key (a canonical name or one of its aliases)
    pub key: String,
    /// Region copied from the source record
    pub region: String,
    /// District copied from the source record
    pub district: String,
    /// Sub-area copied from the source record, if present
    pub area: Option<String>,
    /// Which level of the record this key names
    pub granularity: Granularity,
    /// User-facing name for the record: its area if present, else its district
    pub display: String,
    /// Match confidence in `[0.8, 1.0]`, reduced for alias-derived keys
    pub confidence: f64,
}

impl IndexEntry {
    /// The resolved location as a (region, district, area) tuple.
    #[must_use]
    pub fn location(&self) -> (&str, &str, Option<&str>) {
        (&self.region, &self.district, self.area.as_deref())
    }
}

impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} in {}, {:.2})",
            self.display, self.granularity, self.region, self.confidence
        )
    }
}

/// Immutable mapping from normalized keys to match records.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    entries: AHashMap<String, IndexEntry>,
}

impl LocationIndex {
    /// Build the index, silently keeping the last writer on key collisions.
    ///
    /// Registration follows taxonomy iteration order; within each record the
    /// present names are registered most specific first, each followed by
    /// its aliases. Names or aliases that normalize to the empty string are
    /// skipped — an empty key would substring-match every query.
    #[must_use]
    pub fn build(taxonomy: &[LocationRecord], aliases: &AliasTable) -> Self {
        Self::build_inner(taxonomy, aliases, false)
            .expect("lenient index build never reports collisions")
    }

    /// Build the index, failing fast when two different locations collide on
    /// one normalized key.
    ///
    /// Re-registrations of the same name for the same location (the normal
    /// case for a district spanning several area rows) are not collisions.
    /// Intended for data-owner validation; production builds keep the
    /// lenient [`Self::build`] behavior.
    pub fn build_strict(taxonomy: &[LocationRecord], aliases: &AliasTable) -> Result<Self> {
        Self::build_inner(taxonomy, aliases, true)
    }

    fn build_inner(
        taxonomy: &[LocationRecord],
        aliases: &AliasTable,
        strict: bool,
    ) -> Result<Self> {
        let mut entries: AHashMap<String, IndexEntry> = AHashMap::new();

        for record in taxonomy {
            let levels = [
                record.area.as_deref().map(|area| (area, Granularity::Area)),
                Some((record.district.as_str(), Granularity::District)),
                Some((record.region.as_str(), Granularity::Region)),
            ];

            for (name, granularity) in levels.into_iter().flatten() {
                let key = normalize(name);
                if key.is_empty() {
                    warn!(name = %name, "skipping name that normalizes to the empty string");
                    continue;
                }

                let entry = IndexEntry {
                    key: key.clone(),
                    region: record.region.clone(),
                    district: record.district.clone(),
                    area: record.area.clone(),
                    granularity,
                    display: record.display_name().to_string(),
                    confidence: granularity.base_confidence(),
                };
                Self::register(&mut entries, entry, strict)?;

                // Alias lookup tries the normalized canonical name first and
                // falls back to the raw name.
                let Some(synonyms) = aliases.get(&key).or_else(|| aliases.get(name)) else {
                    continue;
                };
                let alias_confidence =
                    (granularity.base_confidence() - ALIAS_CONFIDENCE_PENALTY).max(MIN_CONFIDENCE);
                for synonym in synonyms {
                    let alias_key = normalize(synonym);
                    if alias_key.is_empty() {
                        warn!(synonym = %synonym, "skipping alias that normalizes to the empty string");
                        continue;
                    }
                    let entry = IndexEntry {
                        key: alias_key,
                        region: record.region.clone(),
                        district: record.district.clone(),
                        area: record.area.clone(),
                        granularity,
                        display: record.display_name().to_string(),
                        confidence: alias_confidence,
                    };
                    Self::register(&mut entries, entry, strict)?;
                }
            }
        }

        trace!(keys = entries.len(), "location index built");
        Ok(Self { entries })
    }

    fn register(
        entries: &mut AHashMap<String, IndexEntry>,
        entry: IndexEntry,
        strict: bool,
    ) -> Result<()> {
        if strict
            && let Some(existing) = entries.get(&entry.key)
            && !same_referent(existing, &entry)
        {
            return Err(IndexError::DuplicateKey {
                key: entry.key.clone(),
            });
        }
        // Last registration wins.
        entries.insert(entry.key.clone(), entry);
        Ok(())
    }

    /// The entry registered under an already-normalized key, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&IndexEntry> {
        self.entries.get(key)
    }

    /// Number of registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all registered entries (arbitrary order).
    pub fn entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    /// Resolve a free-form query to the single best match.
    ///
    /// A key is a candidate when the normalized query contains it as a
    /// contiguous substring. The winner is the candidate with the most
    /// specific granularity; granularity ties go to the candidate whose
    /// normalized display name is longer. Returns `None` when nothing in
    /// the query names a known location.
    #[must_use]
    pub fn best_match(&self, query: &str) -> Option<&IndexEntry> {
        let q = normalize(query);
        if q.is_empty() {
            return None;
        }

        let best = self
            .entries
            .iter()
            .filter(|(key, _)| !key.is_empty() && q.contains(key.as_str()))
            .map(|(_, entry)| entry)
            .max_by_key(|entry| (entry.granularity, normalize(&entry.display).len()));

        if let Some(entry) = best {
            trace!(query = %q, key = %entry.key, granularity = %entry.granularity, "matched");
        } else {
            trace!(query = %q, "no match");
        }
        best
    }
}

/// Whether two entries under the same key point at the same location at the
/// same granularity.
fn same_referent(a: &IndexEntry, b: &IndexEntry) -> bool {
    a.granularity == b.granularity
        && match a.granularity {
            Granularity::Region => a.region == b.region,
            Granularity::District => a.region == b.region && a.district == b.district,
            Granularity::Area => {
                a.region == b.region && a.district == b.district && a.area == b.area
            }
        }
}

mod error {
    use thiserror::Error;

    pub type Result<T> = std::result::Result<T, IndexError>;

    #[derive(Error, Debug)]
    pub enum IndexError {
        #[error("two different locations share the normalized key '{key}'")]
        DuplicateKey { key: String },
    }
}
