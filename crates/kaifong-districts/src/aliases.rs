//! Informal synonyms for canonical taxonomy names.
//!
//! Hong Kong addresses are riddled with abbreviations ("tst", "mk") and
//! spacing variants ("mongkok"); the alias table widens matching without
//! touching the canonical data. Keys are canonical names in their
//! normalized lowercase form; the engine falls back to the raw name when a
//! normalized lookup misses.

use ahash::AHashMap;
use once_cell::sync::Lazy;

/// Fixed mapping from a canonical name to its ordered informal synonyms.
///
/// Built once from curated pairs and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    entries: AHashMap<String, Vec<String>>,
}

impl AliasTable {
    /// An empty table (no aliases registered).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from (canonical name, synonyms) pairs.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a [&'a str])>,
    {
        let entries = pairs
            .into_iter()
            .map(|(canonical, synonyms)| {
                (
                    canonical.to_string(),
                    synonyms.iter().map(ToString::to_string).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Synonyms registered under `name`, in curation order.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    /// Number of canonical names with at least one synonym.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[rustfmt::skip]
const HONG_KONG_ALIAS_TABLE: &[(&str, &[&str])] = &[
    // Regions
    ("hong kong island", &["hk island", "hong kong side", "island side"]),
    ("kowloon", &["kln", "kowloon side"]),
    // "nt" is deliberately absent: two-letter fragments inside ordinary
    // words ("urgent", "apartment") would substring-match it.
    ("new territories", &["new territory"]),
    // Districts
    ("central and western", &["central western"]),
    ("wan chai", &["wanchai"]),
    ("sham shui po", &["ssp"]),
    ("yau tsim mong", &["ytm"]),
    // Areas
    ("sai ying pun", &["syp"]),
    ("kennedy town", &["k town"]),
    ("causeway bay", &["cwb"]),
    ("happy valley", &["pau ma dei"]),
    ("tsim sha tsui", &["tst"]),
    ("mong kok", &["mk", "mongkok"]),
    ("yau ma tei", &["yaumatei"]),
    ("cheung sha wan", &["csw"]),
    ("tai kok tsui", &["tkt"]),
    ("to kwa wan", &["tkw"]),
    ("tseung kwan o", &["tko", "junk bay"]),
    ("tin shui wai", &["tsw"]),
    ("discovery bay", &["disco bay"]),
    ("cheung chau", &["cheungchau"]),
];

static HONG_KONG_ALIASES: Lazy<AliasTable> =
    Lazy::new(|| AliasTable::from_pairs(HONG_KONG_ALIAS_TABLE.iter().copied()));

/// The curated alias table for the embedded Hong Kong taxonomy.
#[must_use]
pub fn hong_kong_aliases() -> &'static AliasTable {
    &HONG_KONG_ALIASES
}
