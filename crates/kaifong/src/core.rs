//! Core location resolution functionality for the kaifong library.
//!
//! This module provides the main [`LocationResolver`] interface for turning
//! free-form location text into structured references into the
//! region → district → area taxonomy. It combines the substring match
//! resolver (single best match, for intent routing) with the tiered
//! relevance search (ranked suggestions, for autocomplete) over one shared
//! location index.
//!
//! # Quick Start
//!
//! ```rust
//! use kaifong::LocationResolver;
//!
//! let resolver = LocationResolver::new_embedded();
//!
//! // Best single match inside free text
//! if let Some(matched) = resolver.match_location("need a plumber near mong kok") {
//!     println!("{} in {}", matched.display, matched.region);
//! }
//!
//! // Ranked suggestions for an autocomplete box
//! for candidate in resolver.search_locations("tsim") {
//!     println!("{} ({:.2})", candidate.display, candidate.score);
//! }
//! ```

use once_cell::sync::Lazy;
use tracing::{debug, instrument};

use itertools::Itertools;
use kaifong_districts::{AliasTable, LocationRecord, hong_kong, hong_kong_aliases};

use crate::{
    config::SearchConfig,
    error::KaifongError,
    index::{IndexEntry, LocationIndex},
    search::{SearchCandidate, search_locations_inner},
};

static SHARED_RESOLVER: Lazy<LocationResolver> = Lazy::new(LocationResolver::new_embedded);

/// The main resolver that provides matching, ranked search, and taxonomy
/// projections.
///
/// A resolver owns its taxonomy and the index built from it. The index is
/// constructed once, up front, and never mutated, so a resolver can be
/// shared freely across threads.
///
/// # Examples
///
/// ```rust
/// use kaifong::LocationResolver;
///
/// let resolver = LocationResolver::new_embedded();
/// let suggestions = resolver.search_locations("wan");
/// println!("{} suggestions", suggestions.len());
/// ```
#[derive(Debug, Clone)]
pub struct LocationResolver {
    taxonomy: Vec<LocationRecord>,
    index: LocationIndex,
}

impl LocationResolver {
    /// Create a resolver over the embedded Hong Kong taxonomy and aliases.
    #[must_use]
    pub fn new_embedded() -> Self {
        Self::from_taxonomy(hong_kong().to_vec(), hong_kong_aliases())
    }

    /// The process-wide resolver over the embedded data, built on first use
    /// and reused for the process lifetime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kaifong::LocationResolver;
    ///
    /// let matched = LocationResolver::shared().match_location("wan chai");
    /// assert!(matched.is_some());
    /// ```
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED_RESOLVER
    }

    /// Create a resolver over a custom taxonomy and alias table.
    ///
    /// Useful for tests and for hosts that ship their own curated data.
    /// Index key collisions keep the last registration; use
    /// [`LocationResolver::builder`] with `strict_keys` to fail fast
    /// instead.
    #[must_use]
    pub fn from_taxonomy(taxonomy: Vec<LocationRecord>, aliases: &AliasTable) -> Self {
        let index = LocationIndex::build(&taxonomy, aliases);
        debug!(
            records = taxonomy.len(),
            keys = index.len(),
            "location resolver ready"
        );
        Self { taxonomy, index }
    }

    /// Start building a resolver with non-default options.
    #[must_use]
    pub fn builder() -> LocationResolverBuilder {
        LocationResolverBuilder::new()
    }

    // === Query operations ===

    /// Resolve a free-form query to the single best match, if any.
    ///
    /// Scans the index for keys contained in the normalized query and
    /// prefers the most specific granularity, breaking ties towards the
    /// longer display name. Intended for deterministic routing: mapping a
    /// search phrase to one target location.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kaifong::{Granularity, LocationResolver};
    ///
    /// let resolver = LocationResolver::new_embedded();
    /// let matched = resolver.match_location("flat for rent in causeway bay").unwrap();
    /// assert_eq!(matched.area.as_deref(), Some("Causeway Bay"));
    /// assert_eq!(matched.granularity, Granularity::Area);
    /// ```
    #[instrument(name = "Match Location", level = "debug", skip(self))]
    #[must_use]
    pub fn match_location(&self, query: &str) -> Option<IndexEntry> {
        self.index.best_match(query).cloned()
    }

    /// Ranked, deduplicated suggestions for a query, capped at the default
    /// limit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kaifong::LocationResolver;
    ///
    /// let resolver = LocationResolver::new_embedded();
    /// let suggestions = resolver.search_locations("sha");
    /// assert!(suggestions.len() <= 10);
    /// ```
    #[must_use]
    pub fn search_locations(&self, query: &str) -> Vec<SearchCandidate> {
        self.search_locations_with_config(query, &SearchConfig::default())
    }

    /// Ranked suggestions with a custom configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kaifong::{LocationResolver, SearchConfig};
    ///
    /// let resolver = LocationResolver::new_embedded();
    /// let config = SearchConfig::builder().limit(3).build();
    /// let suggestions = resolver.search_locations_with_config("tai", &config);
    /// assert!(suggestions.len() <= 3);
    /// ```
    #[instrument(name = "Search Locations", level = "debug", skip(self, config))]
    #[must_use]
    pub fn search_locations_with_config(
        &self,
        query: &str,
        config: &SearchConfig,
    ) -> Vec<SearchCandidate> {
        search_locations_inner(&self.taxonomy, query, config)
    }

    // === Taxonomy projections (for cascading selector UIs) ===

    /// Distinct region names, in taxonomy order.
    #[must_use]
    pub fn regions(&self) -> Vec<&str> {
        self.taxonomy
            .iter()
            .map(|record| record.region.as_str())
            .unique()
            .collect()
    }

    /// Distinct district names within a region, in taxonomy order.
    #[must_use]
    pub fn districts_in_region(&self, region: &str) -> Vec<&str> {
        self.taxonomy
            .iter()
            .filter(|record| record.region == region)
            .map(|record| record.district.as_str())
            .unique()
            .collect()
    }

    /// Distinct area names within a (region, district) pair, in taxonomy
    /// order. Districts without curated areas yield an empty list.
    #[must_use]
    pub fn areas_in_district(&self, region: &str, district: &str) -> Vec<&str> {
        self.taxonomy
            .iter()
            .filter(|record| record.region == region && record.district == district)
            .filter_map(|record| record.area.as_deref())
            .unique()
            .collect()
    }

    // === Utility Methods ===

    /// Access the underlying [`LocationIndex`] for advanced operations.
    #[must_use]
    pub fn index(&self) -> &LocationIndex {
        &self.index
    }

    /// Access the taxonomy this resolver was built from.
    #[must_use]
    pub fn taxonomy(&self) -> &[LocationRecord] {
        &self.taxonomy
    }
}

impl Default for LocationResolver {
    fn default() -> Self {
        Self::new_embedded()
    }
}

/// Builder for creating a [`LocationResolver`] with custom data or
/// data-owner checks enabled.
///
/// # Examples
///
/// ```rust
/// use kaifong::{AliasTable, LocationRecord, LocationResolver};
///
/// let taxonomy = vec![LocationRecord::with_area("Kowloon", "Yau Tsim Mong", "Mong Kok")];
/// let resolver = LocationResolver::builder()
///     .taxonomy(taxonomy)
///     .aliases(AliasTable::from_pairs([("mong kok", ["mk"].as_slice())]))
///     .strict_keys(true)
///     .build()?;
/// assert!(resolver.match_location("mk").is_some());
/// # Ok::<(), kaifong::error::KaifongError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocationResolverBuilder {
    taxonomy: Option<Vec<LocationRecord>>,
    aliases: Option<AliasTable>,
    strict_keys: bool,
    validate_taxonomy: bool,
}

impl LocationResolverBuilder {
    /// Create a new builder defaulting to the embedded data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom taxonomy instead of the embedded one.
    #[must_use]
    pub fn taxonomy(mut self, taxonomy: Vec<LocationRecord>) -> Self {
        self.taxonomy = Some(taxonomy);
        self
    }

    /// Use a custom alias table instead of the embedded one.
    #[must_use]
    pub fn aliases(mut self, aliases: AliasTable) -> Self {
        self.aliases = Some(aliases);
        self
    }

    /// Fail the build when two different locations collide on one
    /// normalized index key, instead of keeping the last registration.
    #[must_use]
    pub fn strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }

    /// Run the taxonomy structural checks
    /// ([`kaifong_districts::validate`]) before building the index.
    #[must_use]
    pub fn validate_taxonomy(mut self, validate: bool) -> Self {
        self.validate_taxonomy = validate;
        self
    }

    /// Build the resolver.
    pub fn build(self) -> Result<LocationResolver, KaifongError> {
        let taxonomy = self
            .taxonomy
            .unwrap_or_else(|| hong_kong().to_vec());
        if taxonomy.is_empty() {
            return Err(KaifongError::ConfigError(
                "taxonomy must contain at least one record".to_string(),
            ));
        }
        if self.validate_taxonomy {
            kaifong_districts::validate(&taxonomy)?;
        }

        let aliases = self
            .aliases
            .unwrap_or_else(|| hong_kong_aliases().clone());

        let index = if self.strict_keys {
            LocationIndex::build_strict(&taxonomy, &aliases)?
        } else {
            LocationIndex::build(&taxonomy, &aliases)
        };

        debug!(
            records = taxonomy.len(),
            keys = index.len(),
            strict = self.strict_keys,
            "location resolver built"
        );
        Ok(LocationResolver { taxonomy, index })
    }
}
