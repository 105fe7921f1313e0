//! kaifong - Location Resolution for Free-Form Text
//!
//! kaifong converts user-typed location text into structured references
//! into a fixed three-level geographic taxonomy (region → district → area).
//! It powers two call sites in the surrounding marketplace: intent routing,
//! which needs the single best match inside a free-text phrase, and
//! autocomplete, which needs a ranked candidate list per keystroke.
//!
//! # Quick Start
//!
//! ```rust
//! use kaifong::LocationResolver;
//!
//! // Resolver over the embedded Hong Kong taxonomy
//! let resolver = LocationResolver::new_embedded();
//!
//! // Single best match for routing
//! if let Some(matched) = resolver.match_location("looking for a plumber near mong kok") {
//!     println!("route to {} ({})", matched.display, matched.region);
//! }
//!
//! // Ranked suggestions for autocomplete
//! for candidate in resolver.search_locations("tsim") {
//!     println!("{}  {:.2}", candidate.display, candidate.score);
//! }
//!
//! // Cascading selector data
//! let regions = resolver.regions();
//! let districts = resolver.districts_in_region("Kowloon");
//! # assert!(!regions.is_empty());
//! # assert!(!districts.is_empty());
//! ```
//!
//! # Features
//!
//! - **Tolerant matching**: queries are normalized (case, diacritics,
//!   punctuation, spacing) before any comparison
//! - **Alias expansion**: curated informal synonyms ("tst", "mk") resolve
//!   to their canonical locations at slightly reduced confidence
//! - **Tiered ranking**: prefix matches outrank substring matches outrank
//!   all-words matches, with finer granularities scoring higher
//! - **No failure modes**: malformed input yields `None` or an empty list,
//!   never an error
//!
//! # Data
//!
//! kaifong ships with an embedded curated Hong Kong taxonomy (the three
//! regions, the eighteen districts, and the commonly searched sub-areas)
//! supplied by the `kaifong-districts` subcrate. Hosts with their own
//! curated data can build a resolver from any taxonomy via
//! [`LocationResolver::builder`].

use once_cell::sync::OnceCell;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod config;
mod core;
pub mod error;
mod index;
mod normalize;
mod search;

pub use kaifong_districts as districts;
pub use kaifong_districts::{AliasTable, LocationRecord, hong_kong, hong_kong_aliases};

pub use crate::core::{LocationResolver, LocationResolverBuilder};
pub use config::{SearchConfig, SearchConfigBuilder};
pub use index::{Granularity, IndexEntry, IndexError, LocationIndex};
pub use normalize::normalize;
pub use search::{MatchTier, SearchCandidate};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();

/// Initialize logging for the kaifong library.
///
/// This sets up structured logging with configurable levels and filtering.
/// Call this once at the start of your application to enable detailed
/// logging output from kaifong operations.
///
/// # Arguments
///
/// * `level` - The minimum log level to display
///
/// # Examples
///
/// ```rust
/// use kaifong::init_logging;
/// use tracing::Level;
///
/// init_logging(Level::INFO)?;
/// # Ok::<(), kaifong::error::KaifongError>(())
/// ```
pub fn init_logging(level: impl Into<LevelFilter>) -> Result<&'static (), error::KaifongError> {
    LOGGER_INIT.get_or_try_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(level.into().to_string()))?;

        tracing_subscriber::fmt::fmt()
            .with_env_filter(filter)
            .with_span_events(FmtSpan::CLOSE)
            .init();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_env() {
        let _ = init_logging(tracing::Level::WARN);
    }

    #[test]
    fn test_resolver_creation() {
        setup_test_env();

        let resolver = LocationResolver::new_embedded();
        assert!(
            !resolver.taxonomy().is_empty(),
            "Embedded taxonomy should not be empty"
        );
        assert!(
            !resolver.index().is_empty(),
            "Index should be built from the embedded taxonomy"
        );
    }

    #[test]
    fn test_basic_match() {
        setup_test_env();

        let resolver = LocationResolver::new_embedded();

        let test_queries = ["Mong Kok", "Causeway Bay", "Sha Tin", "Kowloon"];
        for query in test_queries {
            assert!(
                resolver.match_location(query).is_some(),
                "Should match known location '{query}'"
            );
        }
    }

    #[test]
    fn test_basic_search() {
        setup_test_env();

        let resolver = LocationResolver::new_embedded();
        let results = resolver.search_locations("tsim");
        assert!(!results.is_empty(), "Should suggest for 'tsim'");
        assert!(results.len() <= 10, "Default limit is 10");
    }

    #[test]
    fn test_empty_input() {
        setup_test_env();

        let resolver = LocationResolver::new_embedded();
        assert!(resolver.match_location("").is_none());
        assert!(resolver.search_locations("").is_empty());
        assert!(resolver.search_locations("   ").is_empty());
    }
}
