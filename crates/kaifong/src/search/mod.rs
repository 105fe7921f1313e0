//! Ranked relevance search over the taxonomy.
//!
//! Powers autocomplete: every keystroke runs a fresh scan of the taxonomy
//! and returns a scored, deduplicated, capped candidate list. Matching is
//! tiered — a name that starts with the query outranks a name that merely
//! contains it, which outranks a name that contains every query word
//! somewhere — and within a tier finer granularities score higher.

use std::fmt;

use ahash::AHashSet;
use tracing::debug;

use kaifong_districts::LocationRecord;

use crate::{config::SearchConfig, index::Granularity, normalize::normalize};

/// How a candidate's name matched the query, best tier first.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MatchTier {
    /// The normalized name starts with the normalized query
    Prefix,
    /// The normalized name contains the normalized query
    Substring,
    /// The normalized name contains every word of the query somewhere
    AllWords,
}

impl MatchTier {
    /// The score matrix: match tier crossed with name granularity.
    #[must_use]
    pub fn score(self, granularity: Granularity) -> f64 {
        match (self, granularity) {
            (Self::Prefix, Granularity::Area) => 1.00,
            (Self::Prefix, Granularity::District) => 0.95,
            (Self::Prefix, Granularity::Region) => 0.90,
            (Self::Substring, Granularity::Area) => 0.65,
            (Self::Substring, Granularity::District) => 0.60,
            (Self::Substring, Granularity::Region) => 0.55,
            (Self::AllWords, Granularity::Area) => 0.45,
            (Self::AllWords, Granularity::District) => 0.40,
            (Self::AllWords, Granularity::Region) => 0.35,
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Prefix => "prefix",
            Self::Substring => "substring",
            Self::AllWords => "all-words",
        };
        f.write_str(label)
    }
}

/// One ranked suggestion produced by the relevance search.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCandidate {
    /// Region copied from the matched record
    pub region: String,
    /// District copied from the matched record
    pub district: String,
    /// Sub-area copied from the matched record, if present
    pub area: Option<String>,
    /// User-facing name for the record: its area if present, else its district
    pub display: String,
    /// Which name level of the record matched
    pub granularity: Granularity,
    /// Which tier the matching name hit
    pub tier: MatchTier,
    /// Relevance score from the tier/granularity matrix
    pub score: f64,
}

impl SearchCandidate {
    /// The suggested location as a (region, district, area) tuple.
    #[must_use]
    pub fn location(&self) -> (&str, &str, Option<&str>) {
        (&self.region, &self.district, self.area.as_deref())
    }
}

impl fmt::Display for SearchCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} {} {:.2})",
            self.display, self.region, self.granularity, self.tier, self.score
        )
    }
}

/// Classify how `name` matches the query, if it does at all.
fn classify(name: &str, query: &str, words: &[&str]) -> Option<MatchTier> {
    if name.starts_with(query) {
        Some(MatchTier::Prefix)
    } else if name.contains(query) {
        Some(MatchTier::Substring)
    } else if words.iter().all(|word| name.contains(word)) {
        Some(MatchTier::AllWords)
    } else {
        None
    }
}

/// Scan the taxonomy and return ranked, deduplicated suggestions.
///
/// Each record contributes at most one candidate: its present names are
/// tried most specific first and the scan stops at the first name level
/// that matches. Candidates are sorted by descending score (stable, so
/// taxonomy order breaks ties) and capped at `config.limit`.
pub fn search_locations_inner(
    taxonomy: &[LocationRecord],
    query: &str,
    config: &SearchConfig,
) -> Vec<SearchCandidate> {
    let normalized_query = normalize(query);
    if normalized_query.is_empty() {
        debug!("blank query, returning no suggestions");
        return Vec::new();
    }
    let words: Vec<&str> = normalized_query.split_whitespace().collect();

    let mut seen = AHashSet::new();
    let mut candidates = Vec::new();

    for record in taxonomy {
        let levels = [
            record.area.as_deref().map(|area| (area, Granularity::Area)),
            Some((record.district.as_str(), Granularity::District)),
            Some((record.region.as_str(), Granularity::Region)),
        ];

        for (name, granularity) in levels.into_iter().flatten() {
            let Some(tier) = classify(&normalize(name), &normalized_query, &words) else {
                continue;
            };
            // One candidate per record: the first matching name level wins
            // and duplicate (region, district, area) identities are dropped.
            if seen.insert(record.composite_key()) {
                candidates.push(SearchCandidate {
                    region: record.region.clone(),
                    district: record.district.clone(),
                    area: record.area.clone(),
                    display: record.display_name().to_string(),
                    granularity,
                    tier,
                    score: tier.score(granularity),
                });
            }
            break;
        }
    }

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    candidates.truncate(config.limit);

    debug!(
        query = %normalized_query,
        suggestions = candidates.len(),
        "relevance search complete"
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_taxonomy() -> Vec<LocationRecord> {
        vec![
            LocationRecord::with_area("Hong Kong Island", "Wan Chai", "Causeway Bay"),
            LocationRecord::with_area("Kowloon", "Yau Tsim Mong", "Mong Kok"),
            LocationRecord::new("Kowloon", "Yau Tsim Mong"),
            LocationRecord::with_area("Kowloon", "Yau Tsim Mong", "Tsim Sha Tsui"),
            LocationRecord::new("New Territories", "Tuen Mun"),
        ]
    }

    fn search(query: &str) -> Vec<SearchCandidate> {
        search_locations_inner(&fixture_taxonomy(), query, &SearchConfig::default())
    }

    #[test]
    fn test_blank_queries_return_nothing() {
        assert!(search("").is_empty());
        assert!(search(" ").is_empty());
        assert!(search("\t  \n").is_empty());
        assert!(search("?!").is_empty());
    }

    #[test]
    fn test_prefix_outranks_substring() {
        let results = search("mong");

        // "Mong Kok" starts with the query; "Yau Tsim Mong" merely contains it.
        assert!(results.len() >= 2);
        assert_eq!(results[0].area.as_deref(), Some("Mong Kok"));
        assert_eq!(results[0].tier, MatchTier::Prefix);
        assert!((results[0].score - 1.00).abs() < f64::EPSILON);

        let ytm = results
            .iter()
            .find(|c| c.area.is_none() && c.district == "Yau Tsim Mong")
            .expect("district-only row should match by substring");
        assert_eq!(ytm.tier, MatchTier::Substring);
        assert!((ytm.score - 0.60).abs() < f64::EPSILON);
        assert!(results[0].score > ytm.score);
    }

    #[test]
    fn test_all_words_tier_matches_out_of_order_words() {
        let results = search("kok mong");

        let mk = results
            .iter()
            .find(|c| c.area.as_deref() == Some("Mong Kok"))
            .expect("every word appears in 'mong kok'");
        assert_eq!(mk.tier, MatchTier::AllWords);
        assert!((mk.score - 0.45).abs() < f64::EPSILON);
    }

    #[test]
    fn test_score_matrix_per_granularity() {
        // Area prefix
        let results = search("causeway");
        assert!((results[0].score - 1.00).abs() < f64::EPSILON);

        // District prefix (record has no area)
        let results = search("tuen");
        assert_eq!(results[0].granularity, Granularity::District);
        assert!((results[0].score - 0.95).abs() < f64::EPSILON);

        // Region prefix
        let results = search("kow");
        assert_eq!(results[0].granularity, Granularity::Region);
        assert!((results[0].score - 0.90).abs() < f64::EPSILON);
    }

    #[test]
    fn test_one_candidate_per_record() {
        // "tsim" matches both the area "Tsim Sha Tsui" and the district
        // "Yau Tsim Mong" of the same record; only the area-level match is
        // emitted for that record.
        let results = search("tsim");

        let tst: Vec<_> = results
            .iter()
            .filter(|c| c.area.as_deref() == Some("Tsim Sha Tsui"))
            .collect();
        assert_eq!(tst.len(), 1);
        assert_eq!(tst[0].tier, MatchTier::Prefix);
        assert_eq!(tst[0].granularity, Granularity::Area);
    }

    #[test]
    fn test_no_duplicate_locations() {
        for query in ["mong", "kowloon", "tsim", "wan"] {
            let results = search(query);
            let mut keys: Vec<_> = results
                .iter()
                .map(|c| (c.region.clone(), c.district.clone(), c.area.clone()))
                .collect();
            keys.sort();
            let before = keys.len();
            keys.dedup();
            assert_eq!(keys.len(), before, "duplicate location for query {query:?}");
        }
    }

    #[test]
    fn test_limit_is_respected() {
        let config = SearchConfig { limit: 2 };
        let results = search_locations_inner(&fixture_taxonomy(), "kowloon", &config);
        assert!(results.len() <= 2);

        let config = SearchConfig { limit: 0 };
        let results = search_locations_inner(&fixture_taxonomy(), "kowloon", &config);
        assert!(results.is_empty());
    }

    #[test]
    fn test_ties_keep_taxonomy_order() {
        // Both Kowloon records with areas match "kowloon" at the region
        // level with the same score; insertion order must be preserved.
        let results = search("kowloon");
        let region_matches: Vec<_> = results
            .iter()
            .filter(|c| c.granularity == Granularity::Region)
            .collect();
        assert!(region_matches.len() >= 2);
        let positions: Vec<_> = region_matches
            .iter()
            .map(|c| {
                fixture_taxonomy()
                    .iter()
                    .position(|r| r.composite_key() == format!(
                        "{}|{}|{}",
                        c.region,
                        c.district,
                        c.area.as_deref().unwrap_or_default()
                    ))
                    .unwrap()
            })
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted, "tied scores should keep taxonomy order");
    }

    #[test]
    fn test_query_normalization_applies() {
        let plain = search("mong kok");
        let noisy = search("  MONG   KOK!! ");
        assert_eq!(plain, noisy);
    }
}
