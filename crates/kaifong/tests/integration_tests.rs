//! Integration tests for kaifong location resolution
//!
//! These tests run against the full public API and verify that matching,
//! ranked search, and the taxonomy projections behave correctly over both
//! the embedded dataset and small fixture taxonomies.

use kaifong::{
    AliasTable, Granularity, LocationRecord, LocationResolver, MatchTier, SearchConfigBuilder,
    hong_kong, normalize,
};

fn setup_test_env() {
    let _ = kaifong::init_logging(tracing::Level::WARN);
}

#[test]
fn test_full_workflow() {
    setup_test_env();

    let resolver = LocationResolver::new_embedded();

    // 1. Single best match inside free text
    let matched = resolver
        .match_location("need a locksmith around tsim sha tsui asap")
        .expect("Should match Tsim Sha Tsui");
    assert_eq!(matched.area.as_deref(), Some("Tsim Sha Tsui"));
    assert_eq!(matched.district, "Yau Tsim Mong");
    assert_eq!(matched.region, "Kowloon");

    // 2. Ranked search
    let suggestions = resolver.search_locations("sha");
    assert!(!suggestions.is_empty(), "Should suggest for 'sha'");
    assert!(suggestions.len() <= 10, "Default limit is 10");

    // 3. Search with configuration
    let config = SearchConfigBuilder::autocomplete().limit(3).build();
    let limited = resolver.search_locations_with_config("sha", &config);
    assert!(limited.len() <= 3, "Should respect limit");

    // 4. Projections for cascading selectors
    let regions = resolver.regions();
    assert_eq!(regions.len(), 3, "Three top-level regions");
    let districts = resolver.districts_in_region("Kowloon");
    assert_eq!(districts.len(), 5, "Kowloon has five districts");
    let areas = resolver.areas_in_district("Kowloon", "Yau Tsim Mong");
    assert!(areas.contains(&"Mong Kok"));
}

#[test]
fn test_every_embedded_location_matches_itself() {
    setup_test_env();

    let resolver = LocationResolver::new_embedded();

    for record in hong_kong() {
        let name = record.area.as_deref().unwrap_or(&record.district);
        let matched = resolver
            .match_location(name)
            .unwrap_or_else(|| panic!("'{name}' should match its own record"));
        assert_eq!(
            matched.location(),
            (
                record.region.as_str(),
                record.district.as_str(),
                record.area.as_deref()
            ),
            "'{name}' resolved to the wrong record"
        );
    }
}

#[test]
fn test_granularity_precedence_in_matching() {
    setup_test_env();

    let resolver = LocationResolver::new_embedded();

    // District and region names both present: district wins.
    let matched = resolver.match_location("wan chai hong kong island").unwrap();
    assert_eq!(matched.granularity, Granularity::District);
    assert_eq!(matched.district, "Wan Chai");

    // Area, district, and region names all present: area wins.
    let matched = resolver
        .match_location("mong kok yau tsim mong kowloon")
        .unwrap();
    assert_eq!(matched.granularity, Granularity::Area);
    assert_eq!(matched.area.as_deref(), Some("Mong Kok"));
}

#[test]
fn test_alias_resolution() {
    setup_test_env();

    let resolver = LocationResolver::new_embedded();

    let canonical = resolver.match_location("mong kok").unwrap();
    let alias = resolver.match_location("mk").unwrap();
    assert_eq!(alias.location(), canonical.location());
    assert!(
        alias.confidence < canonical.confidence,
        "Alias confidence should be reduced relative to the canonical name"
    );
    assert!(alias.confidence >= 0.80, "Confidence never drops below 0.80");

    let tst = resolver.match_location("any handyman in tst?").unwrap();
    assert_eq!(tst.area.as_deref(), Some("Tsim Sha Tsui"));
}

#[test]
fn test_intent_routing_scenario() {
    setup_test_env();

    // The taxonomy from the routing scenario: two district-level rows and
    // one alias. "Mong Kok" is a district here, unlike in the embedded
    // dataset where it is an area.
    let taxonomy = vec![
        LocationRecord::new("Hong Kong Island", "Wan Chai"),
        LocationRecord::new("Kowloon", "Mong Kok"),
    ];
    let aliases = AliasTable::from_pairs([("mong kok", ["mk"].as_slice())]);
    let resolver = LocationResolver::from_taxonomy(taxonomy, &aliases);

    let matched = resolver
        .match_location("looking for a plumber near mk")
        .expect("Should route via the alias");
    assert_eq!(matched.region, "Kowloon");
    assert_eq!(matched.district, "Mong Kok");
    assert!(matched.area.is_none());
    assert_eq!(matched.granularity, Granularity::District);
}

#[test]
fn test_search_ranking_tiers() {
    setup_test_env();

    let resolver = LocationResolver::new_embedded();

    let results = resolver.search_locations("mong");
    assert!(!results.is_empty());

    // Prefix beats substring: "Mong Kok" starts with the query, the
    // Yau Tsim Mong district rows merely contain it.
    assert_eq!(results[0].area.as_deref(), Some("Mong Kok"));
    assert_eq!(results[0].tier, MatchTier::Prefix);

    let substring = results
        .iter()
        .find(|c| c.tier == MatchTier::Substring)
        .expect("District rows should contribute substring matches");
    assert!(results[0].score > substring.score);

    // Scores never leave the matrix range.
    for candidate in &results {
        assert!(candidate.score >= 0.35 && candidate.score <= 1.0);
    }
}

#[test]
fn test_search_caps_and_dedups() {
    setup_test_env();

    let resolver = LocationResolver::new_embedded();

    // Broad query hits far more than ten records.
    let results = resolver.search_locations("a");
    assert_eq!(results.len(), 10, "Default limit is 10");

    let mut locations: Vec<_> = results
        .iter()
        .map(|c| (c.region.clone(), c.district.clone(), c.area.clone()))
        .collect();
    locations.sort();
    let before = locations.len();
    locations.dedup();
    assert_eq!(locations.len(), before, "No duplicate locations in results");
}

#[test]
fn test_empty_and_garbage_input() {
    setup_test_env();

    let resolver = LocationResolver::new_embedded();
    let long_string = "z".repeat(1000);
    let cases = ["", "   ", "?!,.", "XYZ123NONEXISTENT", long_string.as_str()];

    for case in cases {
        assert!(
            resolver.match_location(case).is_none(),
            "match_location({case:?}) should be None"
        );
        assert!(
            resolver.search_locations(case).is_empty(),
            "search_locations({case:?}) should be empty"
        );
    }
}

#[test]
fn test_normalization_properties() {
    setup_test_env();

    // Idempotence over assorted inputs.
    let samples = [
        "Tsim Sha Tsui!",
        "  WAN   CHAI ",
        "King\u{2019}s Road",
        "Mé Fòo",
        "",
    ];
    for s in samples {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "normalize should be idempotent");
    }

    assert_eq!(normalize("Tsim Sha Tsui!"), normalize("tsim sha tsui"));

    // Matching is insensitive to case, punctuation, and diacritics.
    let resolver = LocationResolver::new_embedded();
    let plain = resolver.match_location("mong kok").unwrap();
    let noisy = resolver.match_location("MONG-KOK!!").unwrap();
    assert_eq!(plain.location(), noisy.location());
}

#[test]
fn test_concurrent_access() {
    setup_test_env();

    use std::sync::Arc;
    use std::thread;

    let resolver = Arc::new(LocationResolver::new_embedded());
    let handles: Vec<_> = (0..3)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            thread::spawn(move || {
                let query = match i {
                    0 => "mong kok",
                    1 => "causeway bay",
                    _ => "sha tin",
                };
                let matched = resolver.match_location(query);
                assert!(matched.is_some(), "Concurrent match {i} should succeed");
                resolver.search_locations(query)
            })
        })
        .collect();

    for handle in handles {
        let results = handle.join().expect("Thread should not panic");
        assert!(!results.is_empty(), "Concurrent search should find results");
    }
}

#[test]
fn test_shared_resolver() {
    setup_test_env();

    let matched = LocationResolver::shared().match_location("tuen mun");
    assert!(matched.is_some(), "Shared resolver should serve queries");
    let matched = matched.unwrap();
    assert_eq!(matched.district, "Tuen Mun");
    assert_eq!(matched.region, "New Territories");
}

#[test]
fn test_projection_contents() {
    setup_test_env();

    let resolver = LocationResolver::new_embedded();

    let regions = resolver.regions();
    assert!(regions.contains(&"Hong Kong Island"));
    assert!(regions.contains(&"Kowloon"));
    assert!(regions.contains(&"New Territories"));

    let hki = resolver.districts_in_region("Hong Kong Island");
    assert_eq!(
        hki,
        vec!["Central and Western", "Wan Chai", "Eastern", "Southern"]
    );

    // Unknown keys project to empty lists, not errors.
    assert!(resolver.districts_in_region("Macau").is_empty());
    assert!(resolver.areas_in_district("Kowloon", "Nowhere").is_empty());

    // A district with no curated areas yields an empty list.
    assert!(
        resolver
            .areas_in_district("New Territories", "Tuen Mun")
            .is_empty()
    );
}
