//! Autocomplete-style ranked search
//!
//! This example simulates a user typing into a location box, running the
//! ranked relevance search on each keystroke, and also shows the cascading
//! selector projections.

use kaifong::{LocationResolver, SearchConfigBuilder};

fn main() {
    let resolver = LocationResolver::new_embedded();

    // Each keystroke re-runs the search with a short suggestion list.
    let config = SearchConfigBuilder::autocomplete().build();
    for partial in ["m", "mo", "mon", "mong"] {
        let suggestions = resolver.search_locations_with_config(partial, &config);
        println!("'{partial}':");
        for candidate in &suggestions {
            println!(
                "  {} ({}, {}) [{} {:.2}]",
                candidate.display, candidate.district, candidate.region, candidate.tier, candidate.score
            );
        }
    }

    // Cascading selectors: region -> district -> area.
    println!("\nRegions: {:?}", resolver.regions());
    for district in resolver.districts_in_region("Kowloon") {
        let areas = resolver.areas_in_district("Kowloon", district);
        println!("  {district}: {areas:?}");
    }
}
