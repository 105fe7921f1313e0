//! Basic location matching functionality
//!
//! This example demonstrates the fundamental resolution operations:
//! - Creating a resolver instance using the embedded taxonomy
//! - Resolving free-form phrases to a single best match
//! - Working with match confidence and granularity

use kaifong::LocationResolver;

fn main() {
    let resolver = LocationResolver::new_embedded();

    let phrases = [
        "looking for a plumber near mong kok",
        "flat viewing in Causeway Bay this weekend",
        "anyone know a good electrician in TST?",
        "wan chai hong kong island",
        "no location in this sentence",
    ];

    for phrase in phrases {
        println!("Query: {phrase:?}");
        match resolver.match_location(phrase) {
            Some(matched) => {
                println!(
                    "  -> {} [{}] region={} district={} confidence={:.2}",
                    matched.display,
                    matched.granularity,
                    matched.region,
                    matched.district,
                    matched.confidence
                );
            }
            None => println!("  -> no match"),
        }
    }
}
