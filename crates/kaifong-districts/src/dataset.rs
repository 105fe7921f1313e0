//! The embedded Hong Kong taxonomy.
//!
//! Three regions, the eighteen districts, and the sub-areas the curation
//! team has signed off on. Districts whose everyday name covers the whole
//! district (e.g. Tuen Mun) carry no sub-areas and are represented by a
//! single district-level row. The table is expanded once into
//! [`LocationRecord`]s on first access and shared for the process lifetime.

use once_cell::sync::Lazy;

use crate::LocationRecord;

/// (region, district, curated sub-areas). An empty area list produces one
/// district-level record instead of one record per area.
type DistrictRow = (&'static str, &'static str, &'static [&'static str]);

#[rustfmt::skip]
const HONG_KONG_TABLE: &[DistrictRow] = &[
    // Hong Kong Island
    ("Hong Kong Island", "Central and Western", &[
        "Central", "Admiralty", "Sheung Wan", "Sai Ying Pun", "Kennedy Town", "Mid Levels",
    ]),
    ("Hong Kong Island", "Wan Chai", &["Causeway Bay", "Happy Valley", "Tai Hang"]),
    ("Hong Kong Island", "Eastern", &[
        "Tin Hau", "North Point", "Quarry Bay", "Sai Wan Ho", "Shau Kei Wan", "Chai Wan",
    ]),
    ("Hong Kong Island", "Southern", &[
        "Aberdeen", "Ap Lei Chau", "Pok Fu Lam", "Repulse Bay", "Stanley", "Wong Chuk Hang",
    ]),
    // Kowloon
    ("Kowloon", "Yau Tsim Mong", &[
        "Tsim Sha Tsui", "Jordan", "Yau Ma Tei", "Mong Kok", "Prince Edward", "Tai Kok Tsui",
    ]),
    ("Kowloon", "Sham Shui Po", &["Cheung Sha Wan", "Lai Chi Kok", "Mei Foo", "Shek Kip Mei"]),
    ("Kowloon", "Kowloon City", &[
        "Hung Hom", "To Kwa Wan", "Ho Man Tin", "Kowloon Tong", "Kai Tak",
    ]),
    ("Kowloon", "Wong Tai Sin", &["Diamond Hill", "Lok Fu", "San Po Kong", "Ngau Chi Wan"]),
    ("Kowloon", "Kwun Tong", &["Ngau Tau Kok", "Kowloon Bay", "Lam Tin", "Yau Tong"]),
    // New Territories
    ("New Territories", "Kwai Tsing", &["Kwai Chung", "Kwai Fong", "Tsing Yi"]),
    ("New Territories", "Tsuen Wan", &["Sham Tseng", "Ma Wan"]),
    ("New Territories", "Tuen Mun", &[]),
    ("New Territories", "Yuen Long", &["Tin Shui Wai", "Kam Tin", "Hung Shui Kiu"]),
    ("New Territories", "North", &["Fanling", "Sheung Shui", "Sha Tau Kok"]),
    ("New Territories", "Tai Po", &["Tai Po Market", "Tai Mei Tuk"]),
    ("New Territories", "Sha Tin", &["Tai Wai", "Fo Tan", "Ma On Shan", "Wu Kai Sha"]),
    ("New Territories", "Sai Kung", &["Tseung Kwan O", "Hang Hau", "Clear Water Bay"]),
    ("New Territories", "Islands", &[
        "Tung Chung", "Discovery Bay", "Mui Wo", "Cheung Chau", "Peng Chau", "Lamma Island",
    ]),
];

static HONG_KONG: Lazy<Vec<LocationRecord>> = Lazy::new(|| {
    let mut records = Vec::new();
    for &(region, district, areas) in HONG_KONG_TABLE {
        if areas.is_empty() {
            records.push(LocationRecord::new(region, district));
        } else {
            for &area in areas {
                records.push(LocationRecord::with_area(region, district, area));
            }
        }
    }
    records
});

/// The embedded Hong Kong taxonomy, built once per process.
#[must_use]
pub fn hong_kong() -> &'static [LocationRecord] {
    &HONG_KONG
}
