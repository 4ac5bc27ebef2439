//! Static region directory.
//!
//! Full region name -> two-letter code, plus the territories that are removed
//! from the dataset before any other stage sees it.

/// Sorted by name so lookups can binary-search.
const REGION_CODES: [(&str, &str); 50] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
];

/// Non-primary territories, dropped unconditionally during enrichment.
pub const EXCLUDED_TERRITORIES: [&str; 5] = [
    "District of Columbia",
    "Puerto Rico",
    "Virgin Islands",
    "Guam",
    "Northern Mariana Islands",
];

/// Look up the short code for a full region name (exact match).
pub fn region_code(name: &str) -> Option<&'static str> {
    REGION_CODES
        .binary_search_by(|(n, _)| (*n).cmp(name))
        .ok()
        .map(|idx| REGION_CODES[idx].1)
}

pub fn is_excluded_territory(name: &str) -> bool {
    EXCLUDED_TERRITORIES.contains(&name)
}
