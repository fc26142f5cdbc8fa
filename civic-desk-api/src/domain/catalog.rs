//! Static complaint taxonomy.
//!
//! Categories with their sub-categories and cities with their areas. The
//! tables are closed: intake validation rejects anything not listed here.

pub const COMPLAINT_CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Infrastructure",
        &[
            "Street light issue",
            "Potholes / Road damage",
            "Broken footpath",
            "Bridge damage",
            "Fallen tree",
        ],
    ),
    (
        "Water",
        &[
            "Water leakage",
            "No water supply",
            "Low pressure",
            "Drainage issue",
            "Contamination",
        ],
    ),
    (
        "Waste Management",
        &["Garbage not collected", "Overflowing bins", "Illegal dumping"],
    ),
    (
        "Electricity",
        &["Power outage", "Transformer issue", "Wire damage"],
    ),
    (
        "Public Safety",
        &["Open manhole", "Illegal parking", "CCTV not working"],
    ),
    ("Environment", &["Tree cutting", "Pollution issue"]),
    (
        "Public Services",
        &["Tax issue", "Government service delay"],
    ),
];

pub const CITIES: &[(&str, &[&str])] = &[
    (
        "Mumbai",
        &[
            "Andheri", "Bandra", "Colaba", "Dadar", "Goregaon", "Juhu", "Kandivali", "Malad",
        ],
    ),
    (
        "Delhi",
        &[
            "Connaught Place",
            "Dwarka",
            "Karol Bagh",
            "Lajpat Nagar",
            "Rohini",
            "Saket",
        ],
    ),
    (
        "Bangalore",
        &[
            "Indiranagar",
            "Koramangala",
            "Whitefield",
            "Electronic City",
            "Jayanagar",
            "HSR Layout",
        ],
    ),
    (
        "Chennai",
        &["Adyar", "Anna Nagar", "T. Nagar", "Velachery", "Mylapore", "Guindy"],
    ),
    (
        "Hyderabad",
        &[
            "Banjara Hills",
            "Gachibowli",
            "HITEC City",
            "Jubilee Hills",
            "Madhapur",
        ],
    ),
];

/// Category names in declaration order
pub fn categories() -> impl Iterator<Item = &'static str> {
    COMPLAINT_CATEGORIES.iter().map(|(name, _)| *name)
}

/// Sub-categories allowed for `category`; empty for an unknown category
pub fn sub_categories(category: &str) -> &'static [&'static str] {
    lookup(COMPLAINT_CATEGORIES, category)
}

pub fn is_valid_sub_category(category: &str, sub_category: &str) -> bool {
    sub_categories(category).contains(&sub_category)
}

pub fn cities() -> impl Iterator<Item = &'static str> {
    CITIES.iter().map(|(name, _)| *name)
}

/// Areas of `city`; empty for an unknown city
pub fn areas(city: &str) -> &'static [&'static str] {
    lookup(CITIES, city)
}

pub fn is_valid_area(city: &str, area: &str) -> bool {
    areas(city).contains(&area)
}

fn lookup(
    table: &'static [(&'static str, &'static [&'static str])],
    key: &str,
) -> &'static [&'static str] {
    table
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, values)| *values)
        .unwrap_or(&[])
}
