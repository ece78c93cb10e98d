//! Bidirectional region table: 50 US states plus the District of Columbia.
//! Process-wide, read-only after initialization.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// `(code, display name)` pairs, sorted by display name.
pub const ALL_REGIONS: [(&str, &str); 51] = [
    ("AK", "Alaska"),
    ("AL", "Alabama"),
    ("AZ", "Arizona"),
    ("AR", "Arkansas"),
    ("CA", "California"),
    ("CO", "Colorado"),
    ("CT", "Connecticut"),
    ("DE", "Delaware"),
    ("DC", "District of Columbia"),
    ("FL", "Florida"),
    ("GA", "Georgia"),
    ("HI", "Hawaii"),
    ("ID", "Idaho"),
    ("IL", "Illinois"),
    ("IN", "Indiana"),
    ("IA", "Iowa"),
    ("KS", "Kansas"),
    ("KY", "Kentucky"),
    ("LA", "Louisiana"),
    ("ME", "Maine"),
    ("MD", "Maryland"),
    ("MA", "Massachusetts"),
    ("MI", "Michigan"),
    ("MN", "Minnesota"),
    ("MS", "Mississippi"),
    ("MO", "Missouri"),
    ("MT", "Montana"),
    ("NE", "Nebraska"),
    ("NV", "Nevada"),
    ("NH", "New Hampshire"),
    ("NJ", "New Jersey"),
    ("NM", "New Mexico"),
    ("NY", "New York"),
    ("NC", "North Carolina"),
    ("ND", "North Dakota"),
    ("OH", "Ohio"),
    ("OK", "Oklahoma"),
    ("OR", "Oregon"),
    ("PA", "Pennsylvania"),
    ("RI", "Rhode Island"),
    ("SC", "South Carolina"),
    ("SD", "South Dakota"),
    ("TN", "Tennessee"),
    ("TX", "Texas"),
    ("UT", "Utah"),
    ("VT", "Vermont"),
    ("VA", "Virginia"),
    ("WA", "Washington"),
    ("WV", "West Virginia"),
    ("WI", "Wisconsin"),
    ("WY", "Wyoming"),
];

static NAME_TO_CODE: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ALL_REGIONS.iter().map(|(code, name)| (*name, *code)).collect());

static CODE_TO_NAME: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ALL_REGIONS.iter().copied().collect());

/// Look up the two-letter code for a display name, e.g. `California` -> `CA`.
pub fn code_for_name(name: &str) -> Option<&'static str> {
    NAME_TO_CODE.get(name).copied()
}

/// Look up the display name for a two-letter code, e.g. `CA` -> `California`.
pub fn name_for_code(code: &str) -> Option<&'static str> {
    CODE_TO_NAME.get(code).copied()
}

/// All display names, in catalog order.
pub fn region_names() -> impl Iterator<Item = &'static str> {
    ALL_REGIONS.iter().map(|(_, name)| *name)
}
