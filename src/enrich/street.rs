use std::sync::LazyLock;

use regex::Regex;

/// A house number, possibly with a unit suffix, at the start of an address.
pub const HOUSE_NUMBER_PATTERN: &str = r"^\d+[A-Za-z-]*\s+";

static HOUSE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(HOUSE_NUMBER_PATTERN).expect("house number pattern is valid"));

/// Reduces a place label to the street it names.
///
/// Takes the first comma-separated segment and strips a leading house
/// number. If only the number was there, the segment is kept as is.
///
/// ```rust
/// use roadmend::enrich::extract_street_name;
///
/// assert_eq!(extract_street_name(Some("9 Abudu Oladejo St, Lagos, Nigeria")), "Abudu Oladejo St");
/// assert_eq!(extract_street_name(Some("13b Peace Cl, Ikeja")), "Peace Cl");
/// assert_eq!(extract_street_name(None), "");
/// ```
pub fn extract_street_name(label: Option<&str>) -> String {
    let Some(first) = label.and_then(|label| label.split(',').next()) else {
        return String::new();
    };

    let first = first.trim();
    let stripped = HOUSE_NUMBER.replace(first, "");

    match stripped.trim() {
        "" => first.to_string(),
        street => street.to_string(),
    }
}
