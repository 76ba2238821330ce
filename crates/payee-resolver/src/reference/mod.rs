//! Static reference data shared by every resolution stage.
//!
//! All tables are ordered slices. The known-payee scan and the fuzzy scan both
//! break ties by position, so entries must never be moved into a hash map.

/// Known merchant keys (lowercase) and their canonical display names.
pub const KNOWN_PAYEES: [(&str, &str); 13] = [
    ("7-eleven", "7-Eleven"),
    ("peet", "Peet's Coffee"),
    ("starbucks", "Starbucks"),
    ("mcdonald", "McDonald's"),
    ("chevron", "Chevron"),
    ("76", "76 Gas Station"),
    ("shell", "Shell"),
    ("safeway", "Safeway"),
    ("amazon", "Amazon"),
    ("texaco", "Texaco"),
    ("costco", "Costco"),
    ("whole foods", "Whole Foods Market"),
    ("trader joe", "Trader Joe's"),
];

/// Statement abbreviations expanded during normalization.
pub const ABBREVIATIONS: [(&str, &str); 7] = [
    ("COF", "COFFEE"),
    ("MKT", "MARKET"),
    ("MKTP", "MARKETPLACE"),
    ("SQ", "SQUARE"),
    ("CTR", "CENTER"),
    ("ST", "STREET"),
    ("CO", "COMPANY"),
];

pub const US_STATE_CODES: [&str; 50] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY",
];

pub const COUNTRY_CODES: [&str; 4] = ["US", "SG", "UK", "CA"];

/// Bundled historical payee strings used to fit the cluster model when no
/// corpus override is configured.
pub const TRAINING_CORPUS: [&str; 9] = [
    "LAKE CITY SEATTLE WA",
    "LAKE CITY 2304",
    "LAKE CITY WAY STORE",
    "AMAZN Mktp US*MM3ABCD",
    "Amazon Marketplace AMZN.COM/BILL WA",
    "AMAZON MKT 12345",
    "UBER TRIP 29384",
    "UBER *TRIP HELP.UBER.COM",
    "UBER EATS 21390",
];

pub fn is_location_code(token: &str) -> bool {
    US_STATE_CODES.contains(&token) || COUNTRY_CODES.contains(&token)
}

pub fn expand_abbreviation(token: &str) -> Option<&'static str> {
    ABBREVIATIONS
        .iter()
        .find(|(abbreviation, _)| *abbreviation == token)
        .map(|(_, expansion)| *expansion)
}

pub fn bundled_corpus() -> Vec<String> {
    TRAINING_CORPUS
        .iter()
        .map(|value| value.to_string())
        .collect()
}
