//! Year extraction from free-text dates.

use once_cell::sync::Lazy;
use regex::Regex;

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]{4}").expect("valid year pattern"));

/// First 4-digit run in `text`, e.g. `"c. 1503"` → `"1503"`.
pub fn first_year(text: &str) -> Option<&str> {
    YEAR_RE.find(text).map(|m| m.as_str())
}

/// Every 4-digit run in `text`, in order.
pub fn all_years(text: &str) -> Vec<&str> {
    YEAR_RE.find_iter(text).map(|m| m.as_str()).collect()
}
