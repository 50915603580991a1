//! Date token validation for challan documents.
//!
//! Date fields stay strings in the output (locale-independent date parsing
//! is a non-goal); these helpers only validate that a captured token is a
//! plausible dd/mm/yy or dd/mm/yyyy date so the caller can warn otherwise.

use chrono::NaiveDate;

use super::patterns::DATE_TOKEN;

/// Parse a dd/mm/yy or dd/mm/yyyy token into a date, if valid.
pub fn parse_challan_date(s: &str) -> Option<NaiveDate> {
    let caps = DATE_TOKEN.captures(s.trim())?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year = parse_year(&caps[3]);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// True when the token does not validate as a date; used to emit warnings.
pub fn is_suspect_date(s: &str) -> bool {
    parse_challan_date(s).is_none()
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: assume 2000s for 00-50, 1900s for 51-99
        if year <= 50 { 2000 + year } else { 1900 + year }
    } else {
        year
    }
}
