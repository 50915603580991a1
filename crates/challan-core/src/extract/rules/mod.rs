//! Shared parsing rules: regex patterns, amount parsing, date validation.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{normalize_cell, normalize_money_cell, parse_amount, parse_money};
pub use dates::{is_suspect_date, parse_challan_date};
