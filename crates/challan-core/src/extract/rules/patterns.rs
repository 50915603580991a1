//! Regex patterns for challan field extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // TDS Returns acknowledgment fields
    pub static ref RETURN_PERIOD: Regex = Regex::new(
        r"period\s+(Q\d)"
    ).unwrap();

    pub static ref RETURN_DATE_RANGE: Regex = Regex::new(
        r"\(From\s+(\d{2}/\d{2}/\d{2})\s+to\s+(\d{2}/\d{2}/\d{2})"
    ).unwrap();

    // Matches both the label box and the filled value; the value is the
    // second occurrence in document order.
    pub static ref RETURN_FORM_NO: Regex = Regex::new(
        r"(?i)Form\s+No\.\s*(\d{2}\w)"
    ).unwrap();

    pub static ref RETURN_ISSUE_DATE: Regex = Regex::new(
        r"Date:\s*(\d{2}/\d{2}/\d{4})"
    ).unwrap();

    // Date tokens (dd/mm/yy or dd/mm/yyyy)
    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"\b(\d{1,2})/(\d{1,2})/(\d{4}|\d{2})\b"
    ).unwrap();

    // A cell or token that is entirely an amount, with optional Indian or
    // western thousands separators (1,23,456.00 / 1,234.56 / 4720)
    pub static ref AMOUNT_CELL: Regex = Regex::new(
        r"^(?:\d+|\d{1,3}(?:,\d{2,3})+)(?:\.\d+)?$"
    ).unwrap();
}
