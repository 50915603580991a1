//! Income Tax Department payment receipt parsing.
//!
//! Every line is scanned once, top to bottom, against an ordered list of
//! label predicates; the first matching predicate per line extracts the
//! value, and a later line matching the same field overwrites the earlier
//! one. Fields never matched stay [`CellValue::Missing`].

use tracing::debug;

use crate::models::{CellValue, FieldRecord};

/// Field names of the Income Tax receipt profile, in output order.
pub const INCOME_TAX_FIELDS: [&str; 8] = [
    "Nature of Payment",
    "Amount (in Rs.)",
    "Challan No.",
    "Tender Date",
    "Interest",
    "Penalty",
    "Fee (Sec. 234E)",
    "TOTAL",
];

/// Trailing section label glued onto the tender date line by the decoder.
const TENDER_DATE_TRAILER: &str = "Tax Breakup Details";

/// How a predicate matches its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Match {
    /// Substring containment; value is the text after the last colon.
    Contains(&'static str),
    /// Exact line-start prefix; value is the text after the last `₹`.
    Prefix(&'static str),
}

/// Ordered label predicates. Order matters: the first match per line wins.
const PREDICATES: [(Match, &str); 8] = [
    (Match::Contains("Nature of Payment"), "Nature of Payment"),
    (Match::Contains("Amount (in Rs.)"), "Amount (in Rs.)"),
    (Match::Contains("Challan No"), "Challan No."),
    (Match::Contains("Tender Date"), "Tender Date"),
    (Match::Prefix("DInterest"), "Interest"),
    (Match::Prefix("EPenalty"), "Penalty"),
    (Match::Prefix("FFee under section 234E"), "Fee (Sec. 234E)"),
    (Match::Prefix("Total (A+B+C+D+E+F)"), "TOTAL"),
];

/// Parser for Income Tax Department payment receipts.
pub struct IncomeTaxReceiptParser;

impl IncomeTaxReceiptParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the receipt text into the full eight-field record.
    ///
    /// Never fails: an unrecognizable document simply yields a record of
    /// missing fields, which the caller can treat as it sees fit.
    pub fn parse(&self, text: &str) -> FieldRecord {
        // Full field set up front so unmatched fields stay Missing rather
        // than silently absent.
        let mut record: FieldRecord = INCOME_TAX_FIELDS
            .iter()
            .map(|f| (f.to_string(), CellValue::Missing))
            .collect();

        let mut matched_lines = 0usize;
        for line in text.lines() {
            let Some(&(predicate, field)) = PREDICATES
                .iter()
                .find(|(m, _)| self.matches(line, *m))
            else {
                continue;
            };

            let value = self.value_of(line, predicate, field);
            record.insert(field, value);
            matched_lines += 1;
        }

        debug!(matched_lines, "scanned income tax receipt");
        record
    }

    fn matches(&self, line: &str, m: Match) -> bool {
        match m {
            Match::Contains(label) => line.contains(label),
            Match::Prefix(prefix) => line.starts_with(prefix),
        }
    }

    fn value_of(&self, line: &str, m: Match, field: &str) -> CellValue {
        let raw = match m {
            Match::Contains(_) => line.rsplit(':').next().unwrap_or(""),
            Match::Prefix(_) => line.rsplit('₹').next().unwrap_or(""),
        };

        // The decoder runs the tender date line into the next section
        // header, so cut it off there.
        let raw = if field == "Tender Date" {
            raw.split(TENDER_DATE_TRAILER).next().unwrap_or(raw)
        } else {
            raw
        };

        CellValue::text(raw.trim())
    }
}

impl Default for IncomeTaxReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}
