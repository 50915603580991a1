//! TDS Returns acknowledgment parsing: header fields and line-item table.

use tracing::debug;

use super::rules::dates::is_suspect_date;
use super::rules::{normalize_cell, normalize_money_cell};
use super::rules::patterns::{
    RETURN_DATE_RANGE, RETURN_FORM_NO, RETURN_ISSUE_DATE, RETURN_PERIOD,
};
use crate::models::{CellValue, FieldRecord, RawDocument};

/// Header field names for the TDS Returns profile, in output order.
pub const RETURN_FIELDS: [&str; 4] = ["Period", "Date Range", "Form No.", "Date"];

/// Six-column schema of the embedded statement table.
pub const RETURN_COLUMNS: [&str; 6] = [
    "Sr. No.",
    "Return Type",
    "No. of Deductee / Party Records",
    "Amount Paid (₹)",
    "Tax Deducted / Collected (₹)",
    "Tax Deposited (₹)",
];

/// Extracts the four header fields of a return acknowledgment from the
/// full document text.
///
/// Each pattern is matched independently; a pattern with no match yields
/// [`CellValue::Missing`], never an error. The output always carries
/// exactly the four [`RETURN_FIELDS`] keys.
pub struct ReturnFieldExtractor;

impl ReturnFieldExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str, warnings: &mut Vec<String>) -> FieldRecord {
        let mut record = FieldRecord::new();

        let period = RETURN_PERIOD
            .captures(text)
            .map(|caps| CellValue::text(&caps[1]))
            .unwrap_or(CellValue::Missing);
        record.insert("Period", period);

        let date_range = RETURN_DATE_RANGE
            .captures(text)
            .map(|caps| CellValue::text(format!("{} to {}", &caps[1], &caps[2])))
            .unwrap_or(CellValue::Missing);
        record.insert("Date Range", date_range);

        record.insert("Form No.", self.extract_form_no(text));

        let date = match RETURN_ISSUE_DATE.captures(text) {
            Some(caps) => {
                let token = &caps[1];
                if is_suspect_date(token) {
                    warnings.push(format!("issue date '{token}' does not validate as a date"));
                }
                CellValue::text(token)
            }
            None => CellValue::Missing,
        };
        record.insert("Date", date);

        record
    }

    /// The form number appears once as a label box and once as the filled
    /// value, so only the second match in document order is the value.
    /// Fewer than two matches means the value cannot be disambiguated.
    fn extract_form_no(&self, text: &str) -> CellValue {
        let mut matches = RETURN_FORM_NO.captures_iter(text);
        let _label = matches.next();
        match matches.next() {
            Some(caps) => CellValue::text(&caps[1]),
            None => CellValue::Missing,
        }
    }
}

impl Default for ReturnFieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Reconciles the raw table matrices of a return acknowledgment into
/// line-item rows over the [`RETURN_COLUMNS`] schema.
///
/// Malformed rows (cell count other than six) are dropped silently; a
/// repeated table header from a page break is removed once, from the first
/// surviving row only; rows empty across all six columns are dropped.
/// Zero surviving rows is an empty result, not an error.
pub struct ReturnTableReconciler;

impl ReturnTableReconciler {
    pub fn new() -> Self {
        Self
    }

    pub fn reconcile(&self, doc: &RawDocument, warnings: &mut Vec<String>) -> Vec<FieldRecord> {
        // Flatten all rows from all tables, preserving page and in-table
        // order, keeping only rows that fit the six-column schema.
        let mut surviving: Vec<&Vec<String>> = doc
            .tables
            .iter()
            .flat_map(|table| table.iter())
            .filter(|row| row.len() == RETURN_COLUMNS.len())
            .collect();

        let discarded = doc.tables.iter().map(|t| t.len()).sum::<usize>() - surviving.len();
        if discarded > 0 {
            debug!(document = %doc.id, discarded, "dropped rows not matching the six-column schema");
        }

        // Repeated headers only ever surface as the very first surviving row.
        if surviving
            .first()
            .is_some_and(|row| row[0].trim() == RETURN_COLUMNS[0])
        {
            surviving.remove(0);
        }

        // The rupee columns export at two decimal places; serial numbers and
        // deductee counts keep their natural scale.
        let rows: Vec<FieldRecord> = surviving
            .into_iter()
            .map(|row| {
                RETURN_COLUMNS
                    .iter()
                    .zip(row.iter())
                    .map(|(col, cell)| {
                        let value = if col.ends_with("(₹)") {
                            normalize_money_cell(cell)
                        } else {
                            normalize_cell(cell)
                        };
                        (col.to_string(), value)
                    })
                    .collect::<FieldRecord>()
            })
            .filter(|record| !record.is_blank())
            .collect();

        if rows.is_empty() {
            warnings.push("no line-item rows survived table reconciliation".to_string());
        }

        rows
    }
}

impl Default for ReturnTableReconciler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ACK_TEXT: &str = "\
Acknowledgment of TDS return for the period Q4
Statement (From 01/01/24 to 31/03/24)
Form No. [box]
Form No. 24Q
Date: 12/05/2024
";

    #[test]
    fn test_extracts_all_four_fields() {
        let mut warnings = Vec::new();
        let record = ReturnFieldExtractor::new().extract(ACK_TEXT, &mut warnings);

        assert_eq!(record.get("Period"), Some(&CellValue::text("Q4")));
        assert_eq!(
            record.get("Date Range"),
            Some(&CellValue::text("01/01/24 to 31/03/24"))
        );
        assert_eq!(record.get("Form No."), Some(&CellValue::text("24Q")));
        assert_eq!(record.get("Date"), Some(&CellValue::text("12/05/2024")));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_no_matches_yield_sentinel_for_every_field() {
        let mut warnings = Vec::new();
        let record = ReturnFieldExtractor::new().extract("nothing relevant here", &mut warnings);

        assert_eq!(record.len(), RETURN_FIELDS.len());
        for field in RETURN_FIELDS {
            assert_eq!(record.get(field), Some(&CellValue::Missing), "{field}");
        }
    }

    #[test]
    fn test_form_no_takes_second_match() {
        let mut warnings = Vec::new();
        let text = "Form No. 24Q then Form No. 26Q then Form No. 27Q";
        let record = ReturnFieldExtractor::new().extract(text, &mut warnings);
        assert_eq!(record.get("Form No."), Some(&CellValue::text("26Q")));
    }

    #[test]
    fn test_single_form_no_is_not_enough() {
        let mut warnings = Vec::new();
        let record = ReturnFieldExtractor::new().extract("Form No. 24Q", &mut warnings);
        assert_eq!(record.get("Form No."), Some(&CellValue::Missing));
    }

    #[test]
    fn test_suspect_issue_date_warns() {
        let mut warnings = Vec::new();
        let record = ReturnFieldExtractor::new().extract("Date: 99/99/2024", &mut warnings);
        assert_eq!(record.get("Date"), Some(&CellValue::text("99/99/2024")));
        assert_eq!(warnings.len(), 1);
    }

    fn header_row() -> Vec<String> {
        RETURN_COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    fn data_row(sr: &str) -> Vec<String> {
        vec![
            sr.to_string(),
            "24Q".to_string(),
            "15".to_string(),
            "1,23,456.00".to_string(),
            "4,720.00".to_string(),
            "4,720.00".to_string(),
        ]
    }

    #[test]
    fn test_wrong_width_rows_are_dropped() {
        let doc = RawDocument {
            id: "ack.pdf".to_string(),
            pages: vec![],
            tables: vec![vec![
                vec!["a".to_string(); 5],
                data_row("1"),
                vec!["b".to_string(); 7],
            ]],
        };
        let mut warnings = Vec::new();
        let rows = ReturnTableReconciler::new().reconcile(&doc, &mut warnings);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Return Type"), Some(&CellValue::text("24Q")));
    }

    #[test]
    fn test_header_removed_once_across_pages() {
        // Two pages each repeating header + data: only the very first
        // surviving row is treated as a header.
        let doc = RawDocument {
            id: "ack.pdf".to_string(),
            pages: vec![],
            tables: vec![
                vec![header_row(), data_row("1")],
                vec![header_row(), data_row("2")],
            ],
        };
        let mut warnings = Vec::new();
        let rows = ReturnTableReconciler::new().reconcile(&doc, &mut warnings);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows[0].get("Sr. No."),
            Some(&CellValue::Number(rust_decimal::Decimal::ONE))
        );
        // Second page's header survives as a data row, in order.
        assert_eq!(rows[1].get("Sr. No."), Some(&CellValue::text("Sr. No.")));
        assert_eq!(rows[2].get("Return Type"), Some(&CellValue::text("24Q")));
    }

    #[test]
    fn test_header_not_removed_when_not_first() {
        let doc = RawDocument {
            id: "ack.pdf".to_string(),
            pages: vec![],
            tables: vec![vec![data_row("1"), header_row()]],
        };
        let mut warnings = Vec::new();
        let rows = ReturnTableReconciler::new().reconcile(&doc, &mut warnings);
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_all_empty_rows_dropped_and_empty_result_warns() {
        let doc = RawDocument {
            id: "ack.pdf".to_string(),
            pages: vec![],
            tables: vec![vec![vec!["".to_string(); 6], vec![" ".to_string(); 6]]],
        };
        let mut warnings = Vec::new();
        let rows = ReturnTableReconciler::new().reconcile(&doc, &mut warnings);
        assert!(rows.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_amount_cells_become_numbers() {
        let doc = RawDocument {
            id: "ack.pdf".to_string(),
            pages: vec![],
            tables: vec![vec![data_row("1")]],
        };
        let mut warnings = Vec::new();
        let rows = ReturnTableReconciler::new().reconcile(&doc, &mut warnings);
        assert_eq!(
            rows[0].get("Amount Paid (₹)").unwrap().render(),
            "123456.00"
        );
        assert_eq!(rows[0].get("Return Type"), Some(&CellValue::text("24Q")));
    }

    #[test]
    fn test_rupee_columns_export_two_decimal_places() {
        let row = vec![
            "1".to_string(),
            "24Q".to_string(),
            "15".to_string(),
            "4,720".to_string(),
            "500".to_string(),
            "500.5".to_string(),
        ];
        let doc = RawDocument {
            id: "ack.pdf".to_string(),
            pages: vec![],
            tables: vec![vec![row]],
        };
        let mut warnings = Vec::new();
        let rows = ReturnTableReconciler::new().reconcile(&doc, &mut warnings);

        assert_eq!(rows[0].get("Amount Paid (₹)").unwrap().render(), "4720.00");
        assert_eq!(
            rows[0].get("Tax Deducted / Collected (₹)").unwrap().render(),
            "500.00"
        );
        assert_eq!(rows[0].get("Tax Deposited (₹)").unwrap().render(), "500.50");
        // Counts keep their natural scale.
        assert_eq!(rows[0].get("Sr. No.").unwrap().render(), "1");
        assert_eq!(
            rows[0]
                .get("No. of Deductee / Party Records")
                .unwrap()
                .render(),
            "15"
        );
    }
}
