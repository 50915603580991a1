//! Batch aggregation: merging per-document outcomes into one table.

use tracing::debug;

use super::processor::ExtractionOutcome;
use crate::models::{FieldRecord, UnifiedTable};

/// Column names used for error rows in the unified table.
const DOCUMENT_COLUMN: &str = "Document";
const ERROR_COLUMN: &str = "Error";

/// Concatenates per-document outcomes into a [`UnifiedTable`].
///
/// Rows keep submission order; the column set is the first-seen-order union
/// of every row's fields; an error outcome contributes one row carrying the
/// document identifier and message. No deduplication happens across
/// documents: repeated documents produce repeated rows by design.
#[derive(Debug, Default)]
pub struct Aggregator {
    table: UnifiedTable,
    successes: usize,
    failures: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's outcome.
    pub fn push(&mut self, outcome: &ExtractionOutcome) {
        match &outcome.error {
            None => {
                for row in &outcome.rows {
                    self.table.push(row.clone());
                }
                self.successes += 1;
            }
            Some(message) => {
                let mut row = FieldRecord::new();
                row.insert(DOCUMENT_COLUMN, outcome.document.as_str());
                row.insert(ERROR_COLUMN, message.as_str());
                self.table.push(row);
                self.failures += 1;
            }
        }
    }

    /// Documents that produced rows.
    pub fn successes(&self) -> usize {
        self.successes
    }

    /// Documents that produced an error row.
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// True when no document produced any data row: the batch-level
    /// "no data extracted" condition (error rows do not count as data).
    pub fn no_data(&self) -> bool {
        self.successes == 0 || self.table.is_empty()
    }

    /// Finish the batch and hand the table to the export sink.
    pub fn into_table(self) -> UnifiedTable {
        debug!(
            rows = self.table.len(),
            columns = self.table.columns().len(),
            successes = self.successes,
            failures = self.failures,
            "batch aggregated"
        );
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use pretty_assertions::assert_eq;

    fn success(document: &str, rows: Vec<FieldRecord>) -> ExtractionOutcome {
        ExtractionOutcome {
            document: document.to_string(),
            rows,
            error: None,
            warnings: Vec::new(),
            elapsed_ms: 0,
        }
    }

    fn failure(document: &str, message: &str) -> ExtractionOutcome {
        ExtractionOutcome {
            document: document.to_string(),
            rows: Vec::new(),
            error: Some(message.to_string()),
            warnings: Vec::new(),
            elapsed_ms: 0,
        }
    }

    fn row(pairs: &[(&str, &str)]) -> FieldRecord {
        let mut r = FieldRecord::new();
        for (k, v) in pairs {
            r.insert(*k, *v);
        }
        r
    }

    #[test]
    fn test_error_in_the_middle_keeps_neighbours() {
        let mut agg = Aggregator::new();
        agg.push(&success("one.pdf", vec![row(&[("Period", "Q1")])]));
        agg.push(&failure("two.pdf", "layout mismatch for 'Basic Tax': line 9 out of range"));
        agg.push(&success("three.pdf", vec![row(&[("Period", "Q3")])]));

        assert_eq!(agg.successes(), 2);
        assert_eq!(agg.failures(), 1);

        let table = agg.into_table();
        assert_eq!(table.len(), 3);
        assert_eq!(table.cell(0, "Period"), Some(&CellValue::text("Q1")));
        assert_eq!(table.cell(1, "Document"), Some(&CellValue::text("two.pdf")));
        assert!(table.cell(1, "Error").is_some());
        assert_eq!(table.cell(2, "Period"), Some(&CellValue::text("Q3")));
    }

    #[test]
    fn test_aggregation_has_no_cross_batch_state() {
        let outcome = success("a.pdf", vec![row(&[("Period", "Q1"), ("Date", "x")])]);

        let mut once = Aggregator::new();
        once.push(&outcome);
        let single = once.into_table();

        let mut twice = Aggregator::new();
        twice.push(&outcome);
        twice.push(&outcome);
        let double = twice.into_table();

        // The first half of the doubled batch equals the single batch.
        assert_eq!(double.columns(), single.columns());
        assert_eq!(double.rows()[..single.len()], single.rows()[..]);
        assert_eq!(double.len(), 2 * single.len());
    }

    #[test]
    fn test_no_data_only_when_zero_successes() {
        let mut agg = Aggregator::new();
        agg.push(&failure("bad.pdf", "boom"));
        assert!(agg.no_data());

        let mut agg = Aggregator::new();
        agg.push(&success("ok.pdf", vec![row(&[("Period", "Q1")])]));
        agg.push(&failure("bad.pdf", "boom"));
        assert!(!agg.no_data());
    }

    #[test]
    fn test_error_columns_join_the_union_in_first_seen_order() {
        let mut agg = Aggregator::new();
        agg.push(&success("ok.pdf", vec![row(&[("Period", "Q1")])]));
        agg.push(&failure("bad.pdf", "boom"));
        let table = agg.into_table();

        assert_eq!(table.columns(), &["Period", "Document", "Error"]);
        // Missing cells of the error row render empty, not "Not found".
        assert_eq!(table.rendered_row(1)[0], "");
    }
}
