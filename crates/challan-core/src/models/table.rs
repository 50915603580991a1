//! The unified table assembled from all documents in a batch.

use serde::Serialize;

use super::record::{CellValue, FieldRecord};

/// The final merged, column-aligned dataset spanning all documents.
///
/// The column set is the union of every row's field names, in first-seen
/// order. Cells for columns a row never carried are empty (`None`), which
/// is distinct from a field the parser looked for and missed
/// ([`CellValue::Missing`]).
#[derive(Debug, Clone, Default, Serialize)]
pub struct UnifiedTable {
    columns: Vec<String>,
    rows: Vec<FieldRecord>,
}

impl UnifiedTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row, extending the column union with any new field names.
    pub fn push(&mut self, row: FieldRecord) {
        for name in row.field_names() {
            if !self.columns.iter().any(|c| c == name) {
                self.columns.push(name.to_string());
            }
        }
        self.rows.push(row);
    }

    /// Column names in first-seen order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[FieldRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when no document contributed any row: the batch-level
    /// "no data extracted" condition.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell lookup by row index and column name. `None` when the row does
    /// not carry the column.
    pub fn cell(&self, row: usize, column: &str) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// One rectangular row: a rendered cell per column, empty for columns
    /// the row does not carry.
    pub fn rendered_row(&self, row: usize) -> Vec<String> {
        let record = &self.rows[row];
        self.columns
            .iter()
            .map(|c| record.get(c).map(CellValue::render).unwrap_or_default())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, &str)]) -> FieldRecord {
        let mut r = FieldRecord::new();
        for (k, v) in pairs {
            r.insert(*k, *v);
        }
        r
    }

    #[test]
    fn test_column_union_first_seen_order() {
        let mut table = UnifiedTable::new();
        table.push(record(&[("Period", "Q1"), ("Date", "01/04/2024")]));
        table.push(record(&[("Sr. No.", "1"), ("Period", "Q2")]));

        assert_eq!(table.columns(), &["Period", "Date", "Sr. No."]);
    }

    #[test]
    fn test_absent_cell_renders_empty_not_sentinel() {
        let mut table = UnifiedTable::new();
        table.push(record(&[("Period", "Q1")]));
        table.push(record(&[("Sr. No.", "1")]));

        assert_eq!(table.rendered_row(1), vec!["".to_string(), "1".to_string()]);
        assert_eq!(table.cell(1, "Period"), None);
    }

    #[test]
    fn test_missing_field_renders_sentinel() {
        let mut row = FieldRecord::new();
        row.insert("Form No.", CellValue::Missing);
        let mut table = UnifiedTable::new();
        table.push(row);

        assert_eq!(table.rendered_row(0), vec!["Not found".to_string()]);
    }
}
