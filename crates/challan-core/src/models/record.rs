//! Field records: ordered field-name to cell-value maps.

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal rendered for a field that could not be matched.
///
/// Distinct from an empty cell: "Not found" means the parser looked for the
/// field and found nothing; an empty cell means the column belongs to a
/// different document's schema.
pub const NOT_FOUND: &str = "Not found";

/// A single extracted cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Free-text value, kept as captured.
    Text(String),
    /// Numeric value with thousands separators already stripped.
    Number(Decimal),
    /// The field's pattern had no match. Renders as [`NOT_FOUND`].
    Missing,
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Render the value for export. `Missing` becomes the sentinel literal.
    pub fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(d) => d.to_string(),
            Self::Missing => NOT_FOUND.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<Decimal> for CellValue {
    fn from(d: Decimal) -> Self {
        Self::Number(d)
    }
}

/// One extracted row: field names mapped to cell values in insertion order.
///
/// Header-level field records and line-item rows share this shape so both
/// can flow through the same aggregation path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldRecord {
    fields: IndexMap<String, CellValue>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, overwriting any previous value for the field.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<CellValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.fields.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// True if every value in the record is blank or missing.
    pub fn is_blank(&self) -> bool {
        self.fields
            .values()
            .all(|v| matches!(v, CellValue::Missing) || matches!(v, CellValue::Text(s) if s.trim().is_empty()))
    }
}

impl FromIterator<(String, CellValue)> for FieldRecord {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
