//! Decoded document input handed over by the external PDF decoder.

use serde::{Deserialize, Serialize};

/// A raw table cell matrix: rows of cell strings, ragged lengths allowed.
pub type RawTable = Vec<Vec<String>>;

/// A decoded document as produced by the external decoder.
///
/// The engine never touches PDF bytes; it consumes page texts and raw table
/// matrices that have already been extracted. Any decoder can hand these
/// over as a JSON dump of this structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawDocument {
    /// Identifier used to tag per-document outcomes (usually the file name).
    pub id: String,

    /// Page texts in page order, newline-delimited within a page.
    pub pages: Vec<String>,

    /// Raw table matrices in page and in-page order.
    #[serde(default)]
    pub tables: Vec<RawTable>,
}

impl RawDocument {
    /// Create a document from page texts only (no tables).
    pub fn from_pages(id: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            id: id.into(),
            pages,
            tables: Vec::new(),
        }
    }

    /// Full document text with pages joined by newlines.
    ///
    /// Page boundaries are insignificant for pattern matching, but a missing
    /// trailing newline on a page must not glue two lines together.
    pub fn text(&self) -> String {
        self.pages.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_joins_pages_with_newline() {
        let doc = RawDocument::from_pages("a.pdf", vec!["one\ntwo".into(), "three".into()]);
        assert_eq!(doc.text(), "one\ntwo\nthree");
        assert_eq!(doc.text().lines().count(), 3);
    }

    #[test]
    fn test_deserialize_without_tables() {
        let doc: RawDocument =
            serde_json::from_str(r#"{"id": "x.pdf", "pages": ["hello"]}"#).unwrap();
        assert_eq!(doc.id, "x.pdf");
        assert!(doc.tables.is_empty());
    }
}
