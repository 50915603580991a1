//! Per-document processing: profile dispatch and failure isolation.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use super::hdfc::HdfcReceiptParser;
use super::income_tax::IncomeTaxReceiptParser;
use super::returns::{ReturnFieldExtractor, ReturnTableReconciler};
use crate::error::ExtractionError;
use crate::models::{BatchConfig, FieldRecord, LayoutProfile, RawDocument};

/// The result of processing one document: either its extracted rows or a
/// per-document error. Both shapes flow through the same aggregation path.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    /// Identifier of the source document.
    pub document: String,
    /// Extracted rows; empty when the document failed.
    pub rows: Vec<FieldRecord>,
    /// Error message when extraction failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Non-fatal observations (suspect date tokens, empty tables).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub elapsed_ms: u64,
}

impl ExtractionOutcome {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Dispatches each document to the parser combination of the selected
/// layout profile and isolates per-document failures.
///
/// This is the single catch boundary of the engine: parser errors are
/// converted into error outcomes here and never propagate further, so one
/// bad document cannot abort a batch. Processing is strictly sequential.
pub struct DocumentProcessor {
    config: BatchConfig,
    fields: ReturnFieldExtractor,
    table: ReturnTableReconciler,
    hdfc: HdfcReceiptParser,
    income_tax: IncomeTaxReceiptParser,
}

impl DocumentProcessor {
    pub fn new(config: BatchConfig) -> Self {
        Self {
            config,
            fields: ReturnFieldExtractor::new(),
            table: ReturnTableReconciler::new(),
            hdfc: HdfcReceiptParser::new(),
            income_tax: IncomeTaxReceiptParser::new(),
        }
    }

    pub fn profile(&self) -> LayoutProfile {
        self.config.profile
    }

    /// Process one document. Never fails; failures become error outcomes.
    pub fn process(&self, doc: &RawDocument) -> ExtractionOutcome {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let result = self.run(doc, &mut warnings);
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match result {
            Ok(rows) => {
                info!(
                    document = %doc.id,
                    rows = rows.len(),
                    elapsed_ms,
                    "document processed"
                );
                ExtractionOutcome {
                    document: doc.id.clone(),
                    rows,
                    error: None,
                    warnings,
                    elapsed_ms,
                }
            }
            Err(e) => {
                warn!(document = %doc.id, error = %e, "document failed");
                ExtractionOutcome {
                    document: doc.id.clone(),
                    rows: Vec::new(),
                    error: Some(e.to_string()),
                    warnings,
                    elapsed_ms,
                }
            }
        }
    }

    fn run(
        &self,
        doc: &RawDocument,
        warnings: &mut Vec<String>,
    ) -> Result<Vec<FieldRecord>, ExtractionError> {
        let text = doc.text();

        match self.config.profile {
            LayoutProfile::TdsReturns => {
                // Field record row precedes the line-item rows.
                let mut rows = vec![self.fields.extract(&text, warnings)];
                rows.extend(self.table.reconcile(doc, warnings));
                Ok(rows)
            }
            LayoutProfile::HdfcBankPayment => {
                Ok(vec![self.hdfc.parse(&text, warnings)?])
            }
            LayoutProfile::IncomeTaxPayment => Ok(vec![self.income_tax.parse(&text)]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CellValue;
    use pretty_assertions::assert_eq;

    fn processor(profile: LayoutProfile) -> DocumentProcessor {
        DocumentProcessor::new(BatchConfig::new(profile))
    }

    #[test]
    fn test_returns_profile_concatenates_fields_then_line_items() {
        let doc = RawDocument {
            id: "ack.pdf".to_string(),
            pages: vec!["period Q1\nDate: 01/07/2024".to_string()],
            tables: vec![vec![vec![
                "1".to_string(),
                "24Q".to_string(),
                "10".to_string(),
                "1,000.00".to_string(),
                "100.00".to_string(),
                "100.00".to_string(),
            ]]],
        };

        let outcome = processor(LayoutProfile::TdsReturns).process(&doc);
        assert!(outcome.is_success());
        assert_eq!(outcome.rows.len(), 2);
        assert_eq!(outcome.rows[0].get("Period"), Some(&CellValue::text("Q1")));
        assert_eq!(outcome.rows[1].get("Return Type"), Some(&CellValue::text("24Q")));
    }

    #[test]
    fn test_hdfc_failure_becomes_error_outcome() {
        let doc = RawDocument::from_pages("short.pdf", vec!["only one line".to_string()]);
        let outcome = processor(LayoutProfile::HdfcBankPayment).process(&doc);

        assert!(!outcome.is_success());
        assert_eq!(outcome.document, "short.pdf");
        assert!(outcome.rows.is_empty());
        assert!(outcome.error.as_deref().unwrap().contains("layout mismatch"));
    }

    #[test]
    fn test_income_tax_profile_produces_one_record() {
        let doc = RawDocument::from_pages(
            "itd.pdf",
            vec!["Nature of Payment: TDS on Rent".to_string()],
        );
        let outcome = processor(LayoutProfile::IncomeTaxPayment).process(&doc);

        assert!(outcome.is_success());
        assert_eq!(outcome.rows.len(), 1);
        assert_eq!(
            outcome.rows[0].get("Nature of Payment"),
            Some(&CellValue::text("TDS on Rent"))
        );
    }

    #[test]
    fn test_returns_profile_carries_table_warning() {
        let doc = RawDocument::from_pages("ack.pdf", vec!["period Q2".to_string()]);
        let outcome = processor(LayoutProfile::TdsReturns).process(&doc);
        assert!(outcome.is_success());
        assert!(outcome.warnings.iter().any(|w| w.contains("line-item")));
    }
}
