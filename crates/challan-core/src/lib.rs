//! Core library for challan data extraction.
//!
//! This crate provides:
//! - Layout parsers for three fixed document layouts (TDS return
//!   acknowledgments, HDFC Bank payment receipts, Income Tax Department
//!   payment receipts)
//! - Per-document processing with failure isolation
//! - Batch aggregation into one export-ready unified table
//!
//! The engine consumes already-decoded page texts and raw table matrices
//! ([`RawDocument`]); PDF decoding and spreadsheet export are external
//! collaborators.

pub mod error;
pub mod extract;
pub mod models;

pub use error::{ChallanError, ExtractionError, Result};
pub use extract::{Aggregator, DocumentProcessor, ExtractionOutcome};
pub use models::{
    BatchConfig, CellValue, DocumentKind, FieldRecord, LayoutProfile, PaymentSource, RawDocument,
    UnifiedTable,
};
