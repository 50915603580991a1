//! The extraction engine: layout parsers, per-document processing, and
//! batch aggregation.

pub mod aggregate;
pub mod hdfc;
pub mod income_tax;
pub mod processor;
pub mod returns;
pub mod rules;

pub use aggregate::Aggregator;
pub use hdfc::{HdfcReceiptParser, LineRule, HDFC_FIELDS, HDFC_RULES};
pub use income_tax::{IncomeTaxReceiptParser, INCOME_TAX_FIELDS};
pub use processor::{DocumentProcessor, ExtractionOutcome};
pub use returns::{ReturnFieldExtractor, ReturnTableReconciler, RETURN_COLUMNS, RETURN_FIELDS};
