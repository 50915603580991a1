//! Data models: decoded documents, field records, the unified table, and
//! batch configuration.

pub mod config;
pub mod document;
pub mod record;
pub mod table;

pub use config::{BatchConfig, DocumentKind, LayoutProfile, PaymentSource};
pub use document::{RawDocument, RawTable};
pub use record::{CellValue, FieldRecord, NOT_FOUND};
pub use table::UnifiedTable;
