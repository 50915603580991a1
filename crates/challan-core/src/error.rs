//! Error types for the challan-core library.

use thiserror::Error;

/// Main error type for the challan library.
#[derive(Error, Debug)]
pub enum ChallanError {
    /// Document extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by the layout parsers.
///
/// These are caught exactly once, at the [`DocumentProcessor`] boundary,
/// and converted into per-document error outcomes. They never abort a batch.
///
/// [`DocumentProcessor`]: crate::extract::DocumentProcessor
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A positional or structural assumption about the document layout was
    /// violated (line out of range, label absent, unparsable number).
    #[error("layout mismatch for '{field}': {reason}")]
    LayoutMismatch { field: String, reason: String },

    /// An invalid document-type / payment-source combination was requested.
    #[error("unsupported profile: {0}")]
    UnsupportedProfile(String),
}

impl ExtractionError {
    /// Convenience constructor for layout mismatches.
    pub fn layout(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LayoutMismatch {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for the challan library.
pub type Result<T> = std::result::Result<T, ChallanError>;
