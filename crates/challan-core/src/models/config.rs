//! Batch configuration and layout profile selection.

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// The fixed document layout a batch is processed under.
///
/// Selected once per batch, never per document. Adding a layout is a
/// compile-time extension of this enum, not a new string branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutProfile {
    /// TDS return acknowledgment: header fields plus a line-item table.
    TdsReturns,
    /// HDFC Bank payment receipt: eleven line-oriented fields.
    HdfcBankPayment,
    /// Income Tax Department payment receipt: labeled-prefix fields.
    IncomeTaxPayment,
}

/// Top-level document type as selected at the batch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// TDS return acknowledgments.
    Returns,
    /// TDS payment receipts; requires a payment source.
    Payments,
}

/// Payment-source sub-selection, applicable to [`DocumentKind::Payments`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentSource {
    HdfcBank,
    IncomeTaxDepartment,
}

impl LayoutProfile {
    /// Resolve the batch-level selection into a profile.
    ///
    /// Invalid combinations (a payment source for returns, payments without
    /// a source) are rejected here, before any document is processed.
    pub fn resolve(
        kind: DocumentKind,
        source: Option<PaymentSource>,
    ) -> Result<Self, ExtractionError> {
        match (kind, source) {
            (DocumentKind::Returns, None) => Ok(Self::TdsReturns),
            (DocumentKind::Returns, Some(_)) => Err(ExtractionError::UnsupportedProfile(
                "payment source is not applicable to TDS returns".to_string(),
            )),
            (DocumentKind::Payments, Some(PaymentSource::HdfcBank)) => Ok(Self::HdfcBankPayment),
            (DocumentKind::Payments, Some(PaymentSource::IncomeTaxDepartment)) => {
                Ok(Self::IncomeTaxPayment)
            }
            (DocumentKind::Payments, None) => Err(ExtractionError::UnsupportedProfile(
                "TDS payments require a payment source (HDFC Bank or Income Tax Department)"
                    .to_string(),
            )),
        }
    }
}

/// Caller-owned configuration for one batch run.
///
/// Replaces any process-wide session state: the engine holds nothing
/// between runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Layout profile the whole batch is parsed under.
    pub profile: LayoutProfile,
}

impl BatchConfig {
    pub fn new(profile: LayoutProfile) -> Self {
        Self { profile }
    }

    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }
}
