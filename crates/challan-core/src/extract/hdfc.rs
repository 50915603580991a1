//! HDFC Bank payment receipt parsing.
//!
//! The receipt is a fixed line-oriented layout. Fields with a stable label
//! are located by label; the remainder are located by line offset, which is
//! an explicit contract with the decoder's exact line splitting. Every rule
//! is mandatory: any deviation (missing line, absent label, unparsable
//! number) is a [`ExtractionError::LayoutMismatch`], never a sentinel.

use rust_decimal::Decimal;
use tracing::debug;

use super::rules::dates::is_suspect_date;
use super::rules::parse_money;
use crate::error::ExtractionError;
use crate::models::{CellValue, FieldRecord};

/// Field names of the HDFC receipt profile, in output order.
pub const HDFC_FIELDS: [&str; 11] = [
    "Date of Receipt",
    "Nature of Payment",
    "Basic Tax",
    "Interest",
    "Penalty",
    "Fee (Sec. 234E)",
    "TOTAL Amount",
    "Drawn on",
    "Payment Realisation Date",
    "Challan No",
    "Challan Serial No.",
];

/// How a rule finds its source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator {
    /// First line containing the label.
    Label(&'static str),
    /// Fixed zero-based line offset; used only where no stable label exists.
    Line(usize),
}

/// How a rule extracts the raw value from its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extract {
    /// Last whitespace-separated token.
    LastToken,
    /// Zero-based whitespace-separated token.
    Token(usize),
    /// Remove the first occurrence of the label, trim the rest.
    StripLabel(&'static str),
    /// Text before the marker, with a label removed and trimmed.
    BeforeMarker {
        marker: &'static str,
        strip: &'static str,
    },
    /// Text after the marker, trimmed.
    AfterMarker(&'static str),
}

/// How the raw value is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Text,
    /// Monetary amount, thousands separators stripped, two decimal places.
    Money,
    /// Integer identifier (challan numbers).
    Integer,
    /// Date token kept as text; non-validating tokens produce a warning.
    DateToken,
}

/// One line-extraction rule of the receipt layout.
#[derive(Debug, Clone, Copy)]
pub struct LineRule {
    pub field: &'static str,
    pub locator: Locator,
    pub extract: Extract,
    pub kind: ValueKind,
}

/// The receipt layout as a rule table, in output field order.
pub const HDFC_RULES: [LineRule; 11] = [
    LineRule {
        field: "Date of Receipt",
        locator: Locator::Line(12),
        extract: Extract::LastToken,
        kind: ValueKind::DateToken,
    },
    LineRule {
        field: "Nature of Payment",
        locator: Locator::Label("Nature of Payment"),
        extract: Extract::StripLabel("Nature of Payment"),
        kind: ValueKind::Text,
    },
    LineRule {
        field: "Basic Tax",
        locator: Locator::Label("Basic Tax"),
        extract: Extract::StripLabel("Basic Tax"),
        kind: ValueKind::Money,
    },
    LineRule {
        field: "Interest",
        locator: Locator::Label("Interest"),
        extract: Extract::Token(1),
        kind: ValueKind::Money,
    },
    LineRule {
        field: "Penalty",
        locator: Locator::Label("Penalty"),
        extract: Extract::Token(1),
        kind: ValueKind::Money,
    },
    LineRule {
        field: "Fee (Sec. 234E)",
        locator: Locator::Label("234E"),
        extract: Extract::Token(3),
        kind: ValueKind::Money,
    },
    LineRule {
        field: "TOTAL Amount",
        locator: Locator::Label("TOTAL"),
        extract: Extract::BeforeMarker {
            marker: "Drawn on",
            strip: "TOTAL",
        },
        kind: ValueKind::Money,
    },
    LineRule {
        field: "Drawn on",
        locator: Locator::Label("Drawn on"),
        extract: Extract::AfterMarker("Drawn on"),
        kind: ValueKind::Text,
    },
    LineRule {
        field: "Payment Realisation Date",
        locator: Locator::Line(19),
        extract: Extract::LastToken,
        kind: ValueKind::DateToken,
    },
    LineRule {
        field: "Challan No",
        locator: Locator::Line(10),
        extract: Extract::LastToken,
        kind: ValueKind::Integer,
    },
    LineRule {
        field: "Challan Serial No.",
        locator: Locator::Line(13),
        extract: Extract::LastToken,
        kind: ValueKind::Integer,
    },
];

/// Parser for HDFC Bank payment receipts.
pub struct HdfcReceiptParser {
    rules: &'static [LineRule],
}

impl HdfcReceiptParser {
    pub fn new() -> Self {
        Self { rules: &HDFC_RULES }
    }

    /// The rule table this parser runs.
    pub fn rules(&self) -> &[LineRule] {
        self.rules
    }

    /// Parse the receipt text into the full eleven-field record.
    pub fn parse(
        &self,
        text: &str,
        warnings: &mut Vec<String>,
    ) -> Result<FieldRecord, ExtractionError> {
        let lines: Vec<&str> = text.lines().collect();
        let mut record = FieldRecord::new();

        for rule in self.rules {
            let line = self.locate(&lines, rule)?;
            let raw = self.apply(line, rule)?;
            let value = self.typed(&raw, rule, warnings)?;
            record.insert(rule.field, value);
        }

        debug!(fields = record.len(), "parsed HDFC receipt");
        Ok(record)
    }

    fn locate<'a>(&self, lines: &[&'a str], rule: &LineRule) -> Result<&'a str, ExtractionError> {
        match rule.locator {
            Locator::Label(label) => lines
                .iter()
                .find(|l| l.contains(label))
                .copied()
                .ok_or_else(|| {
                    ExtractionError::layout(rule.field, format!("no line contains label '{label}'"))
                }),
            Locator::Line(index) => lines.get(index).copied().ok_or_else(|| {
                ExtractionError::layout(
                    rule.field,
                    format!("line {index} out of range (document has {} lines)", lines.len()),
                )
            }),
        }
    }

    fn apply(&self, line: &str, rule: &LineRule) -> Result<String, ExtractionError> {
        match rule.extract {
            Extract::LastToken => line
                .split_whitespace()
                .next_back()
                .map(str::to_string)
                .ok_or_else(|| ExtractionError::layout(rule.field, "line has no tokens")),
            Extract::Token(index) => {
                line.split_whitespace().nth(index).map(str::to_string).ok_or_else(|| {
                    ExtractionError::layout(
                        rule.field,
                        format!("line '{}' has no token {index}", line.trim()),
                    )
                })
            }
            Extract::StripLabel(label) => Ok(line.replacen(label, "", 1).trim().to_string()),
            Extract::BeforeMarker { marker, strip } => {
                let before = line.split(marker).next().unwrap_or(line);
                Ok(before.replacen(strip, "", 1).trim().to_string())
            }
            Extract::AfterMarker(marker) => {
                let after = line.rsplit(marker).next().unwrap_or("");
                Ok(after.trim().to_string())
            }
        }
    }

    fn typed(
        &self,
        raw: &str,
        rule: &LineRule,
        warnings: &mut Vec<String>,
    ) -> Result<CellValue, ExtractionError> {
        match rule.kind {
            ValueKind::Text => Ok(CellValue::text(raw)),
            ValueKind::Money => parse_money(raw).map(CellValue::Number).ok_or_else(|| {
                ExtractionError::layout(rule.field, format!("cannot parse '{raw}' as an amount"))
            }),
            ValueKind::Integer => raw
                .replace(',', "")
                .parse::<i64>()
                .map(|n| CellValue::Number(Decimal::from(n)))
                .map_err(|_| {
                    ExtractionError::layout(
                        rule.field,
                        format!("cannot parse '{raw}' as an integer"),
                    )
                }),
            ValueKind::DateToken => {
                if is_suspect_date(raw) {
                    warnings.push(format!(
                        "{}: '{raw}' does not validate as a date",
                        rule.field
                    ));
                }
                Ok(CellValue::text(raw))
            }
        }
    }
}

impl Default for HdfcReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}
