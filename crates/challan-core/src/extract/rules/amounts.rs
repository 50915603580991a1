//! Monetary amount parsing and normalization.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::AMOUNT_CELL;
use crate::models::CellValue;

/// Parse an amount string, stripping thousands separators, currency marks,
/// and surrounding whitespace (e.g. "1,23,456.00" or "₹ 4,720").
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

/// Parse a monetary amount at the export scale of two decimal places.
pub fn parse_money(s: &str) -> Option<Decimal> {
    let mut amount = parse_amount(s)?;
    if amount.scale() < 2 {
        amount.rescale(2);
    }
    Some(amount)
}

/// Normalize a raw table cell: amount-looking cells become numbers,
/// everything else stays text.
pub fn normalize_cell(cell: &str) -> CellValue {
    let trimmed = cell.trim();
    if AMOUNT_CELL.is_match(trimmed) {
        if let Some(amount) = parse_amount(trimmed) {
            return CellValue::Number(amount);
        }
    }
    CellValue::text(trimmed)
}

/// Normalize a monetary table cell: amount-looking cells become numbers at
/// the two-decimal export scale, everything else stays text.
pub fn normalize_money_cell(cell: &str) -> CellValue {
    let trimmed = cell.trim();
    if AMOUNT_CELL.is_match(trimmed) {
        if let Some(amount) = parse_money(trimmed) {
            return CellValue::Number(amount);
        }
    }
    CellValue::text(trimmed)
}
