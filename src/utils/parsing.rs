//! Helpers turning loosely typed ISS cell values into domain values.
//!
//! ISS cells are JSON scalars: numbers may arrive as JSON numbers or as
//! numeric strings, absent values as `null` or empty strings.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Date format used by every ISS date column
pub const ISS_DATE_FORMAT: &str = "%Y-%m-%d";

/// Stand-in for cells a row does not carry
pub static NULL: Value = Value::Null;

/// Converts a cell into a decimal
///
/// # Returns
/// * `Ok(None)` for `null`, empty strings and missing values
/// * `Ok(Some(d))` for JSON numbers and numeric strings
/// * `Err(msg)` for anything else
pub fn value_to_decimal(value: &Value) -> Result<Option<Decimal>, String> {
    match value {
        Value::Null => Ok(None),
        Value::Number(number) => {
            let text = number.to_string();
            parse_decimal(&text).map(Some)
        }
        Value::String(text) if text.trim().is_empty() => Ok(None),
        Value::String(text) => parse_decimal(text.trim()).map(Some),
        other => Err(format!("expected a number, got {other}")),
    }
}

fn parse_decimal(text: &str) -> Result<Decimal, String> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| format!("`{text}` is not a decimal: {e}"))
}

/// Converts a cell into a non-empty string, `None` for `null` or blank cells
#[must_use]
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) if text.trim().is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        other => Some(other.to_string()),
    }
}

/// Parses an ISS `YYYY-MM-DD` date
///
/// ISS reports unknown dates as `0000-00-00`, which is rejected like any other
/// invalid calendar date.
#[must_use]
pub fn parse_iss_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), ISS_DATE_FORMAT).ok()
}
