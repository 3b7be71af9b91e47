//! Form field validation shared by the resource drafts.

use crate::error::{Error, Result};

/// Trimmed non-empty text, or a validation error naming `field`.
pub fn required_text(field: &'static str, value: &str, message: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(field, message));
    }
    Ok(trimmed.to_string())
}

/// Finite number greater than zero.
pub fn positive_number(field: &'static str, value: &str, message: &str) -> Result<f64> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() && number > 0.0 => Ok(number),
        _ => Err(Error::validation(field, message)),
    }
}

/// Whole number greater than zero.
pub fn positive_integer(field: &'static str, value: &str, message: &str) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(number) if number > 0 => Ok(number),
        _ => Err(Error::validation(field, message)),
    }
}

/// `Some(trimmed)` for non-blank optional input.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

/// Accepts `YYYY-MM-DD` and returns it normalized.
pub(crate) fn iso_date(field: &'static str, value: &str) -> Result<String> {
    chrono::NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|_| Error::validation(field, "Invalid date format. Use YYYY-MM-DD."))
}
