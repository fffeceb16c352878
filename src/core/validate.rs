//! Input validation shared by the mutation operations.
//!
//! Form values arrive as text; these helpers turn them into typed values or a
//! [`ValidationError`] without touching the store.

use crate::errors::ValidationError;

/// Parses a user-entered amount. Accepts any finite decimal strictly greater than zero.
///
/// # Errors
/// Returns [`ValidationError::InvalidAmount`] for empty, unparseable, non-finite,
/// zero or negative input.
pub fn parse_amount(input: &str) -> Result<f64, ValidationError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(amount),
        _ => Err(ValidationError::InvalidAmount {
            input: trimmed.to_string(),
        }),
    }
}

/// Trims a required text field.
///
/// # Errors
/// Returns [`ValidationError::EmptyField`] naming `field` when nothing is left after trimming.
pub fn require_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field; blank values become `None`.
#[must_use]
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_amount_accepts_positive_decimals() {
        assert_eq!(parse_amount("25"), Ok(25.0));
        assert_eq!(parse_amount("12.50"), Ok(12.5));
        assert_eq!(parse_amount(" 0.01 "), Ok(0.01));
    }

    #[test]
    fn test_parse_amount_rejects_invalid_input() {
        for input in ["", "   ", "0", "0.0", "-5", "abc", "12,50", "inf", "NaN"] {
            assert!(
                matches!(
                    parse_amount(input),
                    Err(ValidationError::InvalidAmount { .. })
                ),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn test_require_text() {
        assert_eq!(require_text("  Alex ", "name"), Ok("Alex".to_string()));
        assert_eq!(
            require_text(" \n ", "name"),
            Err(ValidationError::EmptyField { field: "name" })
        );
    }

    #[test]
    fn test_optional_text() {
        assert_eq!(optional_text(None), None);
        assert_eq!(optional_text(Some("   ")), None);
        assert_eq!(
            optional_text(Some(" alex@example.com ")),
            Some("alex@example.com".to_string())
        );
    }
}
