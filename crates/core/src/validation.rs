//! Field validators shared by the create/update DTOs.
//!
//! Written against the `validator` crate's `custom` / `schema` hooks.

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

/// Rejects strings that are empty or whitespace only.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(error("blank", "must not be blank"));
    }
    Ok(())
}

/// Rejects negative money amounts.
pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("negative", "must be greater than or equal to 0"));
    }
    Ok(())
}

/// Rejects an end date that falls before the start date. Open-ended ranges
/// are accepted.
pub fn date_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), ValidationError> {
    match (start, end) {
        (Some(start), Some(end)) if end < start => Err(error(
            "date_range",
            "end_date must not be before start_date",
        )),
        _ => Ok(()),
    }
}

/// Flatten `validator` output into one human-readable line, fields sorted so
/// messages are stable.
pub fn describe(errors: &ValidationErrors) -> String {
    let mut parts: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let reasons: Vec<String> = errs
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            if *field == "__all__" {
                reasons.join(", ")
            } else {
                format!("{field}: {}", reasons.join(", "))
            }
        })
        .collect();
    parts.sort();
    parts.join("; ")
}

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn blank_strings_rejected() {
        assert!(not_blank("  ").is_err());
        assert!(not_blank("").is_err());
        assert!(not_blank("Acme").is_ok());
    }

    #[test]
    fn negative_amounts_rejected() {
        assert!(non_negative(&Decimal::from_str("-0.01").unwrap()).is_err());
        assert!(non_negative(&Decimal::ZERO).is_ok());
        assert!(non_negative(&Decimal::from(100)).is_ok());
    }

    #[test]
    fn date_range_checks_order() {
        let jan = NaiveDate::from_ymd_opt(2026, 1, 1);
        let feb = NaiveDate::from_ymd_opt(2026, 2, 1);
        assert!(date_range(jan, feb).is_ok());
        assert!(date_range(jan, jan).is_ok());
        assert!(date_range(feb, jan).is_err());
        assert!(date_range(None, jan).is_ok());
        assert!(date_range(feb, None).is_ok());
    }
}
