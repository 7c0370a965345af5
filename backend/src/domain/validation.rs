//! Validation failures and field helpers shared by the domain entities.

use serde_json::{Value, json};

/// Earliest model year a registration will accept.
pub const MIN_YEAR: i32 = 1885;

/// Latest model year a registration will accept.
pub const MAX_YEAR: i32 = 2100;

/// Failures raised while validating entity and value-object fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required string field is missing or blank.
    #[error("{field} must not be empty")]
    EmptyField {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The plate matches neither accepted format.
    #[error("plate '{value}' is not a valid legacy or Mercosul plate")]
    InvalidPlate {
        /// The rejected (already normalised) input.
        value: String,
    },
    /// The model year is outside the plausible range.
    #[error("year {year} is outside the accepted range 1885..=2100")]
    YearOutOfRange {
        /// The rejected year.
        year: i32,
    },
    /// Yard capacity must hold at least one motorcycle.
    #[error("capacity must be at least 1, got {capacity}")]
    CapacityNotPositive {
        /// The rejected capacity.
        capacity: i32,
    },
    /// The email is not shaped like `local@domain`.
    #[error("email '{value}' is not a valid address")]
    InvalidEmail {
        /// The rejected input.
        value: String,
    },
}

impl ValidationError {
    /// Structured details for the API error envelope.
    pub fn details(&self) -> Value {
        match self {
            Self::EmptyField { field } => json!({ "field": field, "code": "missing_field" }),
            Self::InvalidPlate { value } => {
                json!({ "field": "plate", "value": value, "code": "invalid_plate" })
            }
            Self::YearOutOfRange { year } => {
                json!({ "field": "year", "value": year, "code": "year_out_of_range" })
            }
            Self::CapacityNotPositive { capacity } => {
                json!({ "field": "capacity", "value": capacity, "code": "capacity_not_positive" })
            }
            Self::InvalidEmail { value } => {
                json!({ "field": "email", "value": value, "code": "invalid_email" })
            }
        }
    }
}

/// Trim `value` and reject blank input.
pub(crate) fn non_empty(value: String, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed.to_owned())
}

/// Reject model years outside [`MIN_YEAR`]..=[`MAX_YEAR`].
pub(crate) fn year_in_range(year: i32) -> Result<i32, ValidationError> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(ValidationError::YearOutOfRange { year });
    }
    Ok(year)
}

/// Accept addresses shaped like `local@domain`, nothing stricter.
pub(crate) fn email_shaped(value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    let mut halves = trimmed.splitn(2, '@');
    let local = halves.next().unwrap_or_default();
    let domain = halves.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail {
            value: trimmed.to_owned(),
        });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("  padded  ", "padded")]
    #[case("plain", "plain")]
    fn non_empty_trims(#[case] input: &str, #[case] expected: &str) {
        let value = non_empty(input.to_owned(), "name").expect("non-blank input");
        assert_eq!(value, expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn non_empty_rejects_blank(#[case] input: &str) {
        let err = non_empty(input.to_owned(), "name").expect_err("blank input");
        assert_eq!(err, ValidationError::EmptyField { field: "name" });
    }

    #[rstest]
    #[case(1884)]
    #[case(2101)]
    #[case(0)]
    fn year_out_of_range_is_rejected(#[case] year: i32) {
        assert!(year_in_range(year).is_err());
    }

    #[rstest]
    #[case(1885)]
    #[case(2024)]
    #[case(2100)]
    fn plausible_years_pass(#[case] year: i32) {
        assert_eq!(year_in_range(year), Ok(year));
    }

    #[rstest]
    #[case("ana@example.com")]
    #[case("a@b")]
    fn shaped_emails_pass(#[case] input: &str) {
        assert!(email_shaped(input.to_owned()).is_ok());
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("@missing-local")]
    #[case("missing-domain@")]
    #[case("two@@ats")]
    fn malformed_emails_fail(#[case] input: &str) {
        assert!(email_shaped(input.to_owned()).is_err());
    }
}
