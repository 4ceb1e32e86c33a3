//! Attribute sanity checks
//!
//! Fails fast on the first malformed field, naming it. Values are never
//! silently defaulted.

use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use thiserror::Error;

use super::CardAttributes;

/// Earliest plausible card issue year
pub const MIN_YEAR: i32 = 1860;

/// Attribute validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing field: {field}")]
    MissingField { field: &'static str },

    #[error("field {field} out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    #[error("invalid field {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the offending field
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::Invalid { field, .. } => field,
        }
    }
}

impl CardAttributes {
    /// Check attribute values for plausibility against the current date
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.validate_at(Utc::now())
    }

    /// Check attribute values with an explicit clock
    ///
    /// Years up to one past `now` are accepted.
    pub fn validate_at(&self, now: DateTime<Utc>) -> Result<(), ValidationError> {
        if self.player_name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "player_name",
            });
        }
        if self.set_name.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "set_name" });
        }

        let max_year = now.year() + 1;
        if self.year < MIN_YEAR || self.year > max_year {
            return Err(ValidationError::OutOfRange {
                field: "year",
                reason: format!("{} not in {}..={}", self.year, MIN_YEAR, max_year),
            });
        }

        self.validate_grade()?;
        self.validate_serial()?;
        Ok(())
    }

    fn validate_grade(&self) -> Result<(), ValidationError> {
        match (self.grade_company, self.grade_value) {
            (None, None) => Ok(()),
            (Some(_), None) => Err(ValidationError::MissingField {
                field: "grade_value",
            }),
            (None, Some(_)) => Err(ValidationError::MissingField {
                field: "grade_company",
            }),
            (Some(_), Some(grade)) => {
                if grade < Decimal::ONE || grade > dec!(10) {
                    return Err(ValidationError::OutOfRange {
                        field: "grade_value",
                        reason: format!("{} not in 1..=10", grade),
                    });
                }
                // Known scales move in half-point steps
                if !(grade * Decimal::TWO).fract().is_zero() {
                    return Err(ValidationError::Invalid {
                        field: "grade_value",
                        reason: format!("{} is not a half-point grade", grade),
                    });
                }
                Ok(())
            }
        }
    }

    fn validate_serial(&self) -> Result<(), ValidationError> {
        let Some(number) = self.serial_number else {
            return Ok(());
        };
        let Some(denominator) = self.print_run() else {
            return Err(ValidationError::MissingField {
                field: "serial_denominator",
            });
        };
        if number == 0 || number > denominator {
            return Err(ValidationError::OutOfRange {
                field: "serial_number",
                reason: format!("{} not in 1..={}", number, denominator),
            });
        }
        Ok(())
    }
}
