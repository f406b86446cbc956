//! Error types for the payroll engine and its surrounding services.
//!
//! The two calculators each have their own validation error so callers can
//! tell which dialogue produced the failure. Everything outside the pure
//! calculation core (configuration, weather, storage) reports through
//! [`EngineError`].

use rust_decimal::Decimal;
use thiserror::Error;

/// A single input field that failed a range or sign constraint.
///
/// `field` is the human-readable name of the input (e.g. "hourly rate"), so
/// the rendered message can be shown to the worker as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldViolation {
    /// The value must be strictly greater than zero.
    #[error("{field} must be greater than zero")]
    NotPositive {
        /// The offending field.
        field: &'static str,
    },

    /// The value must not be negative.
    #[error("{field} cannot be negative")]
    Negative {
        /// The offending field.
        field: &'static str,
    },

    /// The value is larger than the allowed maximum.
    #[error("{field} exceeds the maximum of {max}")]
    AboveMaximum {
        /// The offending field.
        field: &'static str,
        /// The inclusive upper bound.
        max: Decimal,
    },

    /// A percentage outside the inclusive 0..=100 range.
    #[error("{field} must be between 0 and 100%")]
    PercentOutOfRange {
        /// The offending field.
        field: &'static str,
    },

    /// The value lies outside an inclusive range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// The offending field.
        field: &'static str,
        /// The inclusive lower bound.
        min: Decimal,
        /// The inclusive upper bound.
        max: Decimal,
    },

    /// A derived amount does not fit the decimal range.
    #[error("{field} is too large to calculate")]
    AmountTooLarge {
        /// The derived amount that overflowed.
        field: &'static str,
    },
}

impl FieldViolation {
    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            FieldViolation::NotPositive { field }
            | FieldViolation::Negative { field }
            | FieldViolation::AboveMaximum { field, .. }
            | FieldViolation::PercentOutOfRange { field }
            | FieldViolation::OutOfRange { field, .. }
            | FieldViolation::AmountTooLarge { field } => field,
        }
    }
}

/// Rejection of a regular payroll input.
///
/// Raised before any derived value is computed.
///
/// # Example
///
/// ```
/// use shift_payroll::error::{FieldViolation, PayrollValidationError};
///
/// let error = PayrollValidationError::from(FieldViolation::Negative {
///     field: "days worked",
/// });
/// assert_eq!(error.to_string(), "Invalid payroll input: days worked cannot be negative");
/// assert_eq!(error.field(), "days worked");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid payroll input: {violation}")]
pub struct PayrollValidationError {
    /// The violated constraint.
    pub violation: FieldViolation,
}

impl PayrollValidationError {
    /// Returns the name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        self.violation.field()
    }
}

impl From<FieldViolation> for PayrollValidationError {
    fn from(violation: FieldViolation) -> Self {
        Self { violation }
    }
}

/// Rejection of an annual bonus input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnualBonusValidationError {
    /// A scalar field failed a range or sign constraint.
    #[error("Invalid annual bonus input: {0}")]
    Field(#[from] FieldViolation),

    /// The per-month days mapping does not hold exactly twelve entries.
    #[error("Invalid annual bonus input: days on shift must be given for all 12 months, got {found}")]
    IncompleteMonths {
        /// How many months were supplied.
        found: usize,
    },

    /// A month key outside 1..=12.
    #[error("Invalid annual bonus input: month number must be between 1 and 12, got {month}")]
    UnknownMonth {
        /// The offending month key.
        month: u32,
    },

    /// Days on shift for one month outside 0..=31.
    #[error("Invalid annual bonus input: days on shift in month {month} must be between 0 and 31, got {days}")]
    MonthDaysOutOfRange {
        /// The month number.
        month: u32,
        /// The rejected value.
        days: Decimal,
    },

    /// The target annual bonus rate has no default and must be supplied.
    #[error("target annual bonus rate is required for the annual bonus calculation")]
    MissingTargetAnnualBonusRate,
}

/// The service-level error type.
///
/// Configuration, weather and storage failures are reported here, and the
/// calculator validation errors convert into it so handlers can use `?`.
///
/// # Example
///
/// ```
/// use shift_payroll::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/payroll.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/payroll.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds an unusable value.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The configuration key.
        field: String,
        /// What is wrong with it.
        message: String,
    },

    /// Regular payroll input was rejected.
    #[error(transparent)]
    Payroll(#[from] PayrollValidationError),

    /// Annual bonus input was rejected.
    #[error(transparent)]
    AnnualBonus(#[from] AnnualBonusValidationError),

    /// The forecast request could not be sent or its body could not be read.
    #[error("Weather request failed: {message}")]
    WeatherRequest {
        /// A description of the transport failure.
        message: String,
    },

    /// The forecast API answered with a non-success status.
    #[error("Weather API returned status {status} for {location}")]
    WeatherApi {
        /// The HTTP status code.
        status: u16,
        /// The site that was queried.
        location: String,
    },

    /// The weather service is not configured (e.g. no API key).
    #[error("Weather service unavailable: {message}")]
    WeatherUnavailable {
        /// Why the service cannot answer.
        message: String,
    },

    /// A persistence operation failed.
    #[error("Storage error: {message}")]
    Storage {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_positive_names_field() {
        let violation = FieldViolation::NotPositive {
            field: "hourly rate",
        };
        assert_eq!(violation.to_string(), "hourly rate must be greater than zero");
        assert_eq!(violation.field(), "hourly rate");
    }

    #[test]
    fn test_above_maximum_displays_bound() {
        let violation = FieldViolation::AboveMaximum {
            field: "days worked",
            max: Decimal::from(365),
        };
        assert_eq!(violation.to_string(), "days worked exceeds the maximum of 365");
    }

    #[test]
    fn test_amount_too_large_names_derived_amount() {
        let violation = FieldViolation::AmountTooLarge { field: "tax" };
        assert_eq!(violation.to_string(), "tax is too large to calculate");
        assert_eq!(violation.field(), "tax");
    }

    #[test]
    fn test_percent_out_of_range_message() {
        let error = PayrollValidationError::from(FieldViolation::PercentOutOfRange {
            field: "northern allowance rate",
        });
        assert_eq!(
            error.to_string(),
            "Invalid payroll input: northern allowance rate must be between 0 and 100%"
        );
        assert_eq!(error.field(), "northern allowance rate");
    }

    #[test]
    fn test_missing_target_rate_is_distinct() {
        let error = AnnualBonusValidationError::MissingTargetAnnualBonusRate;
        assert_eq!(
            error.to_string(),
            "target annual bonus rate is required for the annual bonus calculation"
        );
        assert_ne!(
            error,
            AnnualBonusValidationError::Field(FieldViolation::Negative {
                field: "target annual bonus rate"
            })
        );
    }

    #[test]
    fn test_month_days_out_of_range_displays_month_and_value() {
        let error = AnnualBonusValidationError::MonthDaysOutOfRange {
            month: 2,
            days: Decimal::from(32),
        };
        assert_eq!(
            error.to_string(),
            "Invalid annual bonus input: days on shift in month 2 must be between 0 and 31, got 32"
        );
    }

    #[test]
    fn test_weather_api_displays_status_and_location() {
        let error = EngineError::WeatherApi {
            status: 401,
            location: "Igarka".to_string(),
        };
        assert_eq!(error.to_string(), "Weather API returned status 401 for Igarka");
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/payroll.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/payroll.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_validation_errors_convert_into_engine_error() {
        fn validate() -> Result<(), PayrollValidationError> {
            Err(FieldViolation::NotPositive {
                field: "hourly rate",
            }
            .into())
        }

        fn propagates() -> EngineResult<()> {
            validate()?;
            Ok(())
        }

        let error = propagates().unwrap_err();
        assert!(matches!(error, EngineError::Payroll(_)));
        assert_eq!(
            error.to_string(),
            "Invalid payroll input: hourly rate must be greater than zero"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<PayrollValidationError>();
        assert_error::<AnnualBonusValidationError>();
    }
}
