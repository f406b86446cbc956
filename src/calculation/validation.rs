//! Numeric validation routines shared by both calculators.
//!
//! Each check returns the first [`FieldViolation`] it finds so the caller
//! can wrap it in its own validation error.

use rust_decimal::Decimal;

use crate::error::FieldViolation;

/// Requires `value > 0`.
pub fn require_positive(field: &'static str, value: Decimal) -> Result<(), FieldViolation> {
    if value <= Decimal::ZERO {
        return Err(FieldViolation::NotPositive { field });
    }
    Ok(())
}

/// Requires `value >= 0`.
pub fn require_non_negative(field: &'static str, value: Decimal) -> Result<(), FieldViolation> {
    if value < Decimal::ZERO {
        return Err(FieldViolation::Negative { field });
    }
    Ok(())
}

/// Requires `value >= 0` when the value is present.
pub fn require_optional_non_negative(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<(), FieldViolation> {
    value.map_or(Ok(()), |v| require_non_negative(field, v))
}

/// Requires `value <= max`.
pub fn require_at_most(
    field: &'static str,
    value: Decimal,
    max: Decimal,
) -> Result<(), FieldViolation> {
    if value > max {
        return Err(FieldViolation::AboveMaximum { field, max });
    }
    Ok(())
}

/// Requires `min <= value <= max`.
pub fn require_in_range(
    field: &'static str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> Result<(), FieldViolation> {
    if value < min || value > max {
        return Err(FieldViolation::OutOfRange { field, min, max });
    }
    Ok(())
}

/// Requires a present percentage to lie within 0..=100.
pub fn require_optional_percent(
    field: &'static str,
    value: Option<Decimal>,
) -> Result<(), FieldViolation> {
    match value {
        Some(v) if v < Decimal::ZERO || v > Decimal::ONE_HUNDRED => {
            Err(FieldViolation::PercentOutOfRange { field })
        }
        _ => Ok(()),
    }
}

/// Multiplies the factors, failing instead of overflowing.
pub fn checked_product(
    field: &'static str,
    factors: &[Decimal],
) -> Result<Decimal, FieldViolation> {
    factors
        .iter()
        .try_fold(Decimal::ONE, |acc, &factor| acc.checked_mul(factor))
        .ok_or(FieldViolation::AmountTooLarge { field })
}

/// Adds the terms, failing instead of overflowing.
pub fn checked_sum(field: &'static str, terms: &[Decimal]) -> Result<Decimal, FieldViolation> {
    terms
        .iter()
        .try_fold(Decimal::ZERO, |acc, &term| acc.checked_add(term))
        .ok_or(FieldViolation::AmountTooLarge { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_positive_rejects_zero_and_negative() {
        assert!(require_positive("hourly rate", dec("0.01")).is_ok());
        assert_eq!(
            require_positive("hourly rate", Decimal::ZERO),
            Err(FieldViolation::NotPositive {
                field: "hourly rate"
            })
        );
        assert!(require_positive("hourly rate", dec("-1")).is_err());
    }

    #[test]
    fn test_non_negative_accepts_zero() {
        assert!(require_non_negative("idle days", Decimal::ZERO).is_ok());
        assert_eq!(
            require_non_negative("idle days", dec("-0.5")),
            Err(FieldViolation::Negative { field: "idle days" })
        );
    }

    #[test]
    fn test_optional_non_negative_skips_none() {
        assert!(require_optional_non_negative("night hours", None).is_ok());
        assert!(require_optional_non_negative("night hours", Some(dec("-1"))).is_err());
    }

    #[test]
    fn test_at_most_is_inclusive() {
        assert!(require_at_most("days worked", dec("365"), dec("365")).is_ok());
        assert_eq!(
            require_at_most("days worked", dec("365.5"), dec("365")),
            Err(FieldViolation::AboveMaximum {
                field: "days worked",
                max: dec("365"),
            })
        );
    }

    #[test]
    fn test_in_range_is_inclusive_on_both_ends() {
        assert!(require_in_range("months", dec("1"), dec("1"), dec("12")).is_ok());
        assert!(require_in_range("months", dec("12"), dec("1"), dec("12")).is_ok());
        assert!(require_in_range("months", dec("0"), dec("1"), dec("12")).is_err());
        assert!(require_in_range("months", dec("13"), dec("1"), dec("12")).is_err());
    }

    #[test]
    fn test_percent_bounds() {
        assert!(require_optional_percent("regional allowance rate", None).is_ok());
        assert!(require_optional_percent("regional allowance rate", Some(dec("0"))).is_ok());
        assert!(require_optional_percent("regional allowance rate", Some(dec("100"))).is_ok());
        assert_eq!(
            require_optional_percent("regional allowance rate", Some(dec("100.01"))),
            Err(FieldViolation::PercentOutOfRange {
                field: "regional allowance rate"
            })
        );
        assert!(require_optional_percent("regional allowance rate", Some(dec("-10"))).is_err());
    }

    #[test]
    fn test_checked_product_and_sum() {
        assert_eq!(
            checked_product("salary", &[dec("165"), dec("1000")]),
            Ok(dec("165000"))
        );
        assert_eq!(checked_sum("total", &[dec("0.5"), dec("1.25")]), Ok(dec("1.75")));
        assert_eq!(checked_sum("total", &[]), Ok(Decimal::ZERO));
    }

    #[test]
    fn test_overflow_is_reported_not_panicked() {
        assert_eq!(
            checked_product("salary", &[Decimal::MAX, dec("2")]),
            Err(FieldViolation::AmountTooLarge { field: "salary" })
        );
        assert_eq!(
            checked_sum("total", &[Decimal::MAX, Decimal::ONE]),
            Err(FieldViolation::AmountTooLarge { field: "total" })
        );
    }
}
