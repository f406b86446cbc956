//! Percent application and currency rounding.
//!
//! Calculations run at full decimal precision; rounding happens only at the
//! currency boundary (reports and persisted records).

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places shown for money.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Converts a percent (e.g. `33`) into a fraction (`0.33`).
pub fn percent_fraction(percent: Decimal) -> Decimal {
    percent / Decimal::ONE_HUNDRED
}

/// Rounds an amount to whole cents, ties to the even cent.
///
/// `0.065` becomes `0.06` and `0.075` becomes `0.08`, the same digits as
/// two-place decimal formatting in the payroll spreadsheet's export.
///
/// # Examples
///
/// ```
/// use shift_payroll::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let tax = Decimal::from_str("28528.5").unwrap();
/// assert_eq!(round_currency(tax).to_string(), "28528.50");
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(
        CURRENCY_DECIMAL_PLACES,
        RoundingStrategy::MidpointNearestEven,
    );
    rounded.rescale(CURRENCY_DECIMAL_PLACES);
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_percent_fraction() {
        assert_eq!(percent_fraction(dec("33")), dec("0.33"));
        assert_eq!(percent_fraction(dec("12.5")), dec("0.125"));
        assert_eq!(percent_fraction(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_midpoint_rounds_to_even_cent() {
        assert_eq!(round_currency(dec("0.065")), dec("0.06"));
        assert_eq!(round_currency(dec("0.075")), dec("0.08"));
        assert_eq!(round_currency(dec("0.125")), dec("0.12"));
        assert_eq!(round_currency(dec("2.675")), dec("2.68"));
        assert_eq!(round_currency(dec("-0.125")), dec("-0.12"));
    }

    #[test]
    fn test_only_exact_midpoints_go_to_even() {
        assert_eq!(round_currency(dec("0.0650001")), dec("0.07"));
        assert_eq!(round_currency(dec("0.1249999")), dec("0.12"));
    }

    #[test]
    fn test_repeating_two_thirds_rounds_to_cents() {
        let idle = dec("22000") * (dec("2") / dec("3"));
        assert_eq!(round_currency(idle), dec("14666.67"));
    }

    #[test]
    fn test_result_always_has_two_places() {
        assert_eq!(round_currency(dec("202021.5")).to_string(), "202021.50");
        assert_eq!(round_currency(dec("165000")).to_string(), "165000.00");
        assert_eq!(round_currency(dec("0.004")).to_string(), "0.00");
    }
}
