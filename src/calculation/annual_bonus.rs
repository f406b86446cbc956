//! Annual bonus (13th salary) calculation.
//!
//! The bonus base is the average of monthly salary-plus-bonus figures,
//! annualised, then scaled by the target rate, the KPI and correction
//! coefficients and the share of the year spent in the company.

use rust_decimal::Decimal;

use crate::config::AnnualBonusRates;
use crate::error::{AnnualBonusValidationError, FieldViolation};
use crate::models::{AnnualBonusInput, AnnualBonusResult, MonthBreakdown};

use super::rounding::percent_fraction;
use super::validation::{
    checked_product, checked_sum, require_in_range, require_optional_non_negative,
    require_optional_percent, require_positive,
};

/// Months in a bonus year; the per-month mapping must hold exactly this many.
pub const MONTHS_IN_YEAR: u32 = 12;

/// The most days on shift a single month may report.
pub const MAX_DAYS_IN_MONTH: u32 = 31;

/// Computes the annual bonus with a fixed rate table.
///
/// # Examples
///
/// ```
/// use shift_payroll::calculation::AnnualBonusCalculator;
/// use shift_payroll::models::AnnualBonusInput;
/// use rust_decimal::Decimal;
///
/// let input = AnnualBonusInput::new(
///     Decimal::from(1000),
///     12,
///     AnnualBonusInput::uniform_days(Decimal::from(20)),
/// )
/// .with_target_rate(Decimal::from(20));
///
/// let result = AnnualBonusCalculator::default().calculate(&input).unwrap();
/// assert_eq!(result.annual_reward_without_allowances, Decimal::from(702240));
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnnualBonusCalculator {
    rates: AnnualBonusRates,
}

impl AnnualBonusCalculator {
    /// Creates a calculator using the given rate table.
    pub fn new(rates: AnnualBonusRates) -> Self {
        Self { rates }
    }

    /// Returns the rate table in use.
    pub fn rates(&self) -> &AnnualBonusRates {
        &self.rates
    }

    /// Checks every constraint of the input, then that the target rate is
    /// present.
    pub fn validate(input: &AnnualBonusInput) -> Result<(), AnnualBonusValidationError> {
        require_positive("hourly rate", input.hourly_rate)?;

        require_in_range(
            "months in company",
            Decimal::from(input.months_in_company),
            Decimal::ONE,
            Decimal::from(MONTHS_IN_YEAR),
        )?;

        if input.monthly_days.len() != MONTHS_IN_YEAR as usize {
            return Err(AnnualBonusValidationError::IncompleteMonths {
                found: input.monthly_days.len(),
            });
        }
        for (&month, &days) in &input.monthly_days {
            if !(1..=MONTHS_IN_YEAR).contains(&month) {
                return Err(AnnualBonusValidationError::UnknownMonth { month });
            }
            if days < Decimal::ZERO || days > Decimal::from(MAX_DAYS_IN_MONTH) {
                return Err(AnnualBonusValidationError::MonthDaysOutOfRange { month, days });
            }
        }

        require_optional_percent("monthly bonus rate", input.monthly_bonus_rate)?;
        require_optional_percent("target annual bonus rate", input.target_annual_bonus_rate)?;
        require_optional_non_negative("KPI coefficient", input.kpi_coefficient)?;
        require_optional_non_negative("correction coefficient", input.correction_coefficient)?;
        require_optional_percent("regional allowance rate", input.regional_allowance_rate)?;
        require_optional_percent("northern allowance rate", input.northern_allowance_rate)?;

        if input.target_annual_bonus_rate.is_none() {
            return Err(AnnualBonusValidationError::MissingTargetAnnualBonusRate);
        }
        Ok(())
    }

    /// Validates the input and derives the monthly breakdown and the bonus.
    ///
    /// Months are averaged over `months_in_company`, not over the months that
    /// actually have shift days. A derived amount outside the decimal range
    /// fails with [`FieldViolation::AmountTooLarge`].
    pub fn calculate(
        &self,
        input: &AnnualBonusInput,
    ) -> Result<AnnualBonusResult, AnnualBonusValidationError> {
        Self::validate(input)?;

        let rates = &self.rates;
        let target_annual_bonus_rate = input
            .target_annual_bonus_rate
            .ok_or(AnnualBonusValidationError::MissingTargetAnnualBonusRate)?;
        let monthly_bonus_rate = input
            .monthly_bonus_rate
            .unwrap_or(rates.default_monthly_bonus_rate);
        let kpi_coefficient = input
            .kpi_coefficient
            .unwrap_or(rates.default_kpi_coefficient);
        let correction_coefficient = input
            .correction_coefficient
            .unwrap_or(rates.default_correction_coefficient);
        let regional_allowance_rate = input.regional_allowance_rate.unwrap_or(Decimal::ZERO);
        let northern_allowance_rate = input.northern_allowance_rate.unwrap_or(Decimal::ZERO);

        let months = self.month_breakdown(input, monthly_bonus_rate)?;
        let bases: Vec<Decimal> = months.iter().map(|m| m.base).collect();
        let total_base = checked_sum("annual base", &bases)?;

        let months_in_company = Decimal::from(input.months_in_company);
        let average_monthly_base = total_base / months_in_company;
        let annual_base =
            checked_product("annual base", &[average_monthly_base, rates.months_per_year])?;

        let annual_reward_without_allowances = checked_product(
            "annual reward",
            &[
                annual_base,
                percent_fraction(target_annual_bonus_rate),
                kpi_coefficient,
                correction_coefficient,
                months_in_company / rates.months_per_year,
            ],
        )?;

        let regional_allowance = checked_product(
            "regional allowance",
            &[annual_reward_without_allowances, percent_fraction(regional_allowance_rate)],
        )?;
        let northern_allowance = checked_product(
            "northern allowance",
            &[annual_reward_without_allowances, percent_fraction(northern_allowance_rate)],
        )?;
        let total_accrued = checked_sum(
            "total accrued",
            &[annual_reward_without_allowances, regional_allowance, northern_allowance],
        )?;
        let tax = checked_product("tax", &[total_accrued, percent_fraction(rates.tax_rate)])?;
        let net = total_accrued - tax;

        Ok(AnnualBonusResult {
            hourly_rate: input.hourly_rate,
            months_in_company: input.months_in_company,
            monthly_bonus_rate,
            target_annual_bonus_rate,
            kpi_coefficient,
            correction_coefficient,
            regional_allowance_rate,
            northern_allowance_rate,
            months,
            average_monthly_base,
            annual_base,
            annual_reward_without_allowances,
            regional_allowance,
            northern_allowance,
            total_accrued,
            tax,
            net,
            rates: rates.clone(),
        })
    }

    /// Derives hours, salary, bonus and base for January through December.
    fn month_breakdown(
        &self,
        input: &AnnualBonusInput,
        monthly_bonus_rate: Decimal,
    ) -> Result<Vec<MonthBreakdown>, FieldViolation> {
        let bonus_fraction = percent_fraction(monthly_bonus_rate);

        (1..=MONTHS_IN_YEAR)
            .map(|month| {
                let days = input
                    .monthly_days
                    .get(&month)
                    .copied()
                    .unwrap_or(Decimal::ZERO);
                let hours =
                    checked_product("monthly hours", &[days, self.rates.hours_per_shift_day])?;
                let salary = checked_product("monthly salary", &[hours, input.hourly_rate])?;
                let bonus = checked_product("monthly bonus", &[salary, bonus_fraction])?;
                Ok(MonthBreakdown {
                    month,
                    days,
                    hours,
                    salary,
                    bonus,
                    base: checked_sum("monthly base", &[salary, bonus])?,
                })
            })
            .collect()
    }
}

/// Calculates the annual bonus with the spreadsheet's default rate table.
pub fn calculate_annual_bonus(
    input: &AnnualBonusInput,
) -> Result<AnnualBonusResult, AnnualBonusValidationError> {
    AnnualBonusCalculator::default().calculate(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::round_currency;
    use std::collections::BTreeMap;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn full_year_input() -> AnnualBonusInput {
        AnnualBonusInput::new(dec("1000"), 12, AnnualBonusInput::uniform_days(dec("20")))
            .with_target_rate(dec("20"))
    }

    /// AB-001: full year, twenty days each month
    #[test]
    fn test_full_year_matches_spreadsheet() {
        let result = calculate_annual_bonus(&full_year_input()).unwrap();

        assert_eq!(result.months.len(), 12);
        for (index, month) in result.months.iter().enumerate() {
            assert_eq!(month.month, index as u32 + 1);
            assert_eq!(month.days, dec("20"));
            assert_eq!(month.hours, dec("220"));
            assert_eq!(month.salary, dec("220000"));
            assert_eq!(month.bonus, dec("72600"));
            assert_eq!(month.base, dec("292600"));
        }

        assert_eq!(result.average_monthly_base, dec("292600"));
        assert_eq!(result.annual_base, dec("3511200"));
        assert_eq!(result.annual_reward_without_allowances, dec("702240"));
        assert_eq!(result.total_accrued, dec("702240"));
        assert_eq!(result.tax, dec("91291.20"));
        assert_eq!(result.net, dec("610948.80"));
    }

    #[test]
    fn test_defaults_are_applied() {
        let result = calculate_annual_bonus(&full_year_input()).unwrap();

        assert_eq!(result.monthly_bonus_rate, dec("33"));
        assert_eq!(result.kpi_coefficient, dec("1"));
        assert_eq!(result.correction_coefficient, dec("1"));
        assert_eq!(result.regional_allowance_rate, Decimal::ZERO);
        assert_eq!(result.northern_allowance_rate, Decimal::ZERO);
        assert_eq!(result.regional_allowance, Decimal::ZERO);
        assert_eq!(result.northern_allowance, Decimal::ZERO);
    }

    #[test]
    fn test_explicit_zero_kpi_is_honoured() {
        let input = full_year_input().with_coefficients(Decimal::ZERO, dec("1"));
        let result = calculate_annual_bonus(&input).unwrap();

        assert_eq!(result.kpi_coefficient, Decimal::ZERO);
        assert_eq!(result.annual_reward_without_allowances, Decimal::ZERO);
        assert_eq!(result.net, Decimal::ZERO);
    }

    #[test]
    fn test_allowances_are_added_to_reward() {
        let input = full_year_input().with_allowances(dec("20"), dec("50"));
        let result = calculate_annual_bonus(&input).unwrap();

        assert_eq!(result.regional_allowance, dec("140448"));
        assert_eq!(result.northern_allowance, dec("351120"));
        assert_eq!(result.total_accrued, dec("1193808"));
        assert_eq!(result.tax, dec("155195.04"));
        assert_eq!(result.net, dec("1038612.96"));
    }

    #[test]
    fn test_coefficients_scale_reward() {
        let input = full_year_input().with_coefficients(dec("1.2"), dec("0.5"));
        let result = calculate_annual_bonus(&input).unwrap();

        assert_eq!(result.annual_reward_without_allowances, dec("421344"));
    }

    #[test]
    fn test_partial_year_with_days_only_in_worked_months() {
        let mut days = [Decimal::ZERO; 12];
        for day in days.iter_mut().take(6) {
            *day = dec("20");
        }
        let input = AnnualBonusInput::new(dec("1000"), 6, AnnualBonusInput::days_by_month(days))
            .with_target_rate(dec("20"));
        let result = calculate_annual_bonus(&input).unwrap();

        assert_eq!(result.average_monthly_base, dec("292600"));
        assert_eq!(result.annual_base, dec("3511200"));
        assert_eq!(result.annual_reward_without_allowances, dec("351120"));
    }

    #[test]
    fn test_average_divides_by_months_in_company() {
        // Twelve months of shifts reported for six months of employment:
        // the sum is still divided by six.
        let input = AnnualBonusInput::new(dec("1000"), 6, AnnualBonusInput::uniform_days(dec("20")))
            .with_target_rate(dec("20"));
        let result = calculate_annual_bonus(&input).unwrap();

        assert_eq!(result.average_monthly_base, dec("585200"));
        assert_eq!(result.annual_base, dec("7022400"));
        assert_eq!(result.annual_reward_without_allowances, dec("702240"));
    }

    #[test]
    fn test_seven_months_uses_repeating_ratio() {
        let input = AnnualBonusInput::new(dec("1000"), 7, AnnualBonusInput::uniform_days(dec("10")))
            .with_target_rate(dec("15"));
        let result = calculate_annual_bonus(&input).unwrap();

        // 12 * 146300 / 7 * 12 * 0.15 * 7 / 12
        assert_eq!(
            round_currency(result.annual_reward_without_allowances),
            dec("263340.00")
        );
        assert_eq!(round_currency(result.tax), dec("34234.20"));
    }

    #[test]
    fn test_missing_target_rate_fails_explicitly() {
        let mut input = full_year_input();
        input.target_annual_bonus_rate = None;

        assert_eq!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::MissingTargetAnnualBonusRate
        );
    }

    #[test]
    fn test_range_errors_win_over_missing_target() {
        let mut input = full_year_input();
        input.target_annual_bonus_rate = None;
        input.hourly_rate = Decimal::ZERO;

        assert_eq!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::Field(FieldViolation::NotPositive {
                field: "hourly rate"
            })
        );
    }

    #[test]
    fn test_months_in_company_bounds() {
        for months in [0, 13] {
            let mut input = full_year_input();
            input.months_in_company = months;
            let error = calculate_annual_bonus(&input).unwrap_err();
            assert_eq!(
                error,
                AnnualBonusValidationError::Field(FieldViolation::OutOfRange {
                    field: "months in company",
                    min: dec("1"),
                    max: dec("12"),
                })
            );
        }
    }

    #[test]
    fn test_eleven_months_of_days_rejected() {
        let mut days = AnnualBonusInput::uniform_days(dec("20"));
        days.remove(&12);
        let input = AnnualBonusInput::new(dec("1000"), 12, days).with_target_rate(dec("20"));

        assert_eq!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::IncompleteMonths { found: 11 }
        );
    }

    #[test]
    fn test_unknown_month_key_rejected() {
        let mut days: BTreeMap<u32, Decimal> = AnnualBonusInput::uniform_days(dec("20"));
        days.remove(&1);
        days.insert(13, dec("20"));
        let input = AnnualBonusInput::new(dec("1000"), 12, days).with_target_rate(dec("20"));

        assert_eq!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::UnknownMonth { month: 13 }
        );
    }

    #[test]
    fn test_month_days_bounds() {
        let mut days = AnnualBonusInput::uniform_days(dec("20"));
        days.insert(2, dec("32"));
        let input = AnnualBonusInput::new(dec("1000"), 12, days).with_target_rate(dec("20"));
        assert_eq!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::MonthDaysOutOfRange {
                month: 2,
                days: dec("32"),
            }
        );

        let mut days = AnnualBonusInput::uniform_days(dec("20"));
        days.insert(5, dec("-1"));
        let input = AnnualBonusInput::new(dec("1000"), 12, days).with_target_rate(dec("20"));
        assert!(matches!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::MonthDaysOutOfRange { month: 5, .. }
        ));
    }

    #[test]
    fn test_percent_and_coefficient_bounds() {
        let input = full_year_input().with_monthly_bonus_rate(dec("101"));
        assert!(matches!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::Field(FieldViolation::PercentOutOfRange {
                field: "monthly bonus rate"
            })
        ));

        let input = full_year_input().with_target_rate(dec("-1"));
        assert!(matches!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::Field(FieldViolation::PercentOutOfRange {
                field: "target annual bonus rate"
            })
        ));

        let input = full_year_input().with_coefficients(dec("1"), dec("-0.1"));
        assert!(matches!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::Field(FieldViolation::Negative {
                field: "correction coefficient"
            })
        ));
    }

    #[test]
    fn test_net_never_exceeds_total() {
        let input = full_year_input()
            .with_allowances(dec("100"), dec("100"))
            .with_coefficients(dec("2.5"), dec("1.1"));
        let result = calculate_annual_bonus(&input).unwrap();

        assert!(result.net <= result.total_accrued);
        assert_eq!(result.tax, result.total_accrued * dec("0.13"));
    }

    fn power_of_ten(exponent: u32) -> Decimal {
        Decimal::from_i128_with_scale(10_i128.pow(exponent), 0)
    }

    #[test]
    fn test_huge_coefficient_reports_overflow() {
        let input = full_year_input().with_coefficients(Decimal::MAX, dec("1"));

        assert_eq!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::Field(FieldViolation::AmountTooLarge {
                field: "annual reward"
            })
        );
    }

    #[test]
    fn test_huge_hourly_rate_reports_overflow() {
        let input = AnnualBonusInput::new(
            power_of_ten(27),
            12,
            AnnualBonusInput::uniform_days(Decimal::from(MAX_DAYS_IN_MONTH)),
        )
        .with_target_rate(dec("20"));
        let error = calculate_annual_bonus(&input).unwrap_err();

        assert_eq!(
            error,
            AnnualBonusValidationError::Field(FieldViolation::AmountTooLarge {
                field: "monthly salary"
            })
        );
        assert_eq!(
            error.to_string(),
            "Invalid annual bonus input: monthly salary is too large to calculate"
        );
    }

    #[test]
    fn test_largest_inputs_never_panic() {
        let input = AnnualBonusInput::new(
            Decimal::MAX,
            MONTHS_IN_YEAR,
            AnnualBonusInput::uniform_days(Decimal::from(MAX_DAYS_IN_MONTH)),
        )
        .with_target_rate(dec("100"))
        .with_monthly_bonus_rate(dec("100"))
        .with_coefficients(Decimal::MAX, Decimal::MAX)
        .with_allowances(dec("100"), dec("100"));

        assert!(matches!(
            calculate_annual_bonus(&input).unwrap_err(),
            AnnualBonusValidationError::Field(FieldViolation::AmountTooLarge { .. })
        ));
    }

    #[test]
    fn test_large_amounts_within_range_still_calculate() {
        let input = AnnualBonusInput::new(
            power_of_ten(20),
            MONTHS_IN_YEAR,
            AnnualBonusInput::uniform_days(Decimal::from(MAX_DAYS_IN_MONTH)),
        )
        .with_target_rate(dec("100"))
        .with_monthly_bonus_rate(dec("100"))
        .with_allowances(dec("100"), dec("100"));
        let result = calculate_annual_bonus(&input).unwrap();

        assert_eq!(result.months[0].salary, Decimal::from(341) * power_of_ten(20));
        assert!(result.net <= result.total_accrued);
        assert_eq!(result.tax, result.total_accrued * dec("0.13"));
    }
}
