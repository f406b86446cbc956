//! Regular payroll for one shift-method work period.
//!
//! This module reproduces the reference spreadsheet: timesheet hours, pay by
//! position, holiday, idle, travel, shift-method and night supplements, the
//! monthly bonus, regional and northern allowances, and income tax on
//! everything except the shift-method and travel compensation.

use rust_decimal::Decimal;

use crate::config::PayrollRates;
use crate::error::PayrollValidationError;
use crate::models::{RegularPayrollInput, RegularPayrollResult};

use super::rounding::percent_fraction;
use super::validation::{
    checked_product, checked_sum, require_at_most, require_non_negative,
    require_optional_non_negative, require_optional_percent, require_positive,
};

/// The largest number of days a single period may report.
pub const MAX_DAYS_WORKED: u32 = 365;

/// Computes shift-method payroll with a fixed rate table.
///
/// The calculator holds no mutable state; one instance can serve any number
/// of concurrent callers.
///
/// # Examples
///
/// ```
/// use shift_payroll::calculation::RegularPayrollCalculator;
/// use shift_payroll::models::RegularPayrollInput;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let calculator = RegularPayrollCalculator::default();
/// let input = RegularPayrollInput::new(Decimal::from(1000), Decimal::from(15));
///
/// let result = calculator.calculate(&input).unwrap();
/// assert_eq!(result.total_accrued, Decimal::from(230550));
/// assert_eq!(result.net, Decimal::from_str("202021.50").unwrap());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegularPayrollCalculator {
    rates: PayrollRates,
}

impl RegularPayrollCalculator {
    /// Creates a calculator using the given rate table.
    pub fn new(rates: PayrollRates) -> Self {
        Self { rates }
    }

    /// Returns the rate table in use.
    pub fn rates(&self) -> &PayrollRates {
        &self.rates
    }

    /// Checks every range and sign constraint of the input.
    ///
    /// Returns the first violation, in field order.
    pub fn validate(input: &RegularPayrollInput) -> Result<(), PayrollValidationError> {
        require_positive("hourly rate", input.hourly_rate)?;
        require_non_negative("days worked", input.days_worked)?;
        require_at_most(
            "days worked",
            input.days_worked,
            Decimal::from(MAX_DAYS_WORKED),
        )?;
        require_optional_non_negative("night hours", input.night_hours)?;
        require_optional_non_negative("idle days", input.idle_days)?;
        require_optional_non_negative("travel days", input.travel_days)?;
        require_optional_non_negative("holiday days", input.holiday_days)?;
        require_optional_non_negative("additional payments", input.additional_payments)?;
        require_optional_percent("regional allowance rate", input.regional_allowance_rate)?;
        require_optional_percent("northern allowance rate", input.northern_allowance_rate)?;
        Ok(())
    }

    /// Validates the input and derives every payroll figure.
    ///
    /// Nothing is computed when validation fails. Amounts too large for the
    /// decimal range are reported as [`FieldViolation::AmountTooLarge`].
    ///
    /// [`FieldViolation::AmountTooLarge`]: crate::error::FieldViolation::AmountTooLarge
    pub fn calculate(
        &self,
        input: &RegularPayrollInput,
    ) -> Result<RegularPayrollResult, PayrollValidationError> {
        Self::validate(input)?;

        let rates = &self.rates;
        let hourly_rate = input.hourly_rate;
        let days_worked = input.days_worked;
        let night_hours = input.night_hours.unwrap_or(Decimal::ZERO);
        let idle_days = input.idle_days.unwrap_or(Decimal::ZERO);
        let travel_days = input.travel_days.unwrap_or(Decimal::ZERO);
        let holiday_days = input.holiday_days.unwrap_or(Decimal::ZERO);
        let additional_payments = input.additional_payments.unwrap_or(Decimal::ZERO);
        let regional_allowance_rate = input.regional_allowance_rate.unwrap_or(Decimal::ZERO);
        let northern_allowance_rate = input.northern_allowance_rate.unwrap_or(Decimal::ZERO);

        let hours_by_timesheet = checked_product(
            "hours by timesheet",
            &[days_worked, rates.hours_per_shift_day],
        )?;
        let salary_by_position =
            checked_product("salary by position", &[hours_by_timesheet, hourly_rate])?;
        let holiday_payment = checked_product(
            "holiday payment",
            &[holiday_days, hourly_rate, rates.hours_per_shift_day],
        )?;
        let idle_payment = checked_product(
            "idle payment",
            &[
                idle_days,
                rates.hours_per_shift_day,
                hourly_rate,
                rates.idle_pay_fraction(),
            ],
        )?;
        let travel_payment = checked_product(
            "travel payment",
            &[travel_days, hourly_rate, rates.travel_hours_per_day],
        )?;
        let shift_method_days =
            checked_sum("shift-method compensation", &[days_worked, travel_days])?;
        let shift_method_payment = checked_product(
            "shift-method compensation",
            &[shift_method_days, rates.shift_method_daily_rate],
        )?;
        let night_shift_payment = checked_product(
            "night shift payment",
            &[
                night_hours,
                hourly_rate,
                percent_fraction(rates.night_shift_premium_rate),
            ],
        )?;

        let bonus_base = checked_sum(
            "monthly bonus",
            &[salary_by_position, idle_payment, night_shift_payment],
        )?;
        let monthly_bonus = checked_product(
            "monthly bonus",
            &[bonus_base, percent_fraction(rates.monthly_bonus_rate)],
        )?;

        // Travel and shift-method pay carry no allowances.
        let allowance_base = checked_sum(
            "allowance base",
            &[
                salary_by_position,
                holiday_payment,
                night_shift_payment,
                monthly_bonus,
                idle_payment,
            ],
        )?;
        let regional_allowance = checked_product(
            "regional allowance",
            &[allowance_base, percent_fraction(regional_allowance_rate)],
        )?;
        let northern_allowance = checked_product(
            "northern allowance",
            &[allowance_base, percent_fraction(northern_allowance_rate)],
        )?;

        let total_accrued = checked_sum(
            "total accrued",
            &[
                salary_by_position,
                holiday_payment,
                idle_payment,
                travel_payment,
                shift_method_payment,
                night_shift_payment,
                monthly_bonus,
                regional_allowance,
                northern_allowance,
                additional_payments,
            ],
        )?;

        let taxable_base = total_accrued - shift_method_payment - travel_payment;
        let tax = checked_product("tax", &[taxable_base, percent_fraction(rates.tax_rate)])?;
        let net = total_accrued - tax;

        Ok(RegularPayrollResult {
            hourly_rate,
            days_worked,
            night_hours,
            idle_days,
            travel_days,
            holiday_days,
            additional_payments,
            regional_allowance_rate,
            northern_allowance_rate,
            hours_by_timesheet,
            salary_by_position,
            holiday_payment,
            idle_payment,
            travel_payment,
            shift_method_payment,
            night_shift_payment,
            monthly_bonus,
            regional_allowance,
            northern_allowance,
            total_accrued,
            taxable_base,
            tax,
            net,
            rates: rates.clone(),
        })
    }
}

/// Calculates regular payroll with the spreadsheet's default rate table.
pub fn calculate_regular_payroll(
    input: &RegularPayrollInput,
) -> Result<RegularPayrollResult, PayrollValidationError> {
    RegularPayrollCalculator::default().calculate(input)
}
