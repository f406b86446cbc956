//! Plain-text renderings of payroll results.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::calculation::round_currency;
use crate::models::{AnnualBonusResult, RegularPayrollResult};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the English name of a 1-based month number.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .copied()
        .unwrap_or("Unknown")
}

fn money(value: Decimal) -> String {
    round_currency(value).to_string()
}

fn fixed(value: Decimal, places: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(places);
    rounded.to_string()
}

fn count(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Renders a regular payroll result.
///
/// Holiday, idle, travel, night, bonus, allowance and additional-payment
/// lines appear only when their amount is non-zero.
///
/// # Examples
///
/// ```
/// use shift_payroll::calculation::calculate_regular_payroll;
/// use shift_payroll::models::RegularPayrollInput;
/// use shift_payroll::report::format_regular_payroll_report;
/// use rust_decimal::Decimal;
///
/// let input = RegularPayrollInput::new(Decimal::from(1000), Decimal::from(15));
/// let report = format_regular_payroll_report(&calculate_regular_payroll(&input).unwrap());
/// assert!(report.ends_with("Net pay: 202021.50"));
/// ```
pub fn format_regular_payroll_report(result: &RegularPayrollResult) -> String {
    let rates = &result.rates;
    let mut lines = vec![
        "Payroll calculation (shift method)".to_string(),
        String::new(),
        format!("Hourly rate: {} per hour", money(result.hourly_rate)),
        format!("Days worked: {}", count(result.days_worked)),
    ];
    if !result.idle_days.is_zero() {
        lines.push(format!("Idle days: {}", count(result.idle_days)));
    }
    lines.push(format!(
        "Timesheet hours: {}",
        fixed(result.hours_by_timesheet, 1)
    ));
    lines.push(String::new());

    lines.push("Accruals:".to_string());
    lines.push(format!(
        "Salary by position: {}",
        money(result.salary_by_position)
    ));
    if !result.holiday_payment.is_zero() {
        lines.push(format!(
            "Holiday supplement ({} days): {}",
            count(result.holiday_days),
            money(result.holiday_payment)
        ));
    }
    if !result.idle_payment.is_zero() {
        lines.push(format!(
            "Idle pay ({} days): {}",
            count(result.idle_days),
            money(result.idle_payment)
        ));
    }
    if !result.travel_payment.is_zero() {
        lines.push(format!(
            "Travel pay ({} days): {}",
            count(result.travel_days),
            money(result.travel_payment)
        ));
    }
    lines.push(format!(
        "Shift-method compensation: {}",
        money(result.shift_method_payment)
    ));
    if !result.night_shift_payment.is_zero() {
        lines.push(format!(
            "Night shift premium ({} h): {}",
            fixed(result.night_hours, 1),
            money(result.night_shift_payment)
        ));
    }
    if !result.monthly_bonus.is_zero() {
        lines.push(format!(
            "Monthly bonus ({}%): {}",
            fixed(rates.monthly_bonus_rate, 1),
            money(result.monthly_bonus)
        ));
    }
    if !result.regional_allowance.is_zero() {
        lines.push(format!(
            "Regional allowance ({}%): {}",
            fixed(result.regional_allowance_rate, 1),
            money(result.regional_allowance)
        ));
    }
    if !result.northern_allowance.is_zero() {
        lines.push(format!(
            "Northern allowance ({}%): {}",
            fixed(result.northern_allowance_rate, 1),
            money(result.northern_allowance)
        ));
    }
    if !result.additional_payments.is_zero() {
        lines.push(format!(
            "Additional payments: {}",
            money(result.additional_payments)
        ));
    }
    lines.push(String::new());

    lines.push(format!("Total accrued: {}", money(result.total_accrued)));
    lines.push(format!(
        "Tax ({}%): {}",
        fixed(rates.tax_rate, 1),
        money(result.tax)
    ));
    lines.push(format!("Net pay: {}", money(result.net)));

    lines.join("\n")
}

/// Renders an annual bonus result.
///
/// Only months with shift days are listed; allowance lines appear only when
/// their amount is non-zero.
pub fn format_annual_bonus_report(result: &AnnualBonusResult) -> String {
    let mut lines = vec![
        "Annual bonus calculation (13th salary)".to_string(),
        String::new(),
        format!("Hourly rate: {} per hour", money(result.hourly_rate)),
        format!("Months in company this year: {}", result.months_in_company),
        format!(
            "Average monthly bonus rate: {}%",
            fixed(result.monthly_bonus_rate, 1)
        ),
        format!(
            "Target annual bonus rate: {}%",
            fixed(result.target_annual_bonus_rate, 2)
        ),
        format!("KPI coefficient: {}", fixed(result.kpi_coefficient, 2)),
        format!(
            "Correction coefficient: {}",
            fixed(result.correction_coefficient, 2)
        ),
        String::new(),
        "Months:".to_string(),
    ];
    for month in result.months.iter().filter(|m| !m.days.is_zero()) {
        lines.push(format!(
            "{}: {} days, {} h, base {}",
            month_name(month.month),
            count(month.days),
            fixed(month.hours, 1),
            money(month.base)
        ));
    }
    lines.push(String::new());

    lines.push(format!(
        "Average monthly base: {}",
        money(result.average_monthly_base)
    ));
    lines.push(format!("Annual base: {}", money(result.annual_base)));
    lines.push(String::new());

    lines.push(format!(
        "Annual reward without allowances: {}",
        money(result.annual_reward_without_allowances)
    ));
    if !result.regional_allowance.is_zero() {
        lines.push(format!(
            "Regional allowance ({}%): {}",
            fixed(result.regional_allowance_rate, 1),
            money(result.regional_allowance)
        ));
    }
    if !result.northern_allowance.is_zero() {
        lines.push(format!(
            "Northern allowance ({}%): {}",
            fixed(result.northern_allowance_rate, 1),
            money(result.northern_allowance)
        ));
    }
    lines.push(String::new());

    lines.push(format!("Total accrued: {}", money(result.total_accrued)));
    lines.push(format!(
        "Tax ({}%): {}",
        fixed(result.rates.tax_rate, 1),
        money(result.tax)
    ));
    lines.push(format!("Annual bonus net: {}", money(result.net)));

    lines.join("\n")
}
