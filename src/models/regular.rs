//! Input and result records for the regular (per work period) payroll.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollRates;

/// Everything a worker reports for one work period.
///
/// Optional fields left as `None` resolve to zero inside the calculator;
/// there are no hidden global defaults.
///
/// # Example
///
/// ```
/// use shift_payroll::models::RegularPayrollInput;
/// use rust_decimal::Decimal;
///
/// let input = RegularPayrollInput::new(Decimal::from(1000), Decimal::from(15))
///     .with_night_hours(Decimal::from(20));
/// assert_eq!(input.night_hours, Some(Decimal::from(20)));
/// assert_eq!(input.idle_days, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularPayrollInput {
    /// Pay per timesheet hour. Must be greater than zero.
    pub hourly_rate: Decimal,
    /// Shift days worked in the period, 0 to 365.
    pub days_worked: Decimal,
    /// Hours worked at night.
    #[serde(default)]
    pub night_hours: Option<Decimal>,
    /// Days on site without work (e.g. weather delay).
    #[serde(default)]
    pub idle_days: Option<Decimal>,
    /// Days spent travelling to or from the site.
    #[serde(default)]
    pub travel_days: Option<Decimal>,
    /// Public holidays worked.
    #[serde(default)]
    pub holiday_days: Option<Decimal>,
    /// Other bonuses and payments, taxed in full.
    #[serde(default)]
    pub additional_payments: Option<Decimal>,
    /// Regional allowance, percent.
    #[serde(default)]
    pub regional_allowance_rate: Option<Decimal>,
    /// Northern allowance, percent.
    #[serde(default)]
    pub northern_allowance_rate: Option<Decimal>,
}

impl RegularPayrollInput {
    /// Creates an input with only the required fields set.
    pub fn new(hourly_rate: Decimal, days_worked: Decimal) -> Self {
        Self {
            hourly_rate,
            days_worked,
            night_hours: None,
            idle_days: None,
            travel_days: None,
            holiday_days: None,
            additional_payments: None,
            regional_allowance_rate: None,
            northern_allowance_rate: None,
        }
    }

    /// Sets the night hours.
    pub fn with_night_hours(mut self, hours: Decimal) -> Self {
        self.night_hours = Some(hours);
        self
    }

    /// Sets the idle days.
    pub fn with_idle_days(mut self, days: Decimal) -> Self {
        self.idle_days = Some(days);
        self
    }

    /// Sets the travel days.
    pub fn with_travel_days(mut self, days: Decimal) -> Self {
        self.travel_days = Some(days);
        self
    }

    /// Sets the holiday days.
    pub fn with_holiday_days(mut self, days: Decimal) -> Self {
        self.holiday_days = Some(days);
        self
    }

    /// Sets the additional payments.
    pub fn with_additional_payments(mut self, amount: Decimal) -> Self {
        self.additional_payments = Some(amount);
        self
    }

    /// Sets the regional and northern allowance percentages.
    pub fn with_allowances(mut self, regional: Decimal, northern: Decimal) -> Self {
        self.regional_allowance_rate = Some(regional);
        self.northern_allowance_rate = Some(northern);
        self
    }
}

/// The outcome of a regular payroll calculation.
///
/// Echoes every input (with defaults resolved) next to every derived value,
/// at full decimal precision. Round with
/// [`round_currency`](crate::calculation::round_currency) for display or
/// storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegularPayrollResult {
    /// Pay per timesheet hour.
    pub hourly_rate: Decimal,
    /// Shift days worked.
    pub days_worked: Decimal,
    /// Night hours.
    pub night_hours: Decimal,
    /// Idle days.
    pub idle_days: Decimal,
    /// Travel days.
    pub travel_days: Decimal,
    /// Holiday days.
    pub holiday_days: Decimal,
    /// Other payments.
    pub additional_payments: Decimal,
    /// Regional allowance, percent.
    pub regional_allowance_rate: Decimal,
    /// Northern allowance, percent.
    pub northern_allowance_rate: Decimal,

    /// Days worked times hours per shift day.
    pub hours_by_timesheet: Decimal,
    /// Timesheet hours times the hourly rate.
    pub salary_by_position: Decimal,
    /// Holiday supplement.
    pub holiday_payment: Decimal,
    /// Reduced pay for idle days.
    pub idle_payment: Decimal,
    /// Pay for travel days (tax exempt).
    pub travel_payment: Decimal,
    /// Shift-method compensation (tax exempt).
    pub shift_method_payment: Decimal,
    /// Night premium.
    pub night_shift_payment: Decimal,
    /// Monthly bonus.
    pub monthly_bonus: Decimal,
    /// Regional allowance amount.
    pub regional_allowance: Decimal,
    /// Northern allowance amount.
    pub northern_allowance: Decimal,
    /// Sum of every accrual.
    pub total_accrued: Decimal,
    /// Accruals subject to income tax.
    pub taxable_base: Decimal,
    /// Income tax withheld.
    pub tax: Decimal,
    /// Take-home pay.
    pub net: Decimal,

    /// The rate table the figures were computed with.
    pub rates: PayrollRates,
}
