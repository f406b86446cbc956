//! Input and result records for the annual bonus (13th salary).

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::AnnualBonusRates;

/// Everything a worker reports for the annual bonus.
///
/// `monthly_days` maps the month number (1 = January) to days on shift and
/// must hold all twelve months. `target_annual_bonus_rate` is optional only
/// so a dialogue can collect it late; calculating without it fails.
///
/// # Example
///
/// ```
/// use shift_payroll::models::AnnualBonusInput;
/// use rust_decimal::Decimal;
///
/// let input = AnnualBonusInput::new(
///     Decimal::from(1000),
///     12,
///     AnnualBonusInput::uniform_days(Decimal::from(20)),
/// )
/// .with_target_rate(Decimal::from(20));
/// assert_eq!(input.monthly_days.len(), 12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualBonusInput {
    /// Pay per timesheet hour. Must be greater than zero.
    pub hourly_rate: Decimal,
    /// Months employed this year, 1 to 12.
    pub months_in_company: u32,
    /// Days on shift per month, keyed 1..=12.
    pub monthly_days: BTreeMap<u32, Decimal>,
    /// Average monthly bonus over the year, percent.
    #[serde(default)]
    pub monthly_bonus_rate: Option<Decimal>,
    /// Target annual bonus for the position, percent. Required.
    #[serde(default)]
    pub target_annual_bonus_rate: Option<Decimal>,
    /// Performance (KPI) multiplier.
    #[serde(default)]
    pub kpi_coefficient: Option<Decimal>,
    /// Disciplinary correction multiplier.
    #[serde(default)]
    pub correction_coefficient: Option<Decimal>,
    /// Regional allowance, percent.
    #[serde(default)]
    pub regional_allowance_rate: Option<Decimal>,
    /// Northern allowance, percent.
    #[serde(default)]
    pub northern_allowance_rate: Option<Decimal>,
}

impl AnnualBonusInput {
    /// Creates an input with the required fields; the target rate is unset.
    pub fn new(
        hourly_rate: Decimal,
        months_in_company: u32,
        monthly_days: BTreeMap<u32, Decimal>,
    ) -> Self {
        Self {
            hourly_rate,
            months_in_company,
            monthly_days,
            monthly_bonus_rate: None,
            target_annual_bonus_rate: None,
            kpi_coefficient: None,
            correction_coefficient: None,
            regional_allowance_rate: None,
            northern_allowance_rate: None,
        }
    }

    /// Builds a twelve-month mapping from January..December values.
    pub fn days_by_month(days: [Decimal; 12]) -> BTreeMap<u32, Decimal> {
        (1..=12).zip(days).collect()
    }

    /// Builds a twelve-month mapping with the same days in every month.
    pub fn uniform_days(days: Decimal) -> BTreeMap<u32, Decimal> {
        Self::days_by_month([days; 12])
    }

    /// Sets the target annual bonus rate.
    pub fn with_target_rate(mut self, rate: Decimal) -> Self {
        self.target_annual_bonus_rate = Some(rate);
        self
    }

    /// Sets the monthly bonus rate.
    pub fn with_monthly_bonus_rate(mut self, rate: Decimal) -> Self {
        self.monthly_bonus_rate = Some(rate);
        self
    }

    /// Sets the KPI and correction coefficients.
    pub fn with_coefficients(mut self, kpi: Decimal, correction: Decimal) -> Self {
        self.kpi_coefficient = Some(kpi);
        self.correction_coefficient = Some(correction);
        self
    }

    /// Sets the regional and northern allowance percentages.
    pub fn with_allowances(mut self, regional: Decimal, northern: Decimal) -> Self {
        self.regional_allowance_rate = Some(regional);
        self.northern_allowance_rate = Some(northern);
        self
    }
}

/// Derived figures for one month of the bonus year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthBreakdown {
    /// Month number, 1 = January.
    pub month: u32,
    /// Days on shift.
    pub days: Decimal,
    /// Timesheet hours.
    pub hours: Decimal,
    /// Pay by position.
    pub salary: Decimal,
    /// Monthly bonus portion.
    pub bonus: Decimal,
    /// Salary plus bonus; the month's contribution to the bonus base.
    pub base: Decimal,
}

/// The outcome of an annual bonus calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnualBonusResult {
    /// Pay per timesheet hour.
    pub hourly_rate: Decimal,
    /// Months employed this year.
    pub months_in_company: u32,
    /// Monthly bonus percent used.
    pub monthly_bonus_rate: Decimal,
    /// Target annual bonus percent.
    pub target_annual_bonus_rate: Decimal,
    /// KPI multiplier used.
    pub kpi_coefficient: Decimal,
    /// Correction multiplier used.
    pub correction_coefficient: Decimal,
    /// Regional allowance percent used.
    pub regional_allowance_rate: Decimal,
    /// Northern allowance percent used.
    pub northern_allowance_rate: Decimal,

    /// January..December breakdown, always twelve entries.
    pub months: Vec<MonthBreakdown>,
    /// Sum of monthly bases divided by months in company.
    pub average_monthly_base: Decimal,
    /// Average monthly base annualised.
    pub annual_base: Decimal,
    /// Bonus before regional and northern allowances.
    pub annual_reward_without_allowances: Decimal,
    /// Regional allowance amount.
    pub regional_allowance: Decimal,
    /// Northern allowance amount.
    pub northern_allowance: Decimal,
    /// Reward plus allowances.
    pub total_accrued: Decimal,
    /// Income tax withheld.
    pub tax: Decimal,
    /// Take-home bonus.
    pub net: Decimal,

    /// The rate table the figures were computed with.
    pub rates: AnnualBonusRates,
}
