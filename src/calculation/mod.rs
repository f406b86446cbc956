//! Calculation logic for the payroll engine.
//!
//! This module contains the regular payroll and annual bonus calculators,
//! the numeric validation routines they share, and currency rounding.
//! Every calculation is a pure function of its input record.

mod annual_bonus;
mod regular_payroll;
mod rounding;
mod validation;

pub use annual_bonus::{
    AnnualBonusCalculator, MAX_DAYS_IN_MONTH, MONTHS_IN_YEAR, calculate_annual_bonus,
};
pub use regular_payroll::{MAX_DAYS_WORKED, RegularPayrollCalculator, calculate_regular_payroll};
pub use rounding::{CURRENCY_DECIMAL_PLACES, percent_fraction, round_currency};
