//! Human-readable reports.
//!
//! Every formatter is a pure function of its input: identical results always
//! render to identical text.

mod payroll;
mod weather;

pub use payroll::{format_annual_bonus_report, format_regular_payroll_report, month_name};
pub use weather::{format_flight_forecast_report, format_weekly_forecast_report};
