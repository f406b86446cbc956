//! Payroll engine for rotational ("shift method") field workers.
//!
//! This crate calculates a worker's monthly pay and their annual
//! ("13th salary") bonus from an hourly rate and a month of shift data,
//! renders both as plain-text reports, keeps a per-user history of the
//! results and scores helicopter flight risk from weather forecasts.
//!
//! # Example
//!
//! ```
//! use rust_decimal::Decimal;
//! use shift_payroll::calculation::calculate_regular_payroll;
//! use shift_payroll::models::RegularPayrollInput;
//!
//! let input = RegularPayrollInput::new(Decimal::from(1000), Decimal::from(15));
//! let result = calculate_regular_payroll(&input).unwrap();
//! assert_eq!(result.total_accrued, Decimal::from(230550));
//! ```

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod storage;
pub mod weather;

pub use error::{EngineError, EngineResult};
