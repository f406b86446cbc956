//! Core data models for the payroll engine.
//!
//! Input records carry optional fields as `Option`; result records echo the
//! resolved inputs together with every intermediate value.

mod annual;
mod regular;

pub use annual::{AnnualBonusInput, AnnualBonusResult, MonthBreakdown};
pub use regular::{RegularPayrollInput, RegularPayrollResult};
