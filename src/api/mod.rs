//! HTTP API for the payroll engine.
//!
//! Exposes both calculators, the per-user calculation history and the
//! helicopter flight forecasts as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnnualBonusRequest, RecordsQuery, RegularPayrollRequest};
pub use response::{
    ApiError, ApiErrorResponse, CalculationResponse, ForecastReport, PayrollRecordsResponse,
};
pub use state::AppState;
