//! Request types for the payroll API.

use serde::{Deserialize, Serialize};

use crate::models::{AnnualBonusInput, RegularPayrollInput};
use crate::storage::UserIdentity;

/// Request body for `POST /payroll/regular`.
///
/// `input` holds the calculator fields; when the optional `user` is given
/// the result is saved to their history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegularPayrollRequest {
    pub input: RegularPayrollInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserIdentity>,
}

/// Request body for `POST /payroll/annual-bonus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnualBonusRequest {
    pub input: AnnualBonusInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserIdentity>,
}

/// Query string of `GET /users/:user_id/payroll-records`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordsQuery {
    /// Maximum records of each kind; defaults to ten.
    #[serde(default)]
    pub limit: Option<usize>,
}
