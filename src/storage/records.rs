//! Persisted rows.
//!
//! Money columns are rounded to whole cents when a record is built; the
//! full-precision results never reach storage.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculation::round_currency;
use crate::models::{AnnualBonusResult, RegularPayrollResult};

/// Who asked for a calculation, as reported by the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub user_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl UserIdentity {
    pub fn new(user_id: i64) -> Self {
        Self {
            user_id,
            username: None,
            first_name: None,
            last_name: None,
        }
    }
}

/// A stored user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(flatten)]
    pub identity: UserIdentity,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored regular payroll calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// The calculation this record was produced by.
    pub id: Uuid,
    pub user_id: i64,
    pub hours_worked: Decimal,
    pub base_salary: Decimal,
    pub bonus: Decimal,
    pub gross: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
    pub created_at: DateTime<Utc>,
}

impl SalaryRecord {
    pub fn from_result(
        id: Uuid,
        user_id: i64,
        result: &RegularPayrollResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            hours_worked: result.hours_by_timesheet.normalize(),
            base_salary: round_currency(result.salary_by_position),
            bonus: round_currency(result.monthly_bonus),
            gross: round_currency(result.total_accrued),
            tax: round_currency(result.tax),
            net: round_currency(result.net),
            created_at,
        }
    }
}

/// A stored annual bonus calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusRecord {
    pub id: Uuid,
    pub user_id: i64,
    pub months_in_company: u32,
    pub annual_base: Decimal,
    pub reward: Decimal,
    pub gross: Decimal,
    pub tax: Decimal,
    pub net: Decimal,
    pub created_at: DateTime<Utc>,
}

impl BonusRecord {
    pub fn from_result(
        id: Uuid,
        user_id: i64,
        result: &AnnualBonusResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            months_in_company: result.months_in_company,
            annual_base: round_currency(result.annual_base),
            reward: round_currency(result.annual_reward_without_allowances),
            gross: round_currency(result.total_accrued),
            tax: round_currency(result.tax),
            net: round_currency(result.net),
            created_at,
        }
    }
}
