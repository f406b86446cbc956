//! # Storage Traits
//!
//! The persistence interface the HTTP layer writes calculation results
//! through. The calculators never touch storage.

use crate::error::EngineResult;

use super::records::{BonusRecord, SalaryRecord, UserIdentity, UserProfile};

/// Default number of records returned by the `recent_*` queries.
pub const DEFAULT_RECORD_LIMIT: usize = 10;

/// Trait defining user profiles and calculation history storage.
///
/// Operations are synchronous; implementations must be safe to share
/// between request handlers.
pub trait PayrollStore: Send + Sync {
    /// Create the user or refresh its names, returning the stored profile
    fn upsert_user(&self, identity: &UserIdentity) -> EngineResult<UserProfile>;

    /// Retrieve a user by id
    fn get_user(&self, user_id: i64) -> EngineResult<Option<UserProfile>>;

    /// Store a regular payroll record
    fn save_salary_record(&self, record: &SalaryRecord) -> EngineResult<()>;

    /// Store an annual bonus record
    fn save_bonus_record(&self, record: &BonusRecord) -> EngineResult<()>;

    /// List a user's salary records, most recent first
    fn recent_salary_records(&self, user_id: i64, limit: usize) -> EngineResult<Vec<SalaryRecord>>;

    /// List a user's bonus records, most recent first
    fn recent_bonus_records(&self, user_id: i64, limit: usize) -> EngineResult<Vec<BonusRecord>>;
}
