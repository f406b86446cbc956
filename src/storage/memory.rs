//! In-process store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::records::{BonusRecord, SalaryRecord, UserIdentity, UserProfile};
use super::traits::PayrollStore;

/// Keeps users and records in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    users: RwLock<HashMap<i64, UserProfile>>,
    salary_records: RwLock<Vec<SalaryRecord>>,
    bonus_records: RwLock<Vec<BonusRecord>>,
}

fn read<T>(lock: &RwLock<T>) -> EngineResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| EngineError::Storage {
        message: "store lock poisoned".to_string(),
    })
}

fn write<T>(lock: &RwLock<T>) -> EngineResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| EngineError::Storage {
        message: "store lock poisoned".to_string(),
    })
}

/// Newest first; records saved later win ties.
fn most_recent<R: Clone>(
    records: &[R],
    belongs: impl Fn(&R) -> bool,
    created_at: impl Fn(&R) -> DateTime<Utc>,
    limit: usize,
) -> Vec<R> {
    let mut matching: Vec<R> = records.iter().rev().filter(|r| belongs(r)).cloned().collect();
    matching.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    matching.truncate(limit);
    matching
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PayrollStore for InMemoryStore {
    fn upsert_user(&self, identity: &UserIdentity) -> EngineResult<UserProfile> {
        let mut users = write(&self.users)?;
        let now = Utc::now();

        let profile = match users.get_mut(&identity.user_id) {
            Some(existing) => {
                if existing.identity != *identity {
                    existing.identity = identity.clone();
                    existing.updated_at = now;
                    debug!(user_id = identity.user_id, "Updated user");
                }
                existing.clone()
            }
            None => {
                let profile = UserProfile {
                    identity: identity.clone(),
                    created_at: now,
                    updated_at: now,
                };
                users.insert(identity.user_id, profile.clone());
                info!(user_id = identity.user_id, "Created user");
                profile
            }
        };
        Ok(profile)
    }

    fn get_user(&self, user_id: i64) -> EngineResult<Option<UserProfile>> {
        Ok(read(&self.users)?.get(&user_id).cloned())
    }

    fn save_salary_record(&self, record: &SalaryRecord) -> EngineResult<()> {
        write(&self.salary_records)?.push(record.clone());
        Ok(())
    }

    fn save_bonus_record(&self, record: &BonusRecord) -> EngineResult<()> {
        write(&self.bonus_records)?.push(record.clone());
        Ok(())
    }

    fn recent_salary_records(&self, user_id: i64, limit: usize) -> EngineResult<Vec<SalaryRecord>> {
        let records = read(&self.salary_records)?;
        Ok(most_recent(
            &records,
            |r| r.user_id == user_id,
            |r| r.created_at,
            limit,
        ))
    }

    fn recent_bonus_records(&self, user_id: i64, limit: usize) -> EngineResult<Vec<BonusRecord>> {
        let records = read(&self.bonus_records)?;
        Ok(most_recent(
            &records,
            |r| r.user_id == user_id,
            |r| r.created_at,
            limit,
        ))
    }
}
