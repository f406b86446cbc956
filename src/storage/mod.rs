//! Persistence of users and calculation history.

mod memory;
mod records;
mod traits;

pub use memory::InMemoryStore;
pub use records::{BonusRecord, SalaryRecord, UserIdentity, UserProfile};
pub use traits::{DEFAULT_RECORD_LIMIT, PayrollStore};
