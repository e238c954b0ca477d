//! Domain services
//!
//! Services take their DAOs by constructor and own the pagination, validation
//! and allocation rules on top of them.

use crate::dao::Allocation;
use crate::error::{AppError, AppResult};

pub mod auth;
pub mod building;
pub mod dorm;
pub mod page;
pub mod password;
pub mod student;
pub mod user;

pub use auth::{AuthService, Principal};
pub use building::BuildingService;
pub use dorm::{DormService, Occupancy};
pub use page::ResponsePage;
pub use password::{BcryptHasher, PasswordHasher};
pub use student::StudentService;
pub use user::UserService;

/// Turn a capacity-guarded write into an affected-row count or a tagged error.
fn settle(allocation: Allocation) -> AppResult<u64> {
    match allocation {
        Allocation::Applied(rows) => Ok(rows),
        Allocation::DormFull { dorm_id, max_num } => {
            tracing::warn!("Dorm {} is full (max {}), allocation rejected", dorm_id, max_num);
            Err(AppError::CapacityExceeded { dorm_id, max_num })
        }
        Allocation::DormMissing(dorm_id) => Err(AppError::NotFound(format!("dorm {}", dorm_id))),
    }
}

/// Reject blank required text fields.
fn require(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    Ok(())
}
