//! Password hashing
//!
//! bcrypt behind a small trait so the auth service can be tested without
//! paying for real hashing.

use crate::error::AppResult;

#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// One-way hash of `password`
    fn hash(&self, password: &str) -> AppResult<String>;

    /// Whether `password` matches `hash`; malformed hashes never match
    fn verify(&self, password: &str, hash: &str) -> bool;
}

/// bcrypt with a configurable cost
#[derive(Clone, Copy, Debug)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, password: &str) -> AppResult<String> {
        Ok(bcrypt::hash(password, self.cost)?)
    }

    fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}
