//! The user directory seam.
//!
//! The auth core reads user records through this narrow capability and asks
//! it to create one during registration; everything else about persistence
//! lives behind it. Implementations must make the uniqueness check and the
//! create effectively atomic so concurrent registrations for one email cannot
//! both succeed (the sea-orm adapter leans on the unique index, the in-memory
//! one on its write lock).

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::auth::claims::Role;

pub mod memory;
pub mod sea;

/// A stored user, as the auth core sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub active: bool,
}

impl UserRecord {
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// Input for creating a user during registration.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub active: bool,
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("corrupt user record: {0}")]
    Corrupt(String),
    #[error("user directory unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Exact-match lookup by email, case-sensitive as stored.
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DirectoryError>;

    async fn exists_by_email(&self, email: &str) -> Result<bool, DirectoryError>;

    /// Create a user. Fails with [`DirectoryError::DuplicateEmail`] if the
    /// email is taken, including when a concurrent create won the race.
    async fn create(&self, new_user: NewUser) -> Result<UserRecord, DirectoryError>;

    /// Record a successful login. Not part of the auth correctness contract;
    /// callers treat failures as non-fatal.
    async fn record_last_seen(&self, id: i64, at: OffsetDateTime) -> Result<(), DirectoryError>;
}
