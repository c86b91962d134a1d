//! In-memory [`UserDirectory`] used by tests and local runs without a
//! database.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use time::OffsetDateTime;

use super::{DirectoryError, NewUser, UserDirectory, UserRecord};

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    last_seen: HashMap<i64, OffsetDateTime>,
    next_id: i64,
}

#[derive(Default)]
pub struct MemoryDirectory {
    inner: RwLock<Inner>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().users.is_empty()
    }

    pub fn last_seen(&self, id: i64) -> Option<OffsetDateTime> {
        self.inner.read().last_seen.get(&id).copied()
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, DirectoryError> {
        Ok(self.inner.read().users.get(email).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DirectoryError> {
        Ok(self.inner.read().users.contains_key(email))
    }

    async fn create(&self, new_user: NewUser) -> Result<UserRecord, DirectoryError> {
        // Duplicate check and insert under one write lock, so two concurrent
        // registrations for the same email cannot both succeed.
        let mut inner = self.inner.write();
        if inner.users.contains_key(&new_user.email) {
            return Err(DirectoryError::DuplicateEmail);
        }

        inner.next_id += 1;
        let record = UserRecord {
            id: inner.next_id,
            email: new_user.email.clone(),
            password_hash: new_user.password_hash,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            role: new_user.role,
            active: new_user.active,
        };
        inner.users.insert(new_user.email, record.clone());
        Ok(record)
    }

    async fn record_last_seen(&self, id: i64, at: OffsetDateTime) -> Result<(), DirectoryError> {
        self.inner.write().last_seen.insert(id, at);
        Ok(())
    }
}
