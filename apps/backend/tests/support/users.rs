//! Directory seeding helpers for tests.

use backend::auth::password;
use backend::directory::memory::MemoryDirectory;
use backend::directory::{NewUser, UserDirectory, UserRecord};
use backend::Role;

/// Minimum bcrypt cost keeps the suite fast.
pub const TEST_BCRYPT_COST: u32 = 4;

pub async fn seed_user(
    directory: &MemoryDirectory,
    email: &str,
    pw: &str,
    role: Role,
    active: bool,
) -> UserRecord {
    directory
        .create(NewUser {
            email: email.to_string(),
            password_hash: password::hash(pw, TEST_BCRYPT_COST).expect("hash seed password"),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            role,
            active,
        })
        .await
        .expect("seed user")
}
