//! Token minting helpers for tests.

use std::time::{Duration, SystemTime};

use backend::auth::jwt::issue_token;
use backend::state::security_config::SecurityConfig;
use backend::Role;

/// Mint a valid token for the given email and role.
pub fn mint_test_token(email: &str, role: Role, sec: &SecurityConfig) -> String {
    issue_token(email, role, SystemTime::now(), sec).expect("should mint token successfully")
}

/// Full Authorization header value including the "Bearer " prefix.
pub fn bearer_header(email: &str, role: Role, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(email, role, sec))
}

/// Mint a token that is already past its expiry.
pub fn mint_expired_token(email: &str, role: Role, sec: &SecurityConfig) -> String {
    let past = SystemTime::now()
        .checked_sub(sec.token_ttl + Duration::from_secs(3600))
        .expect("clock far enough from epoch");
    issue_token(email, role, past, sec).expect("should mint expired token successfully")
}
