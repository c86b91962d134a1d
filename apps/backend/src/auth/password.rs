//! One-way, salted password hashing.
//!
//! bcrypt embeds a per-call random salt and the cost factor in the blob, so
//! each call is self-contained and the module needs no state. Hashing is
//! deliberately slow; callers on the async runtime must dispatch through
//! `spawn_blocking` (see [`crate::auth::credentials`] and
//! [`crate::auth::session`]).

use crate::auth::AuthError;

/// Hash a plaintext password with a fresh random salt at the given cost.
pub fn hash(plaintext: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(plaintext, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// Verify a plaintext password against a stored blob.
///
/// Never errors: a malformed or truncated blob verifies as `false`. The
/// underlying comparison is constant-time.
pub fn verify(plaintext: &str, hash_blob: &str) -> bool {
    bcrypt::verify(plaintext, hash_blob).unwrap_or(false)
}
