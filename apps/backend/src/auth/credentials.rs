//! Credential verification against the user directory.

use tokio::task;

use crate::auth::{password, AuthError};
use crate::directory::{UserDirectory, UserRecord};

/// Authenticate an (email, password) pair.
///
/// Unknown email and wrong password both yield `InvalidCredentials`; an
/// inactive account with any password yields `InactiveAccount`. The bcrypt
/// comparison runs on the blocking pool so a slow hash never stalls other
/// requests on the actix workers.
pub async fn authenticate(
    directory: &dyn UserDirectory,
    email: &str,
    plaintext: &str,
) -> Result<UserRecord, AuthError> {
    let user = directory
        .find_by_email(email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !user.active {
        return Err(AuthError::InactiveAccount);
    }

    let plaintext = plaintext.to_string();
    let hash_blob = user.password_hash.clone();
    let matches = task::spawn_blocking(move || password::verify(&plaintext, &hash_blob))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))?;

    if !matches {
        return Err(AuthError::InvalidCredentials);
    }

    Ok(user)
}
