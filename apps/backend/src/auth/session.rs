//! Session issuance: login and registration, both ending in a minted token.

use std::time::SystemTime;

use time::OffsetDateTime;
use tokio::task;
use tracing::warn;

use crate::auth::claims::Role;
use crate::auth::{credentials, jwt, password, AuthError};
use crate::directory::{DirectoryError, NewUser, UserDirectory};
use crate::state::security_config::SecurityConfig;

/// Outcome of a successful login or registration.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

/// Verify credentials and mint a token.
pub async fn login(
    directory: &dyn UserDirectory,
    security: &SecurityConfig,
    email: &str,
    plaintext: &str,
) -> Result<Session, AuthError> {
    let user = credentials::authenticate(directory, email, plaintext).await?;

    // Last-seen bookkeeping only; a failure here must not fail the login.
    if let Err(e) = directory
        .record_last_seen(user.id, OffsetDateTime::now_utc())
        .await
    {
        warn!(user_id = user.id, error = %e, "failed to record last seen");
    }

    let token = jwt::issue_token(&user.email, user.role, SystemTime::now(), security)?;

    Ok(Session {
        token,
        display_name: user.display_name(),
        email: user.email,
        role: user.role,
    })
}

/// Register a new account and log it in immediately.
///
/// New accounts always start as active `USER`s. The directory's uniqueness
/// guarantee closes the window between the exists check and the create: if a
/// concurrent registration wins the race, the create itself reports
/// `DuplicateEmail`.
pub async fn register(
    directory: &dyn UserDirectory,
    security: &SecurityConfig,
    email: &str,
    plaintext: &str,
    first_name: &str,
    last_name: &str,
) -> Result<Session, AuthError> {
    if directory.exists_by_email(email).await? {
        return Err(AuthError::DuplicateEmail);
    }

    let cost = security.bcrypt_cost;
    let plaintext = plaintext.to_string();
    let password_hash = task::spawn_blocking(move || password::hash(&plaintext, cost))
        .await
        .map_err(|e| AuthError::Hashing(e.to_string()))??;

    let user = directory
        .create(NewUser {
            email: email.to_string(),
            password_hash,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            role: Role::User,
            active: true,
        })
        .await
        .map_err(|e| match e {
            DirectoryError::DuplicateEmail => AuthError::DuplicateEmail,
            other => AuthError::Directory(other),
        })?;

    let token = jwt::issue_token(&user.email, user.role, SystemTime::now(), security)?;

    Ok(Session {
        token,
        display_name: user.display_name(),
        email: user.email,
        role: user.role,
    })
}
