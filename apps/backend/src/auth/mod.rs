//! Stateless authentication core: password hashing, token codec, credential
//! verification, session issuance, and the route access policy.
//!
//! Nothing in here performs I/O except through the [`crate::directory`] seam,
//! and nothing holds mutable state across requests. Token validity is purely
//! cryptographic and time-based; there is no server-side session record, so a
//! token issued before an account is deactivated stays valid until it expires.

use thiserror::Error;

use crate::directory::DirectoryError;
use crate::error::AppError;
use crate::state::security_config::CredentialErrorPolicy;

pub mod claims;
pub mod credentials;
pub mod jwt;
pub mod password;
pub mod policy;
pub mod principal;
pub mod session;

/// Why a token failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
}

/// Terminal, per-request authentication outcomes. None of these are retried.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("inactive account")]
    InactiveAccount,
    #[error("email already registered")]
    DuplicateEmail,
    #[error("insufficient role")]
    InsufficientRole,
    #[error(transparent)]
    Token(#[from] TokenError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("token issuance failed: {0}")]
    Issuance(String),
}

impl AuthError {
    /// Map a terminal auth outcome to its client-facing HTTP error.
    ///
    /// `policy` controls credential-failure disclosure: `Distinct` preserves
    /// separate invalid-credentials / inactive-account responses (the legacy
    /// behavior, which leaks account state); `Generic` collapses both into one
    /// response while the real category still reaches internal logs.
    pub fn into_app_error(self, policy: CredentialErrorPolicy) -> AppError {
        match self {
            AuthError::InvalidCredentials => match policy {
                CredentialErrorPolicy::Distinct => AppError::invalid_credentials(),
                CredentialErrorPolicy::Generic => {
                    tracing::warn!(category = "invalid_credentials", "authentication failed");
                    AppError::authentication_failed()
                }
            },
            AuthError::InactiveAccount => match policy {
                CredentialErrorPolicy::Distinct => AppError::inactive_account(),
                CredentialErrorPolicy::Generic => {
                    tracing::warn!(category = "inactive_account", "authentication failed");
                    AppError::authentication_failed()
                }
            },
            AuthError::DuplicateEmail => AppError::conflict(
                "DUPLICATE_EMAIL",
                "Email is already registered".to_string(),
            ),
            AuthError::InsufficientRole => AppError::forbidden(),
            AuthError::Token(TokenError::Malformed) => AppError::unauthorized_malformed_token(),
            AuthError::Token(TokenError::InvalidSignature) => {
                AppError::unauthorized_invalid_signature()
            }
            AuthError::Token(TokenError::Expired) => AppError::unauthorized_expired_token(),
            AuthError::Directory(DirectoryError::DuplicateEmail) => AppError::conflict(
                "DUPLICATE_EMAIL",
                "Email is already registered".to_string(),
            ),
            AuthError::Directory(e) => {
                // Driver/SQL text stays in the logs, not in the response.
                tracing::error!(error = %e, "user directory failure");
                AppError::db("User directory unavailable".to_string())
            }
            AuthError::Hashing(detail) => AppError::internal(detail),
            AuthError::Issuance(detail) => AppError::internal(detail),
        }
    }
}
