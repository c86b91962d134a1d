//! Signed, time-bounded token codec.
//!
//! Tokens are HS256 JWTs carrying `{sub, role, iat, exp}`. Both directions
//! are pure functions of their arguments plus the process-wide secret in
//! [`SecurityConfig`]: no I/O, no shared mutable state, safe to call from any
//! number of concurrent request handlers.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::{Claims, Role};
use crate::auth::{AuthError, TokenError};
use crate::state::security_config::SecurityConfig;

fn epoch_secs(at: SystemTime) -> Result<i64, AuthError> {
    at.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|_| AuthError::Issuance("clock is before the unix epoch".to_string()))
}

/// Mint a token for `email` with the configured TTL, pinned to the configured
/// algorithm.
pub fn issue_token(
    email: &str,
    role: Role,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AuthError> {
    let iat = epoch_secs(now)?;
    let exp = iat + security.token_ttl.as_secs() as i64;

    let claims = Claims {
        sub: email.to_string(),
        role,
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AuthError::Issuance(e.to_string()))
}

/// Verify a token and return its claims.
///
/// `now` is sampled once by the caller and used for the entire expiry check,
/// so a decode observing `now >= exp` always rejects deterministically. The
/// library-side expiry validation is disabled in favor of that explicit check.
pub fn decode_token(
    token: &str,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(security.algorithm);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let now_secs = now
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0);
    if now_secs >= data.claims.exp {
        return Err(TokenError::Expired);
    }

    Ok(data.claims)
}
