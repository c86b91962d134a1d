//! Process-wide security configuration.
//!
//! Loaded once at startup into an immutable value and shared by reference
//! across all request handlers; nothing in here is mutated afterwards.

use std::env;
use std::time::Duration;

use jsonwebtoken::Algorithm;

use crate::error::AppError;

const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

/// How credential failures are disclosed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialErrorPolicy {
    /// Separate invalid-credentials / inactive-account responses. Matches
    /// the legacy behavior but lets a caller probe account existence and
    /// state; the higher-risk choice.
    Distinct,
    /// One generic authentication-failed response; the real category is
    /// only visible in internal logs.
    Generic,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret for signing and verifying tokens. Provided out-of-band, never
    /// hardcoded.
    pub jwt_secret: Vec<u8>,
    /// Signing algorithm, pinned on both issue and decode.
    pub algorithm: Algorithm,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
    pub credential_error_policy: CredentialErrorPolicy,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            token_ttl: Duration::from_secs(DEFAULT_TOKEN_TTL_SECS),
            bcrypt_cost: bcrypt::DEFAULT_COST,
            credential_error_policy: CredentialErrorPolicy::Distinct,
        }
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }

    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    pub fn with_credential_error_policy(mut self, policy: CredentialErrorPolicy) -> Self {
        self.credential_error_policy = policy;
        self
    }

    /// Read the full configuration from the environment.
    ///
    /// `BACKEND_JWT_SECRET` is required; `AUTH_TOKEN_TTL_SECS`,
    /// `AUTH_BCRYPT_COST` and `AUTH_ERROR_DISCLOSURE` (`distinct`|`generic`)
    /// are optional.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = env::var("BACKEND_JWT_SECRET")
            .map_err(|_| AppError::config("BACKEND_JWT_SECRET must be set".to_string()))?;

        let mut config = Self::new(secret.as_bytes());

        if let Ok(raw) = env::var("AUTH_TOKEN_TTL_SECS") {
            let secs = raw.parse::<u64>().map_err(|_| {
                AppError::config("AUTH_TOKEN_TTL_SECS must be a number of seconds".to_string())
            })?;
            config.token_ttl = Duration::from_secs(secs);
        }

        if let Ok(raw) = env::var("AUTH_BCRYPT_COST") {
            config.bcrypt_cost = parse_bcrypt_cost(&raw)?;
        }

        if let Ok(raw) = env::var("AUTH_ERROR_DISCLOSURE") {
            config.credential_error_policy = match raw.as_str() {
                "distinct" => CredentialErrorPolicy::Distinct,
                "generic" => CredentialErrorPolicy::Generic,
                other => {
                    return Err(AppError::config(format!(
                        "AUTH_ERROR_DISCLOSURE must be 'distinct' or 'generic', got {other:?}"
                    )))
                }
            };
        }

        Ok(config)
    }
}

/// bcrypt only accepts costs in 4..=31; anything else must fail at startup,
/// not on the first registration.
fn parse_bcrypt_cost(raw: &str) -> Result<u32, AppError> {
    let cost = raw
        .parse::<u32>()
        .map_err(|_| AppError::config("AUTH_BCRYPT_COST must be an integer".to_string()))?;
    if !(4..=31).contains(&cost) {
        return Err(AppError::config(format!(
            "AUTH_BCRYPT_COST must be between 4 and 31, got {cost}"
        )));
    }
    Ok(cost)
}
