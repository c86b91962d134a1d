use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use thiserror::Error;

use crate::trace_ctx;

#[derive(Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
    pub code: String,
    pub trace_id: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {detail}")]
    BadRequest { code: &'static str, detail: String },
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Inactive account")]
    InactiveAccount,
    #[error("Authentication failed")]
    AuthenticationFailed,
    #[error("UnauthorizedMissingBearer")]
    UnauthorizedMissingBearer,
    #[error("UnauthorizedMalformedToken")]
    UnauthorizedMalformedToken,
    #[error("UnauthorizedInvalidSignature")]
    UnauthorizedInvalidSignature,
    #[error("UnauthorizedExpiredToken")]
    UnauthorizedExpiredToken,
    #[error("Forbidden")]
    Forbidden,
    #[error("Conflict: {detail}")]
    Conflict { code: &'static str, detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Stable machine-readable code, also rendered into ProblemDetails.
    pub fn code(&self) -> String {
        match self {
            AppError::BadRequest { code, .. } => code.to_string(),
            AppError::InvalidCredentials => "INVALID_CREDENTIALS".to_string(),
            AppError::InactiveAccount => "INACTIVE_ACCOUNT".to_string(),
            AppError::AuthenticationFailed => "AUTHENTICATION_FAILED".to_string(),
            AppError::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER".to_string(),
            AppError::UnauthorizedMalformedToken => "UNAUTHORIZED_MALFORMED_TOKEN".to_string(),
            AppError::UnauthorizedInvalidSignature => {
                "UNAUTHORIZED_INVALID_SIGNATURE".to_string()
            }
            AppError::UnauthorizedExpiredToken => "UNAUTHORIZED_EXPIRED_TOKEN".to_string(),
            AppError::Forbidden => "INSUFFICIENT_ROLE".to_string(),
            AppError::Conflict { code, .. } => code.to_string(),
            AppError::Db { .. } => "DB_ERROR".to_string(),
            AppError::Internal { .. } => "INTERNAL".to_string(),
            AppError::Config { .. } => "CONFIG_ERROR".to_string(),
        }
    }

    /// Client-facing detail. Token rejections deliberately carry no claim
    /// contents and no hint about which check failed beyond the code.
    fn detail(&self) -> String {
        match self {
            AppError::BadRequest { detail, .. } => detail.clone(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::InactiveAccount => "Account is inactive".to_string(),
            AppError::AuthenticationFailed => "Authentication failed".to_string(),
            AppError::UnauthorizedMissingBearer => "Missing or malformed Bearer token".to_string(),
            AppError::UnauthorizedMalformedToken => "Invalid token".to_string(),
            AppError::UnauthorizedInvalidSignature => "Invalid token".to_string(),
            AppError::UnauthorizedExpiredToken => "Token expired".to_string(),
            AppError::Forbidden => "Access denied".to_string(),
            AppError::Conflict { detail, .. } => detail.clone(),
            AppError::Db { detail, .. } => detail.clone(),
            AppError::Internal { detail, .. } => detail.clone(),
            AppError::Config { detail, .. } => detail.clone(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials
            | AppError::InactiveAccount
            | AppError::AuthenticationFailed
            | AppError::UnauthorizedMissingBearer
            | AppError::UnauthorizedMalformedToken
            | AppError::UnauthorizedInvalidSignature
            | AppError::UnauthorizedExpiredToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Db { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn bad_request(code: &'static str, detail: String) -> Self {
        Self::BadRequest { code, detail }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn inactive_account() -> Self {
        Self::InactiveAccount
    }

    pub fn authentication_failed() -> Self {
        Self::AuthenticationFailed
    }

    pub fn unauthorized_missing_bearer() -> Self {
        Self::UnauthorizedMissingBearer
    }

    pub fn unauthorized_malformed_token() -> Self {
        Self::UnauthorizedMalformedToken
    }

    pub fn unauthorized_invalid_signature() -> Self {
        Self::UnauthorizedInvalidSignature
    }

    pub fn unauthorized_expired_token() -> Self {
        Self::UnauthorizedExpiredToken
    }

    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    pub fn conflict(code: &'static str, detail: String) -> Self {
        Self::Conflict { code, detail }
    }

    pub fn db(detail: String) -> Self {
        Self::Db { detail }
    }

    pub fn internal(detail: String) -> Self {
        Self::Internal { detail }
    }

    pub fn config(detail: String) -> Self {
        Self::Config { detail }
    }

    fn humanize_code(code: &str) -> String {
        code.split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    None => String::new(),
                    Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let code = self.code();
        let detail = self.detail();
        let trace_id = trace_ctx::trace_id();

        let problem_details = ProblemDetails {
            type_: format!("https://api.lareferente.com/errors/{code}"),
            title: Self::humanize_code(&code),
            status: status.as_u16(),
            detail,
            code,
            trace_id: trace_id.clone(),
        };

        HttpResponse::build(status)
            .content_type("application/problem+json")
            .insert_header(("x-trace-id", trace_id))
            .json(problem_details)
    }
}
