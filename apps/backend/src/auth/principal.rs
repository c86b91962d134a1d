//! Request-scoped identity derived from a validated token.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::Serialize;

use crate::auth::claims::Role;
use crate::error::AppError;

/// Identity attached to the request by [`crate::middleware::auth_gate`] after
/// a token validates. Lives for one request; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Principal {
    pub email: String,
    pub role: Role,
}

impl FromRequest for Principal {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // Absent on Public routes reached without a token; a handler that
        // demands a principal on such a route gets a 401.
        let principal = req.extensions().get::<Principal>().cloned();
        ready(principal.ok_or_else(AppError::unauthorized_missing_bearer))
    }
}
