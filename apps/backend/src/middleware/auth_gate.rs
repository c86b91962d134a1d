//! Request gate enforcing the access policy.
//!
//! For every inbound request: look up the matching access rule, then extract
//! and decode the bearer token if the rule demands one, and either attach a
//! [`Principal`] to the request extensions or reject with 401/403 before the
//! inner service runs. The gate holds its policy and security config
//! directly; there is no registry lookup at request time.
//!
//! Wire it inside the CORS layer so preflights are answered without a token.

use std::sync::Arc;
use std::time::SystemTime;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::claims::Claims;
use crate::auth::jwt;
use crate::auth::policy::{AccessPolicy, Requirement};
use crate::auth::principal::Principal;
use crate::auth::{AuthError, TokenError};
use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

#[derive(Clone)]
pub struct AuthGate {
    policy: Arc<AccessPolicy>,
    security: Arc<SecurityConfig>,
}

impl AuthGate {
    pub fn new(policy: Arc<AccessPolicy>, security: Arc<SecurityConfig>) -> Self {
        Self { policy, security }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthGateMiddleware {
            service,
            policy: self.policy.clone(),
            security: self.security.clone(),
        }))
    }
}

pub struct AuthGateMiddleware<S> {
    service: S,
    policy: Arc<AccessPolicy>,
    security: Arc<SecurityConfig>,
}

impl<S, B> Service<ServiceRequest> for AuthGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let requirement = self.policy.evaluate(req.method(), req.path());

        // Public routes proceed without a principal; token state is not even
        // examined, so a garbage token cannot break an anonymous request.
        if matches!(requirement, Requirement::Public) {
            return Box::pin(self.service.call(req));
        }

        let token = match extract_bearer(&req) {
            Some(token) => token,
            None => return reject(AppError::unauthorized_missing_bearer()),
        };

        // `now` is sampled once for the whole decode.
        let claims = match jwt::decode_token(&token, SystemTime::now(), &self.security) {
            Ok(claims) => claims,
            Err(e) => return reject(token_rejection(e, &self.security)),
        };

        if let Requirement::RoleIn(roles) = requirement {
            if !roles.contains(&claims.role) {
                return reject(
                    AuthError::InsufficientRole
                        .into_app_error(self.security.credential_error_policy),
                );
            }
        }

        attach_principal(&req, claims);
        Box::pin(self.service.call(req))
    }
}

fn reject<B>(error: AppError) -> LocalBoxFuture<'static, Result<ServiceResponse<B>, Error>> {
    Box::pin(async move { Err(error.into()) })
}

fn token_rejection(e: TokenError, security: &SecurityConfig) -> AppError {
    AuthError::Token(e).into_app_error(security.credential_error_policy)
}

fn attach_principal(req: &ServiceRequest, claims: Claims) {
    req.extensions_mut().insert(Principal {
        email: claims.sub,
        role: claims.role,
    });
}

/// Pull the token out of `Authorization: Bearer <token>`. Anything else
/// (missing header, wrong scheme, empty token, non-UTF8) reads as absent.
fn extract_bearer(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?;
    let auth_str = value.to_str().ok()?;

    let mut parts = auth_str.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token.to_string()),
        _ => None,
    }
}
