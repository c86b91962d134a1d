//! Completion log for every request.
//!
//! Emits one `request_completed` event per request, levelled by status class
//! and carrying the authenticated principal (when the gate attached one) and
//! the stable error code for rejected requests. Rejections from middleware
//! surface as `Err` rather than responses, so both arms are logged here.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn};

use crate::auth::principal::Principal;
use crate::error::AppError;

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

/// Stable code of an [`AppError`] travelling inside an actix error, if any.
fn rejection_code(err: &ActixError) -> Option<String> {
    err.as_error::<AppError>().map(|e| e.code())
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_string();

        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, principal, code) = match &result {
                Ok(res) => {
                    let principal = res
                        .request()
                        .extensions()
                        .get::<Principal>()
                        .map(|p| p.email.clone());
                    (res.status(), principal, None)
                }
                Err(err) => (
                    err.as_response_error().status_code(),
                    None,
                    rejection_code(err),
                ),
            };

            let duration_us = start.elapsed().as_micros() as u64;
            let status_code = status.as_u16();
            let principal = principal.unwrap_or_else(|| "-".to_string());
            let code = code.unwrap_or_default();

            if status.is_server_error() {
                error!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us=%duration_us, trace_id=%trace_id, auth.principal=%principal, error.code=%code, message="request_completed");
            } else if status.is_client_error() {
                warn!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us=%duration_us, trace_id=%trace_id, auth.principal=%principal, error.code=%code, message="request_completed");
            } else {
                info!(http.method=%method, url.path=%path, http.status_code=%status_code, duration_us=%duration_us, trace_id=%trace_id, auth.principal=%principal, message="request_completed");
            }

            result
        })
    }
}
