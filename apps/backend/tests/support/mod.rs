#![allow(dead_code)]

pub mod app_builder;
pub mod auth;
pub mod users;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, Error};

/// Call the app and normalize the outcome to (status, json body).
///
/// Handler errors come back as responses; middleware rejections surface as
/// `Err`, so both paths are folded into the rendered ProblemDetails here.
pub async fn call_app<S>(app: &S, req: Request) -> (StatusCode, serde_json::Value)
where
    S: Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>,
{
    match app.call(req).await {
        Ok(res) => {
            let status = res.status();
            let bytes = test::read_body(res).await;
            (status, parse_json(&bytes))
        }
        Err(err) => {
            let res = err.as_response_error().error_response();
            let status = res.status();
            let bytes = actix_web::body::to_bytes(res.into_body())
                .await
                .expect("read error body");
            (status, parse_json(&bytes))
        }
    }
}

fn parse_json(bytes: &[u8]) -> serde_json::Value {
    serde_json::from_slice(bytes).unwrap_or(serde_json::Value::Null)
}
