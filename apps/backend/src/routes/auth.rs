//! Login and registration endpoints.

use actix_web::{web, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::auth::claims::Role;
use crate::auth::session::{self, Session};
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.token,
            email: session.email,
            display_name: session.display_name,
            role: session.role,
        }
    }
}

fn require_field(value: &str, code: &'static str, name: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(code, format!("{name} cannot be empty")));
    }
    Ok(())
}

async fn login(
    req: web::Json<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_field(&req.email, "INVALID_EMAIL", "Email")?;
    require_field(&req.password, "INVALID_PASSWORD", "Password")?;

    let session = session::login(
        app_state.directory.as_ref(),
        &app_state.security,
        &req.email,
        &req.password,
    )
    .await
    .map_err(|e| e.into_app_error(app_state.security.credential_error_policy))?;

    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

async fn register(
    req: web::Json<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    require_field(&req.email, "INVALID_EMAIL", "Email")?;
    require_field(&req.password, "INVALID_PASSWORD", "Password")?;
    require_field(&req.first_name, "INVALID_FIRST_NAME", "First name")?;

    let session = session::register(
        app_state.directory.as_ref(),
        &app_state.security,
        &req.email,
        &req.password,
        &req.first_name,
        &req.last_name,
    )
    .await
    .map_err(|e| e.into_app_error(app_state.security.credential_error_policy))?;

    Ok(HttpResponse::Ok().json(SessionResponse::from(session)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/login", web::post().to(login))
        .route("/register", web::post().to(register));
}
