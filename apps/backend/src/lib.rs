#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod directory;
pub mod entities;
pub mod error;
pub mod health;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod telemetry;
pub mod trace_ctx;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use auth::claims::{Claims, Role};
pub use auth::jwt::{decode_token, issue_token};
pub use auth::policy::{default_policy, AccessPolicy, AccessRule, MethodMatch, Requirement};
pub use auth::principal::Principal;
pub use auth::{AuthError, TokenError};
pub use directory::memory::MemoryDirectory;
pub use directory::sea::SeaUserDirectory;
pub use directory::{DirectoryError, NewUser, UserDirectory, UserRecord};
pub use error::AppError;
pub use middleware::auth_gate::AuthGate;
pub use middleware::cors::cors_middleware;
pub use middleware::request_trace::RequestTrace;
pub use middleware::structured_logger::StructuredLogger;
pub use middleware::trace_span::TraceSpan;
pub use state::app_state::AppState;
pub use state::security_config::{CredentialErrorPolicy, SecurityConfig};

// Prelude for test convenience
pub mod prelude {
    pub use super::auth::claims::*;
    pub use super::auth::jwt::*;
    pub use super::auth::policy::*;
    pub use super::directory::*;
    pub use super::error::*;
    pub use super::middleware::*;
    pub use super::state::app_state::*;
    pub use super::state::security_config::*;
}

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
