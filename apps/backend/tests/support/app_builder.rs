use std::sync::Arc;

use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use backend::middleware::auth_gate::AuthGate;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::state::app_state::AppState;
use backend::AppError;
use backend::{AccessPolicy, AccessRule, MethodMatch, Requirement};

/// Type alias for route configuration functions
type RouteConfigFn = Box<dyn Fn(&mut web::ServiceConfig) + Send + Sync>;

/// Builder for creating test Actix service instances
pub struct TestAppBuilder {
    state: AppState,
    policy: Option<AccessPolicy>,
    route_config: Option<RouteConfigFn>,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            policy: None,
            route_config: None,
        }
    }

    /// Configure the app to use production routes (health + auth).
    pub fn with_prod_routes(mut self) -> Self {
        self.route_config = Some(Box::new(backend::routes::configure) as RouteConfigFn);
        self
    }

    /// Configure the app with custom routes
    pub fn with_routes<F>(mut self, config_fn: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.route_config = Some(Box::new(config_fn) as RouteConfigFn);
        self
    }

    /// Enable the auth gate with the given policy, as production wires it.
    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Build the test service
    pub async fn build(
        self,
    ) -> Result<impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error>, AppError>
    {
        // Without an explicit policy the gate still runs, but an allow-all
        // rule makes it a no-op; Public short-circuits before token checks.
        let policy = Arc::new(self.policy.unwrap_or_else(|| {
            AccessPolicy::new(vec![AccessRule::new(
                MethodMatch::Any,
                "/**",
                Requirement::Public,
            )])
        }));
        let security = Arc::new(self.state.security.clone());
        let route_config = self.route_config;

        // Wrap AppState with web::Data at the boundary
        let data = web::Data::new(self.state);

        let service = test::init_service(
            App::new()
                .wrap(AuthGate::new(policy, security))
                .wrap(StructuredLogger)
                .wrap(TraceSpan)
                .wrap(RequestTrace)
                .app_data(data)
                .configure(move |cfg| {
                    if let Some(config_fn) = &route_config {
                        config_fn(cfg);
                    }
                }),
        )
        .await;

        Ok(service)
    }
}

/// Create a new test app builder with the given AppState
pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
