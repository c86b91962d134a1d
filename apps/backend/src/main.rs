use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use backend::auth::policy::default_policy;
use backend::directory::sea::SeaUserDirectory;
use backend::middleware::auth_gate::AuthGate;
use backend::middleware::cors::cors_middleware;
use backend::middleware::request_trace::RequestTrace;
use backend::middleware::structured_logger::StructuredLogger;
use backend::middleware::trace_span::TraceSpan;
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;
use backend::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables must be set by the runtime environment:
    // - Docker: Set via docker-compose env_file or docker run --env-file
    // - Local dev: Source env files manually (e.g., set -a; . ./.env; set +a)
    let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("BACKEND_PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse::<u16>()
        .unwrap_or_else(|_| {
            eprintln!("❌ BACKEND_PORT must be a valid port number");
            std::process::exit(1);
        });

    // The signing secret is required; refusing to start beats signing with a
    // guessable default.
    let security = match SecurityConfig::from_env() {
        Ok(security) => security,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let db_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("❌ DATABASE_URL must be set");
            std::process::exit(1);
        }
    };

    let directory = match SeaUserDirectory::connect(&db_url).await {
        Ok(directory) => directory,
        Err(e) => {
            eprintln!("❌ Failed to connect to the user directory: {e}");
            std::process::exit(1);
        }
    };

    println!("🚀 Starting La Referente backend on http://{}:{}", host, port);

    let state = AppState::new(Arc::new(directory), security.clone());
    let policy = Arc::new(default_policy());
    let security = Arc::new(security);

    // Wrap AppState with web::Data before passing to HttpServer
    let data = web::Data::new(state);

    HttpServer::new(move || {
        App::new()
            // Registered first so it runs innermost: CORS answers preflights
            // before the gate sees them.
            .wrap(AuthGate::new(policy.clone(), security.clone()))
            .wrap(cors_middleware())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
