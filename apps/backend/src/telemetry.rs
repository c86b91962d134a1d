//! JSON log output for the running service.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter selection: `BACKEND_LOG` wins, then `RUST_LOG`, then a default
/// that keeps request completion logs at info and the ORM layers quiet.
fn filter_directives(backend_log: Option<String>, rust_log: Option<String>) -> String {
    backend_log
        .or(rust_log)
        .unwrap_or_else(|| "info,sea_orm=warn,sqlx=warn".to_string())
}

pub fn init_tracing() {
    let filter = EnvFilter::new(filter_directives(
        std::env::var("BACKEND_LOG").ok(),
        std::env::var("RUST_LOG").ok(),
    ));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[cfg(test)]
mod tests {
    use super::filter_directives;

    #[test]
    fn backend_log_wins_over_rust_log() {
        assert_eq!(
            filter_directives(Some("debug".to_string()), Some("trace".to_string())),
            "debug"
        );
        assert_eq!(filter_directives(None, Some("trace".to_string())), "trace");
    }

    #[test]
    fn default_quiets_the_orm() {
        let directives = filter_directives(None, None);
        assert!(directives.starts_with("info"));
        assert!(directives.contains("sea_orm=warn"));
    }
}
