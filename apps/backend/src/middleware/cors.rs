use actix_cors::Cors;
use actix_web::http::header;

/// Build the CORS layer:
/// - any origin, without credentialed cookies
/// - the methods the API actually serves
/// - any request header
/// - `Authorization` exposed so browser clients can read issued tokens
pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allow_any_header()
        .expose_headers(vec![
            header::AUTHORIZATION,
            header::HeaderName::from_static("x-trace-id"),
        ])
        .max_age(3600)
}
