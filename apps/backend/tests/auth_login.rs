mod support;

use std::sync::Arc;
use std::time::SystemTime;

use actix_web::test;
use backend::auth::jwt::decode_token;
use backend::directory::memory::MemoryDirectory;
use backend::state::app_state::AppState;
use backend::state::security_config::{CredentialErrorPolicy, SecurityConfig};
use backend::Role;
use serde_json::json;
use support::app_builder::create_test_app;
use support::call_app;
use support::users::{seed_user, TEST_BCRYPT_COST};

fn test_security() -> SecurityConfig {
    SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
        .with_bcrypt_cost(TEST_BCRYPT_COST)
}

#[actix_web::test]
async fn login_returns_token_for_active_user() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security();
    let directory = Arc::new(MemoryDirectory::new());
    let admin = seed_user(&directory, "admin@x.com", "admin123", Role::Admin, true).await;

    let state = AppState::new(directory.clone(), security.clone());
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "admin@x.com", "password": "admin123" }))
        .to_request();

    let (status, body) = call_app(&app, req).await;
    assert_eq!(status.as_u16(), 200);

    assert_eq!(body["email"], "admin@x.com");
    assert_eq!(body["role"], "ADMIN");
    assert_eq!(body["displayName"], "Test User");

    let token = body["token"].as_str().unwrap();
    let claims = decode_token(token, SystemTime::now(), &security).expect("token should decode");
    assert_eq!(claims.sub, "admin@x.com");
    assert_eq!(claims.role, Role::Admin);

    // Successful login touches the last-seen timestamp.
    assert!(directory.last_seen(admin.id).is_some());

    Ok(())
}

#[actix_web::test]
async fn login_with_wrong_password_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let directory = Arc::new(MemoryDirectory::new());
    seed_user(&directory, "admin@x.com", "admin123", Role::Admin, true).await;

    let state = AppState::new(directory, test_security());
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "admin@x.com", "password": "admin124" }))
        .to_request();

    let (status, body) = call_app(&app, req).await;
    assert_eq!(status.as_u16(), 401);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");

    Ok(())
}

#[actix_web::test]
async fn login_with_unknown_email_is_401() -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(Arc::new(MemoryDirectory::new()), test_security());
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "nobody@x.com", "password": "whatever" }))
        .to_request();

    let (status, body) = call_app(&app, req).await;
    assert_eq!(status.as_u16(), 401);
    assert_eq!(body["code"], "INVALID_CREDENTIALS");

    Ok(())
}

#[actix_web::test]
async fn inactive_account_is_401_even_with_correct_password(
) -> Result<(), Box<dyn std::error::Error>> {
    let directory = Arc::new(MemoryDirectory::new());
    seed_user(&directory, "old@x.com", "pw123456", Role::User, false).await;

    let state = AppState::new(directory, test_security());
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "old@x.com", "password": "pw123456" }))
        .to_request();

    let (status, body) = call_app(&app, req).await;
    assert_eq!(status.as_u16(), 401);
    // Default disclosure policy keeps the distinct category.
    assert_eq!(body["code"], "INACTIVE_ACCOUNT");

    Ok(())
}

#[actix_web::test]
async fn generic_policy_collapses_credential_failures() -> Result<(), Box<dyn std::error::Error>> {
    let security = test_security().with_credential_error_policy(CredentialErrorPolicy::Generic);
    let directory = Arc::new(MemoryDirectory::new());
    seed_user(&directory, "old@x.com", "pw123456", Role::User, false).await;
    seed_user(&directory, "live@x.com", "pw123456", Role::User, true).await;

    let state = AppState::new(directory, security);
    let app = create_test_app(state).with_prod_routes().build().await?;

    // Inactive account with the right password...
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "old@x.com", "password": "pw123456" }))
        .to_request();
    let (status, body) = call_app(&app, req).await;
    assert_eq!(status.as_u16(), 401);
    assert_eq!(body["code"], "AUTHENTICATION_FAILED");

    // ...is indistinguishable from a wrong password on a live account.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "live@x.com", "password": "wrong" }))
        .to_request();
    let (status, body) = call_app(&app, req).await;
    assert_eq!(status.as_u16(), 401);
    assert_eq!(body["code"], "AUTHENTICATION_FAILED");

    Ok(())
}

#[actix_web::test]
async fn empty_fields_are_400() -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(Arc::new(MemoryDirectory::new()), test_security());
    let app = create_test_app(state).with_prod_routes().build().await?;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "", "password": "pw" }))
        .to_request();
    let (status, body) = call_app(&app, req).await;
    assert_eq!(status.as_u16(), 400);
    assert_eq!(body["code"], "INVALID_EMAIL");

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": "a@x.com" }))
        .to_request();
    let (status, body) = call_app(&app, req).await;
    assert_eq!(status.as_u16(), 400);
    assert_eq!(body["code"], "INVALID_PASSWORD");

    Ok(())
}
