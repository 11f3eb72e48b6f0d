//! Authentication flow over the assembled app: bootstrap guard, credential
//! checks, bearer-token enforcement, and token expiry.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use backend::server::{AppConfig, build_app, build_state};
use chrono::Duration;
use serde_json::{Value, json};

fn config_with_lifetime(lifetime: Duration) -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().expect("valid address"),
        database_url: None,
        token_secret: "integration-test-secret".into(),
        token_lifetime: lifetime,
        bootstrap_password: "admin123".into(),
    }
}

async fn app_with_lifetime(
    lifetime: Duration,
) -> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(build_app(build_state(&config_with_lifetime(lifetime), None))).await
}

async fn bootstrap(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> ServiceResponse {
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/init-admin")
            .to_request(),
    )
    .await
}

async fn login(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
    username: &str,
    password: &str,
) -> ServiceResponse {
    test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": username, "password": password }))
            .to_request(),
    )
    .await
}

#[actix_web::test]
async fn bootstrap_is_one_time_only() {
    let app = app_with_lifetime(Duration::days(7)).await;

    assert_eq!(bootstrap(&app).await.status(), StatusCode::CREATED);
    assert_eq!(bootstrap(&app).await.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn login_before_bootstrap_fails_closed() {
    let app = app_with_lifetime(Duration::days(7)).await;

    let res = login(&app, "admin", "admin123").await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn issued_tokens_open_the_protected_surface() {
    let app = app_with_lifetime(Duration::days(7)).await;
    bootstrap(&app).await;

    let res = login(&app, "admin", "admin123").await;
    assert_eq!(res.status(), StatusCode::OK);
    let value: Value = test::read_body_json(res).await;
    let token = value
        .pointer("/data/token")
        .and_then(Value::as_str)
        .expect("token present")
        .to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/officers")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn protected_surface_rejects_missing_and_malformed_tokens() {
    let app = app_with_lifetime(Duration::days(7)).await;
    bootstrap(&app).await;

    let res =
        test::call_service(&app, test::TestRequest::get().uri("/api/officers").to_request()).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let value: Value = test::read_body_json(res).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("No token provided")
    );

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/officers")
            .insert_header((header::AUTHORIZATION, "Bearer not-a-real-token"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let value: Value = test::read_body_json(res).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Invalid token")
    );
}

#[actix_web::test]
async fn elapsed_tokens_are_rejected_as_expired() {
    // A negative lifetime issues tokens that are already past their expiry.
    let app = app_with_lifetime(Duration::minutes(-5)).await;
    bootstrap(&app).await;

    let res = login(&app, "admin", "admin123").await;
    assert_eq!(res.status(), StatusCode::OK);
    let value: Value = test::read_body_json(res).await;
    let token = value
        .pointer("/data/token")
        .and_then(Value::as_str)
        .expect("token present")
        .to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/officers")
            .insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let value: Value = test::read_body_json(res).await;
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("Token has expired")
    );
}

#[actix_web::test]
async fn wrong_password_never_issues_a_token() {
    let app = app_with_lifetime(Duration::days(7)).await;
    bootstrap(&app).await;

    for _ in 0..3 {
        let res = login(&app, "admin", "wrong-password").await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let value: Value = test::read_body_json(res).await;
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Invalid credentials")
        );
        assert!(value.pointer("/data/token").is_none());
    }
}
