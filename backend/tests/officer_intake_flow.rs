//! End-to-end intake flow over the assembled app with fixture stores:
//! bootstrap an admin, log in, submit a record publicly, then review,
//! update, approve, and delete it through the protected surface.

use actix_http::Request;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test;
use backend::server::{AppConfig, build_app, build_state};
use chrono::Duration;
use serde_json::{Value, json};

fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".parse().expect("valid address"),
        database_url: None,
        token_secret: "integration-test-secret".into(),
        token_lifetime: Duration::days(7),
        bootstrap_password: "admin123".into(),
    }
}

async fn test_app()
-> impl Service<Request, Response = ServiceResponse, Error = actix_web::Error> {
    test::init_service(build_app(build_state(&test_config(), None))).await
}

fn submission_json(service_number: &str, email: &str) -> Value {
    json!({
        "surname": "Okafor",
        "firstName": "Chukwudi",
        "middleName": "Emeka",
        "dateOfBirth": "1995-02-11",
        "gender": "Male",
        "bloodGroup": "O+",
        "stateOfOrigin": "Anambra",
        "lga": "Awka South",
        "nationality": "Nigerian",
        "homeAddress": "12 Zik Avenue, Awka",
        "serviceNumber": service_number,
        "rank": "Inspector",
        "dateOfEnlistment": "2020-06-01",
        "command": "Enugu Command",
        "unit": "Operations",
        "currentPosting": "Enugu HQ",
        "phoneNumber": "08012345678",
        "emailAddress": email,
        "contactAddress": "12 Zik Avenue, Awka",
        "highestQualification": "B.Sc",
        "nokName": "Adaeze Okafor",
        "nokRelationship": "Spouse",
        "nokPhone": "08087654321",
        "nokAddress": "12 Zik Avenue, Awka",
        "maritalStatus": "Married",
        "nin": "12345678901",
        "officerSignature": "C.E. Okafor",
        "submissionDate": "2025-01-10",
    })
}

async fn superadmin_token(
    app: &impl Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> String {
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/init-admin")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "username": "admin", "password": "admin123" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let value: Value = test::read_body_json(res).await;
    value
        .pointer("/data/token")
        .and_then(Value::as_str)
        .expect("token present")
        .to_owned()
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

#[actix_web::test]
async fn full_intake_review_lifecycle() {
    let app = test_app().await;
    let token = superadmin_token(&app).await;

    // Public submission lands as pending.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/officers")
            .set_json(submission_json("CDT/2020/01234", "a@b.com"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(
        created.pointer("/data/status").and_then(Value::as_str),
        Some("pending")
    );
    let id = created
        .pointer("/data/id")
        .and_then(Value::as_str)
        .expect("record id")
        .to_owned();

    // The listing shows it, newest first, with envelope pagination.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/officers?search=cdt/2020")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let listed: Value = test::read_body_json(res).await;
    assert_eq!(listed.pointer("/pagination/total"), Some(&json!(1)));
    assert_eq!(
        listed.pointer("/data/0/serviceNumber").and_then(Value::as_str),
        Some("CDT/2020/01234")
    );

    // Admin edit forces the updated status and stamps the editor.
    let mut edited = submission_json("CDT/2020/01234", "a@b.com");
    edited["unit"] = json!("Intelligence");
    let res = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/api/officers/{id}"))
            .insert_header(bearer(&token))
            .set_json(edited)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(
        updated.pointer("/data/status").and_then(Value::as_str),
        Some("updated")
    );
    assert_eq!(
        updated.pointer("/data/modifiedBy").and_then(Value::as_str),
        Some("admin")
    );

    // An updated record is no longer approvable.
    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/officers/{id}/approve"))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    // Statistics reflect the single record.
    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/officers/stats")
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let stats: Value = test::read_body_json(res).await;
    assert_eq!(stats.pointer("/data/totalOfficers"), Some(&json!(1)));
    assert_eq!(
        stats
            .pointer("/data/recentSubmissions/0/fullName")
            .and_then(Value::as_str),
        Some("OKAFOR CHUKWUDI EMEKA")
    );

    // Superadmin delete, then the record is gone.
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/officers/{id}"))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/officers/{id}"))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn duplicate_submissions_conflict_through_the_full_stack() {
    let app = test_app().await;

    let first = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/officers")
            .set_json(submission_json("CDT/001", "shared@b.com"))
            .to_request(),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/officers")
            .set_json(submission_json("CDT/002", "shared@b.com"))
            .to_request(),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let value: Value = test::read_body_json(second).await;
    assert_eq!(value.get("success"), Some(&Value::Bool(false)));
    assert_eq!(
        value.get("message").and_then(Value::as_str),
        Some("An entry with this service number or email already exists")
    );
}

#[actix_web::test]
async fn pending_records_approve_cleanly() {
    let app = test_app().await;
    let token = superadmin_token(&app).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/officers")
            .set_json(submission_json("CDT/001", "a@b.com"))
            .to_request(),
    )
    .await;
    let created: Value = test::read_body_json(res).await;
    let id = created
        .pointer("/data/id")
        .and_then(Value::as_str)
        .expect("record id")
        .to_owned();

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(&format!("/api/officers/{id}/approve"))
            .insert_header(bearer(&token))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let approved: Value = test::read_body_json(res).await;
    assert_eq!(
        approved.pointer("/data/status").and_then(Value::as_str),
        Some("approved")
    );
}

#[actix_web::test]
async fn health_probes_respond() {
    let app = test_app().await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/health/live").to_request())
        .await;
    assert_eq!(res.status(), StatusCode::OK);

    // build_state starts unready; readiness flips in main once wiring is done.
    let res =
        test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
}
