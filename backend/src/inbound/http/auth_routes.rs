//! Authentication API handlers.
//!
//! ```text
//! POST /api/auth/login       {"username":"admin","password":"..."}
//! POST /api/auth/init-admin  one-time bootstrap, guarded by "no admin exists"
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{AdminProfile, AuthService, Error, LoginCredentials, LoginValidationError};

use super::ApiResult;
use super::envelope::Envelope;

/// Login request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Admin username.
    pub username: String,
    /// Admin password.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("Username is required")
            .with_errors(json!([{ "field": "username", "message": "username is required" }])),
        LoginValidationError::EmptyPassword => Error::invalid_request("Password is required")
            .with_errors(json!([{ "field": "password", "message": "password is required" }])),
    }
}

/// Login response payload.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    /// Signed bearer token for the `Authorization` header.
    pub token: String,
    /// The authenticated admin's identity.
    pub admin: AdminProfile,
}

/// Authenticate an admin and issue a bearer token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success with bearer token", body = LoginData),
        (status = 400, description = "Missing username or password", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 403, description = "Account is inactive", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let outcome = service.login(&credentials).await?;
    Ok(HttpResponse::Ok().json(Envelope::message_and_data(
        "Login successful",
        LoginData {
            token: outcome.token,
            admin: outcome.admin,
        },
    )))
}

/// Bootstrap response payload: the default credentials, shown exactly once.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BootstrapData {
    /// The created admin's identity.
    pub admin: AdminProfile,
    /// Default username.
    pub username: String,
    /// Default password; change it after first login.
    pub password: String,
    /// Operator reminder.
    pub note: String,
}

/// Create the default superadmin account. Succeeds only while no admin
/// account exists.
#[utoipa::path(
    post,
    path = "/api/auth/init-admin",
    responses(
        (status = 201, description = "Default admin created; credentials in response", body = BootstrapData),
        (status = 409, description = "An admin already exists", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["auth"],
    operation_id = "initAdmin",
    security([])
)]
#[post("/auth/init-admin")]
pub async fn init_admin(service: web::Data<AuthService>) -> ApiResult<HttpResponse> {
    let outcome = service.bootstrap().await?;
    let username = outcome.admin.username.clone();
    Ok(HttpResponse::Created().json(Envelope::message_and_data(
        "Default admin created successfully",
        BootstrapData {
            admin: outcome.admin,
            username,
            password: outcome.password,
            note: "Please change this password immediately after first login".to_owned(),
        },
    )))
}
