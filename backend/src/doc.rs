//! OpenAPI document assembly.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::admin::AdminProfile;
use crate::domain::error::{Error, ErrorCode};
use crate::domain::officer::{FieldError, OfficerSubmission};
use crate::inbound::http::auth_routes::{BootstrapData, LoginData, LoginRequest};

/// Registers the bearer-token security scheme used by protected endpoints.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Aggregated OpenAPI document for the REST surface.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::inbound::http::officers::submit_officer,
        crate::inbound::http::officers::list_officers,
        crate::inbound::http::officers::get_statistics,
        crate::inbound::http::officers::get_officer,
        crate::inbound::http::officers::update_officer,
        crate::inbound::http::officers::delete_officer,
        crate::inbound::http::officers::approve_officer,
        crate::inbound::http::auth_routes::login,
        crate::inbound::http::auth_routes::init_admin,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        FieldError,
        OfficerSubmission,
        LoginRequest,
        LoginData,
        BootstrapData,
        AdminProfile,
    )),
    modifiers(&SecurityAddon),
    security(("bearerAuth" = [])),
    tags(
        (name = "officers", description = "Officer record intake and review"),
        (name = "auth", description = "Admin authentication"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
