//! Server construction and wiring.
//!
//! The store handles are built once here and passed down as explicit state;
//! no module owns a global connection. When no database is configured the
//! app runs on the in-memory fixture stores, which is also how the
//! integration tests drive the full HTTP surface.

mod config;

pub use config::{AppConfig, ConfigError};

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::ApiDoc;
use crate::domain::ports::{
    AdminStore, FixtureAdminStore, FixtureOfficerStore, OfficerStore,
};
use crate::domain::{AuthService, OfficerService, TokenSigner};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::{auth_routes, officers};
use crate::middleware::RequestTrace;
use crate::outbound::persistence::{DbPool, DieselAdminStore, DieselOfficerStore};

/// Shared handler state, cloned into each worker.
#[derive(Clone)]
pub struct AppState {
    /// Officer record use-cases.
    pub officers: web::Data<OfficerService>,
    /// Login and bootstrap use-cases.
    pub auth: web::Data<AuthService>,
    /// Token signer consumed by the bearer-token extractor.
    pub signer: web::Data<TokenSigner>,
    /// Probe state.
    pub health: web::Data<HealthState>,
}

/// Build handler state, choosing Diesel stores when a pool is available and
/// the in-memory fixtures otherwise.
pub fn build_state(config: &AppConfig, pool: Option<DbPool>) -> AppState {
    let (officer_store, admin_store): (Arc<dyn OfficerStore>, Arc<dyn AdminStore>) = match pool {
        Some(pool) => (
            Arc::new(DieselOfficerStore::new(pool.clone())),
            Arc::new(DieselAdminStore::new(pool)),
        ),
        None => (
            Arc::new(FixtureOfficerStore::new()),
            Arc::new(FixtureAdminStore::new()),
        ),
    };

    let signer = TokenSigner::with_lifetime(&config.token_secret, config.token_lifetime);
    AppState {
        officers: web::Data::new(OfficerService::new(officer_store)),
        auth: web::Data::new(AuthService::new(
            admin_store,
            signer.clone(),
            config.bootstrap_password.clone(),
        )),
        signer: web::Data::new(signer),
        health: web::Data::new(HealthState::new()),
    }
}

/// Assemble the actix application around the given state.
///
/// Route order matters for the officers scope: `/officers/stats` must be
/// registered before `/officers/{id}`.
pub fn build_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(auth_routes::login)
        .service(auth_routes::init_admin)
        .service(officers::submit_officer)
        .service(officers::get_statistics)
        .service(officers::list_officers)
        .service(officers::get_officer)
        .service(officers::update_officer)
        .service(officers::delete_officer)
        .service(officers::approve_officer);

    #[cfg_attr(not(debug_assertions), allow(unused_mut, reason = "mutated only in debug builds"))]
    let mut app = App::new()
        .app_data(state.officers)
        .app_data(state.auth)
        .app_data(state.signer)
        .app_data(state.health)
        .wrap(RequestTrace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}
