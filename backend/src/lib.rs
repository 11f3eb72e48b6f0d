//! Officer records intake backend.
//!
//! A public form posts officer biodata to the REST API; admins review,
//! approve, and export the records from a dashboard. The crate is laid out
//! hexagonally: `domain` holds the entities, validation, ports, and
//! services; `inbound::http` adapts them to actix-web; `outbound` holds the
//! Diesel/PostgreSQL adapters; `server` wires everything for `main`.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request-trace middleware applied around the whole app.
pub use middleware::RequestTrace;
