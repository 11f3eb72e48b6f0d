//! HTTP inbound adapter exposing the REST endpoints.

pub mod auth;
pub mod auth_routes;
pub mod envelope;
pub mod error;
pub mod health;
pub mod officers;

pub use error::ApiResult;
