//! Actix middleware.

pub mod trace;

pub use trace::{REQUEST_ID_HEADER, RequestTrace, TraceId};
