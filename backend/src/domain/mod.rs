//! Domain primitives, aggregates, ports, and services.
//!
//! Purpose: define strongly typed domain entities used by the HTTP and
//! persistence layers. Keep types immutable where practical and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//! Nothing in this module knows about HTTP or SQL.

pub mod admin;
pub mod auth;
pub mod auth_service;
pub mod error;
pub mod officer;
pub mod officer_service;
pub mod password;
pub mod ports;
pub mod statistics;
pub mod token;

pub use self::admin::{AdminProfile, AdminUser, NewAdmin, ParseRoleError, Role};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::auth_service::{AuthService, BootstrapOutcome, LoginOutcome};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::officer::{
    FieldError, NewOfficer, OfficerRecord, OfficerSubmission, Rank, RecordStatus,
};
pub use self::officer_service::OfficerService;
pub use self::statistics::{GroupCount, RecentSubmission, StatisticsSnapshot};
pub use self::token::{Claims, TokenError, TokenSigner};

/// Convenient result alias for code returning domain errors.
pub type ApiResult<T> = Result<T, Error>;
