//! Bearer-token authentication for protected endpoints.
//!
//! [`AdminContext`] is an extractor: handlers that take it only run with a
//! verified token, and its [`AdminContext::require_role`] check enforces the
//! operation's allowed-role set. Role sets are declared next to the handlers
//! that use them rather than as middleware closures.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};

use crate::domain::token::{Claims, TokenError, TokenSigner};
use crate::domain::{Error, Role};

/// Roles allowed to update and approve records.
pub const REVIEW_ROLES: &[Role] = &[Role::Admin, Role::Superadmin];

/// Roles allowed to delete records.
pub const DELETE_ROLES: &[Role] = &[Role::Superadmin];

fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::Missing => Error::unauthorized("No token provided"),
        TokenError::Invalid => Error::unauthorized("Invalid token"),
        TokenError::Expired => Error::unauthorized("Token has expired"),
    }
}

/// Verified admin identity attached to the request.
#[derive(Debug, Clone)]
pub struct AdminContext(Claims);

impl AdminContext {
    /// The verified token claims.
    pub fn claims(&self) -> &Claims {
        &self.0
    }

    /// Username recorded in the token.
    pub fn username(&self) -> &str {
        &self.0.username
    }

    /// Reject with `Forbidden` unless the caller's role is in `allowed`.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), Error> {
        if self.0.role.is_any_of(allowed) {
            Ok(())
        } else {
            Err(Error::forbidden(format!(
                "Role {} is not authorized for this operation",
                self.0.role
            )))
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

fn extract(req: &HttpRequest) -> Result<AdminContext, Error> {
    let signer = req
        .app_data::<web::Data<TokenSigner>>()
        .ok_or_else(|| Error::internal("token signer is not configured"))?;

    let token = bearer_token(req).ok_or_else(|| map_token_error(TokenError::Missing))?;
    signer
        .verify(token)
        .map(AdminContext)
        .map_err(map_token_error)
}

impl FromRequest for AdminContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract(req))
    }
}
