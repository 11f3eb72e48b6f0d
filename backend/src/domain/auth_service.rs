//! Login and bootstrap use-cases over the [`AdminStore`] port.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::admin::{AdminProfile, NewAdmin, Role};
use super::auth::LoginCredentials;
use super::error::Error;
use super::password::{hash_password, verify_password};
use super::ports::{AdminStore, AdminStoreError};
use super::token::TokenSigner;

/// Username created by the one-time bootstrap action.
pub const BOOTSTRAP_USERNAME: &str = "admin";

/// Display name for the bootstrap account.
const BOOTSTRAP_FULL_NAME: &str = "System Administrator";

/// Successful login response data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Signed bearer token for subsequent requests.
    pub token: String,
    /// Identity fields safe to return to the client.
    pub admin: AdminProfile,
}

/// One-time bootstrap response data. The raw password is returned exactly
/// once so the operator can log in and change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapOutcome {
    /// The created account's identity.
    pub admin: AdminProfile,
    /// The default password, to be changed after first login.
    pub password: String,
}

fn map_store_error(error: AdminStoreError) -> Error {
    match error {
        AdminStoreError::Connection { message } => Error::service_unavailable(message),
        AdminStoreError::Query { message } => Error::internal(message),
    }
}

/// Driving-side service for authentication and the bootstrap guard.
#[derive(Clone)]
pub struct AuthService {
    admins: Arc<dyn AdminStore>,
    signer: TokenSigner,
    bootstrap_password: String,
}

impl AuthService {
    /// Create a service over the given store and token signer.
    pub fn new(
        admins: Arc<dyn AdminStore>,
        signer: TokenSigner,
        bootstrap_password: impl Into<String>,
    ) -> Self {
        Self {
            admins,
            signer,
            bootstrap_password: bootstrap_password.into(),
        }
    }

    /// Check credentials, stamp the login time, and issue a bearer token.
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let admin = self
            .admins
            .find_by_username(credentials.username())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::unauthorized("Invalid credentials"))?;

        if !admin.active {
            warn!(username = %admin.username, "login attempt on inactive account");
            return Err(Error::forbidden(
                "Account is inactive. Please contact administrator.",
            ));
        }

        let matches = verify_password(credentials.password(), &admin.password_hash)
            .map_err(|err| Error::internal(err.to_string()))?;
        if !matches {
            return Err(Error::unauthorized("Invalid credentials"));
        }

        let now = Utc::now();
        self.admins
            .record_login(admin.id, now)
            .await
            .map_err(map_store_error)?;

        let token = self
            .signer
            .issue(&admin, now)
            .map_err(|err| Error::internal(format!("failed to issue token: {err}")))?;

        info!(username = %admin.username, role = %admin.role, "admin logged in");
        Ok(LoginOutcome {
            token,
            admin: AdminProfile::from(&admin),
        })
    }

    /// Create the default superadmin account, guarded by "no admin exists".
    ///
    /// # Errors
    /// [`crate::domain::ErrorCode::Conflict`] once any admin account exists.
    pub async fn bootstrap(&self) -> Result<BootstrapOutcome, Error> {
        let password_hash = hash_password(&self.bootstrap_password)
            .map_err(|err| Error::internal(err.to_string()))?;

        let created = self
            .admins
            .create_if_none(
                NewAdmin {
                    username: BOOTSTRAP_USERNAME.to_owned(),
                    password_hash,
                    full_name: BOOTSTRAP_FULL_NAME.to_owned(),
                    role: Role::Superadmin,
                },
                Utc::now(),
            )
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::conflict("Admin user already exists"))?;

        info!(admin_id = %created.id, "bootstrap admin created");
        Ok(BootstrapOutcome {
            admin: AdminProfile::from(&created),
            password: self.bootstrap_password.clone(),
        })
    }
}
