//! Port abstraction for admin credential persistence.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::admin::{AdminUser, NewAdmin};

/// Persistence errors raised by admin store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminStoreError {
    /// Store connection could not be established.
    #[error("admin store connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("admin store query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
}

impl AdminStoreError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Capability interface for admin credential persistence.
#[async_trait]
pub trait AdminStore: Send + Sync {
    /// Fetch an admin by lower-cased username.
    async fn find_by_username(&self, username: &str)
    -> Result<Option<AdminUser>, AdminStoreError>;

    /// Number of admin accounts in existence.
    async fn count(&self) -> Result<u64, AdminStoreError>;

    /// Insert the bootstrap admin, but only while no admin exists yet.
    ///
    /// Returns `None` when an admin is already present. The existence check
    /// is evaluated atomically with the insert so concurrent bootstrap
    /// requests cannot both succeed.
    async fn create_if_none(
        &self,
        admin: NewAdmin,
        now: DateTime<Utc>,
    ) -> Result<Option<AdminUser>, AdminStoreError>;

    /// Stamp a successful login.
    async fn record_login(&self, id: Uuid, when: DateTime<Utc>) -> Result<(), AdminStoreError>;
}

/// In-memory admin store used by tests and database-less deployments.
#[derive(Debug, Default)]
pub struct FixtureAdminStore {
    admins: Mutex<Vec<AdminUser>>,
}

impl FixtureAdminStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with accounts, for tests.
    pub fn with_admins(admins: Vec<AdminUser>) -> Self {
        Self {
            admins: Mutex::new(admins),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<AdminUser>>, AdminStoreError> {
        self.admins
            .lock()
            .map_err(|_| AdminStoreError::connection("fixture store lock poisoned"))
    }
}

#[async_trait]
impl AdminStore for FixtureAdminStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, AdminStoreError> {
        let admins = self.lock()?;
        Ok(admins
            .iter()
            .find(|admin| admin.username == username)
            .cloned())
    }

    async fn count(&self) -> Result<u64, AdminStoreError> {
        let admins = self.lock()?;
        Ok(admins.len() as u64)
    }

    async fn create_if_none(
        &self,
        admin: NewAdmin,
        now: DateTime<Utc>,
    ) -> Result<Option<AdminUser>, AdminStoreError> {
        let mut admins = self.lock()?;
        if !admins.is_empty() {
            return Ok(None);
        }
        let created = AdminUser {
            id: Uuid::new_v4(),
            username: admin.username.to_lowercase(),
            password_hash: admin.password_hash,
            full_name: admin.full_name,
            role: admin.role,
            active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        admins.push(created.clone());
        Ok(Some(created))
    }

    async fn record_login(&self, id: Uuid, when: DateTime<Utc>) -> Result<(), AdminStoreError> {
        let mut admins = self.lock()?;
        if let Some(admin) = admins.iter_mut().find(|admin| admin.id == id) {
            admin.last_login = Some(when);
            admin.updated_at = when;
        }
        Ok(())
    }
}
