//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the [`crate::domain::ports`] store traits,
//! backed by PostgreSQL via `diesel-async` with `bb8` connection pooling.
//!
//! Principles:
//!
//! - **Thin adapters**: the stores only translate between Diesel rows and
//!   domain types. Business rules live in the domain services.
//! - **Internal models**: row structs (`models.rs`) and the table
//!   definitions (`schema.rs`) never leak past this module.
//! - **Store-enforced uniqueness**: duplicate service numbers, emails, and
//!   usernames are caught by unique indexes, not by pre-checks, so
//!   concurrent inserts cannot race past the constraint.

mod diesel_admin_store;
mod diesel_officer_store;
mod models;
mod pool;
mod schema;

pub use diesel_admin_store::DieselAdminStore;
pub use diesel_officer_store::DieselOfficerStore;
pub use pool::{DbPool, PoolConfig, PoolError};

use diesel_migrations::{EmbeddedMigrations, embed_migrations};

/// SQL migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Migration failure at startup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to run migrations: {message}")]
pub struct MigrationError {
    /// Underlying failure description.
    pub message: String,
}

/// Apply pending migrations over a blocking connection.
///
/// Runs before the pool is handed to the stores; called from a blocking
/// task because the Diesel migration harness is synchronous.
pub fn run_pending_migrations(database_url: &str) -> Result<usize, MigrationError> {
    use diesel::Connection;
    use diesel_migrations::MigrationHarness;

    let mut conn = diesel::PgConnection::establish(database_url).map_err(|err| MigrationError {
        message: err.to_string(),
    })?;
    conn.run_pending_migrations(MIGRATIONS)
        .map(|applied| applied.len())
        .map_err(|err| MigrationError {
            message: err.to_string(),
        })
}
