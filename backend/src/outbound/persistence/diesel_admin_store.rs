//! Diesel-backed [`AdminStore`] adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::admin::{AdminUser, NewAdmin};
use crate::domain::ports::{AdminStore, AdminStoreError};

use super::models::{AdminRow, NewAdminRow, RowConversionError};
use super::pool::{DbPool, PoolError};
use super::schema::admins;

/// PostgreSQL admin store.
#[derive(Clone)]
pub struct DieselAdminStore {
    pool: DbPool,
}

impl DieselAdminStore {
    /// Create a store over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AdminStoreError {
    AdminStoreError::connection(error.to_string())
}

fn map_diesel_error(error: DieselError) -> AdminStoreError {
    AdminStoreError::query(error.to_string())
}

fn map_row_error(error: RowConversionError) -> AdminStoreError {
    AdminStoreError::query(error.to_string())
}

#[async_trait]
impl AdminStore for DieselAdminStore {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<AdminUser>, AdminStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<AdminRow> = admins::table
            .filter(admins::username.eq(username))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(AdminUser::try_from)
            .transpose()
            .map_err(map_row_error)
    }

    async fn count(&self) -> Result<u64, AdminStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let count: i64 = admins::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(count.unsigned_abs())
    }

    async fn create_if_none(
        &self,
        admin: NewAdmin,
        now: DateTime<Utc>,
    ) -> Result<Option<AdminUser>, AdminStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewAdminRow {
            id: Uuid::new_v4(),
            username: admin.username.to_lowercase(),
            password_hash: admin.password_hash,
            full_name: admin.full_name,
            role: admin.role.to_string(),
            active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        };

        // The count and the insert share a transaction; the unique index on
        // `username` is the backstop should two bootstrap requests race
        // between the two statements.
        let inserted = conn
            .transaction::<Option<AdminRow>, DieselError, _>(|conn| {
                async move {
                    let existing: i64 = admins::table.count().get_result(conn).await?;
                    if existing > 0 {
                        return Ok(None);
                    }
                    let created = diesel::insert_into(admins::table)
                        .values(&row)
                        .get_result(conn)
                        .await?;
                    Ok(Some(created))
                }
                .scope_boxed()
            })
            .await;

        match inserted {
            Ok(row) => row.map(AdminUser::try_from).transpose().map_err(map_row_error),
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => Ok(None),
            Err(other) => Err(map_diesel_error(other)),
        }
    }

    async fn record_login(&self, id: Uuid, when: DateTime<Utc>) -> Result<(), AdminStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::update(admins::table.find(id))
            .set((admins::last_login.eq(when), admins::updated_at.eq(when)))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }
}
