//! Diesel-backed [`OfficerStore`] adapter.
//!
//! Duplicate detection rides on the unique indexes over `service_number`
//! and `email_address`: the insert (or update) and the uniqueness check are
//! one atomic statement, so concurrent submissions of the same service
//! number cannot both succeed.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::RunQueryDsl;
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::officer::{NewOfficer, OfficerRecord, RecordStatus};
use crate::domain::ports::{OfficerFilter, OfficerStore, OfficerStoreError};

use super::models::{NewOfficerRow, OfficerRow, OfficerUpdate, RowConversionError};
use super::pool::{DbPool, PoolError};
use super::schema::officers;

/// PostgreSQL officer store.
#[derive(Clone)]
pub struct DieselOfficerStore {
    pool: DbPool,
}

impl DieselOfficerStore {
    /// Create a store over the shared connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> OfficerStoreError {
    OfficerStoreError::connection(error.to_string())
}

fn map_diesel_error(error: DieselError) -> OfficerStoreError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            let constraint = info.constraint_name().unwrap_or_default();
            let field = if constraint.contains("email") {
                "email"
            } else if constraint.contains("service_number") {
                "service number"
            } else {
                "unique field"
            };
            OfficerStoreError::duplicate(field)
        }
        other => OfficerStoreError::query(other.to_string()),
    }
}

fn map_row_error(error: RowConversionError) -> OfficerStoreError {
    OfficerStoreError::query(error.to_string())
}

/// Escape LIKE metacharacters so user search input matches literally.
fn escape_like(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Apply the listing filters to a boxed query. Built once for the page and
/// once for the total count.
fn filtered(filter: &OfficerFilter) -> officers::BoxedQuery<'static, diesel::pg::Pg> {
    let mut query = officers::table.into_boxed();
    if let Some(status) = filter.status {
        query = query.filter(officers::status.eq(status.to_string()));
    }
    if let Some(command) = &filter.command {
        query = query.filter(officers::command.eq(command.clone()));
    }
    if let Some(rank) = filter.rank {
        query = query.filter(officers::rank.eq(rank.title()));
    }
    if let Some(search) = &filter.search {
        let pattern = format!("%{}%", escape_like(search));
        query = query.filter(
            officers::service_number
                .ilike(pattern.clone())
                .or(officers::surname.ilike(pattern.clone()))
                .or(officers::first_name.ilike(pattern.clone()))
                .or(officers::email_address.ilike(pattern)),
        );
    }
    query
}

#[async_trait]
impl OfficerStore for DieselOfficerStore {
    async fn create(
        &self,
        details: NewOfficer,
        now: DateTime<Utc>,
    ) -> Result<OfficerRecord, OfficerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewOfficerRow::pending(Uuid::new_v4(), details, now);
        let inserted: OfficerRow = diesel::insert_into(officers::table)
            .values(&row)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        OfficerRecord::try_from(inserted).map_err(map_row_error)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OfficerRecord>, OfficerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OfficerRow> = officers::table
            .find(id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(OfficerRecord::try_from)
            .transpose()
            .map_err(map_row_error)
    }

    async fn list(
        &self,
        filter: &OfficerFilter,
        page: PageRequest,
    ) -> Result<Page<OfficerRecord>, OfficerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = filtered(filter)
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let rows: Vec<OfficerRow> = filtered(filter)
            .order(officers::submitted_at.desc())
            .limit(i64::from(page.limit()))
            .offset(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows
            .into_iter()
            .map(OfficerRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_row_error)?;

        Ok(Page::new(items, total.unsigned_abs(), page))
    }

    async fn replace(
        &self,
        id: Uuid,
        details: NewOfficer,
        modified_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OfficerRecord>, OfficerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = OfficerUpdate::edited(details, modified_by, now);
        let row: Option<OfficerRow> = diesel::update(officers::table.find(id))
            .set(&changes)
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(OfficerRecord::try_from)
            .transpose()
            .map_err(map_row_error)
    }

    async fn approve(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<OfficerRecord>, OfficerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<OfficerRow> = diesel::update(officers::table.find(id))
            .set((
                officers::status.eq(RecordStatus::Approved.to_string()),
                officers::updated_at.eq(now),
            ))
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(OfficerRecord::try_from)
            .transpose()
            .map_err(map_row_error)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, OfficerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(officers::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }

    async fn fetch_all(&self) -> Result<Vec<OfficerRecord>, OfficerStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<OfficerRow> = officers::table
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(OfficerRecord::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(map_row_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the pure helpers; the adapter itself is
    //! exercised against a live database in deployment environments.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("plain", "plain")]
    #[case("50%", "50\\%")]
    #[case("a_b", "a\\_b")]
    #[case("back\\slash", "back\\\\slash")]
    fn like_metacharacters_are_escaped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape_like(input), expected);
    }

    #[rstest]
    fn unique_violations_map_to_duplicate_by_constraint_name() {
        // Diesel exposes constraint names through the database error info;
        // the mapping keys on the index names from the migrations.
        let field_for = |constraint: &str| {
            if constraint.contains("email") {
                "email"
            } else if constraint.contains("service_number") {
                "service number"
            } else {
                "unique field"
            }
        };
        assert_eq!(field_for("officers_service_number_key"), "service number");
        assert_eq!(field_for("officers_email_address_key"), "email");
        assert_eq!(field_for("something_else"), "unique field");
    }
}
