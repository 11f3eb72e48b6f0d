//! Port abstraction for officer record persistence.
//!
//! This is the single store interface every officer operation goes through;
//! production backs it with PostgreSQL, tests and database-less deployments
//! with the in-memory fixture. Uniqueness of service number and email is the
//! store's responsibility and must hold under concurrent creates — a
//! check-then-insert in the caller would leave a race window.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::officer::{NewOfficer, OfficerRecord, Rank, RecordStatus};

/// Persistence errors raised by officer store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OfficerStoreError {
    /// Store connection could not be established.
    #[error("officer store connection failed: {message}")]
    Connection {
        /// Underlying failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("officer store query failed: {message}")]
    Query {
        /// Underlying failure description.
        message: String,
    },
    /// A unique field collides with an existing record.
    #[error("an entry with this {field} already exists")]
    Duplicate {
        /// Which unique field collided, e.g. "service number".
        field: String,
    },
}

impl OfficerStoreError {
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

    /// Create a duplicate-field error for the named unique field.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }
}

/// Listing filters; all optional, combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OfficerFilter {
    /// Restrict to one lifecycle status.
    pub status: Option<RecordStatus>,
    /// Restrict to one command (exact match).
    pub command: Option<String>,
    /// Restrict to one rank.
    pub rank: Option<Rank>,
    /// Case-insensitive substring over service number, surname, first name,
    /// and email.
    pub search: Option<String>,
}

impl OfficerFilter {
    fn matches(&self, record: &OfficerRecord) -> bool {
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        if let Some(command) = &self.command {
            if &record.details.service.command != command {
                return false;
            }
        }
        if let Some(rank) = self.rank {
            if record.details.service.rank != rank {
                return false;
            }
        }
        if let Some(search) = &self.search {
            let needle = search.to_lowercase();
            let service = &record.details.service;
            let personal = &record.details.personal;
            let haystacks = [
                service.service_number.as_ref().to_lowercase(),
                personal.surname.to_lowercase(),
                personal.first_name.to_lowercase(),
                record.details.contact.email_address.as_ref().to_lowercase(),
            ];
            if !haystacks.iter().any(|hay| hay.contains(&needle)) {
                return false;
            }
        }
        true
    }
}

/// Capability interface for officer record persistence.
#[async_trait]
pub trait OfficerStore: Send + Sync {
    /// Insert a validated submission with status `pending`.
    ///
    /// # Errors
    /// [`OfficerStoreError::Duplicate`] when the service number or email is
    /// already present; the check is atomic with the insert.
    async fn create(
        &self,
        details: NewOfficer,
        now: DateTime<Utc>,
    ) -> Result<OfficerRecord, OfficerStoreError>;

    /// Fetch a record by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<OfficerRecord>, OfficerStoreError>;

    /// List records matching `filter`, newest submission first.
    async fn list(
        &self,
        filter: &OfficerFilter,
        page: PageRequest,
    ) -> Result<Page<OfficerRecord>, OfficerStoreError>;

    /// Replace a record's submitted details, forcing status `updated`.
    ///
    /// Returns `None` when the record does not exist. Unique fields are
    /// re-checked atomically against all other records.
    async fn replace(
        &self,
        id: Uuid,
        details: NewOfficer,
        modified_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OfficerRecord>, OfficerStoreError>;

    /// Mark a record approved. Returns `None` when the record does not exist.
    async fn approve(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<OfficerRecord>, OfficerStoreError>;

    /// Hard-delete a record. Returns `false` when the record does not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, OfficerStoreError>;

    /// Fetch the full record set for statistics aggregation.
    async fn fetch_all(&self) -> Result<Vec<OfficerRecord>, OfficerStoreError>;
}

/// In-memory officer store used by tests and database-less deployments.
///
/// A single mutex guards the record vector, so the duplicate check and the
/// insert happen under one lock — the same atomicity the production store
/// gets from its unique indexes.
#[derive(Debug, Default)]
pub struct FixtureOfficerStore {
    records: Mutex<Vec<OfficerRecord>>,
}

impl FixtureOfficerStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<OfficerRecord>>, OfficerStoreError> {
        self.records
            .lock()
            .map_err(|_| OfficerStoreError::connection("fixture store lock poisoned"))
    }

    fn duplicate_field(
        records: &[OfficerRecord],
        details: &NewOfficer,
        exclude: Option<Uuid>,
    ) -> Option<&'static str> {
        for record in records {
            if exclude == Some(record.id) {
                continue;
            }
            if record.details.service.service_number == details.service.service_number {
                return Some("service number");
            }
            if record.details.contact.email_address == details.contact.email_address {
                return Some("email");
            }
        }
        None
    }
}

#[async_trait]
impl OfficerStore for FixtureOfficerStore {
    async fn create(
        &self,
        details: NewOfficer,
        now: DateTime<Utc>,
    ) -> Result<OfficerRecord, OfficerStoreError> {
        let mut records = self.lock()?;
        if let Some(field) = Self::duplicate_field(&records, &details, None) {
            return Err(OfficerStoreError::duplicate(field));
        }
        let record = OfficerRecord::accepted(Uuid::new_v4(), details, now);
        records.push(record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<OfficerRecord>, OfficerStoreError> {
        let records = self.lock()?;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    async fn list(
        &self,
        filter: &OfficerFilter,
        page: PageRequest,
    ) -> Result<Page<OfficerRecord>, OfficerStoreError> {
        let records = self.lock()?;
        let mut matching: Vec<OfficerRecord> = records
            .iter()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));

        let total = matching.len() as u64;
        let items: Vec<OfficerRecord> = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(page.limit() as usize)
            .collect();
        Ok(Page::new(items, total, page))
    }

    async fn replace(
        &self,
        id: Uuid,
        details: NewOfficer,
        modified_by: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<OfficerRecord>, OfficerStoreError> {
        let mut records = self.lock()?;
        if let Some(field) = Self::duplicate_field(&records, &details, Some(id)) {
            return Err(OfficerStoreError::duplicate(field));
        }
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.apply_update(details, modified_by, now);
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn approve(
        &self,
        id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<OfficerRecord>, OfficerStoreError> {
        let mut records = self.lock()?;
        match records.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.status = RecordStatus::Approved;
                record.updated_at = now;
                Ok(Some(record.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, OfficerStoreError> {
        let mut records = self.lock()?;
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() < before)
    }

    async fn fetch_all(&self) -> Result<Vec<OfficerRecord>, OfficerStoreError> {
        let records = self.lock()?;
        Ok(records.clone())
    }
}
