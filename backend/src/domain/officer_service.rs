//! Officer record use-cases over the [`OfficerStore`] port.
//!
//! Handlers call this service; it owns validation, status-transition rules,
//! and the mapping from store failures to domain errors, so HTTP code never
//! touches persistence errors directly.

use std::sync::Arc;

use chrono::Utc;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use super::error::Error;
use super::officer::{OfficerRecord, OfficerSubmission};
use super::ports::{OfficerFilter, OfficerStore, OfficerStoreError};
use super::statistics::StatisticsSnapshot;

/// Driving-side service for every officer record operation.
#[derive(Clone)]
pub struct OfficerService {
    store: Arc<dyn OfficerStore>,
}

fn map_store_error(error: OfficerStoreError) -> Error {
    match error {
        OfficerStoreError::Connection { message } => Error::service_unavailable(message),
        OfficerStoreError::Query { message } => Error::internal(message),
        OfficerStoreError::Duplicate { field } => {
            Error::conflict("An entry with this service number or email already exists")
                .with_errors(json!({ "field": field }))
        }
    }
}

impl OfficerService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn OfficerStore>) -> Self {
        Self { store }
    }

    /// Accept a public submission: validate, normalize, and persist with
    /// status `pending`.
    pub async fn submit(&self, submission: OfficerSubmission) -> Result<OfficerRecord, Error> {
        let now = Utc::now();
        let details = submission.validate(now.date_naive()).map_err(|errors| {
            Error::invalid_request("Validation failed")
                .with_errors(json!(errors))
        })?;

        let record = self
            .store
            .create(details, now)
            .await
            .map_err(map_store_error)?;
        info!(
            record_id = %record.id,
            service_number = %record.details.service.service_number,
            "officer submission accepted"
        );
        Ok(record)
    }

    /// List records matching the filter, newest submission first.
    pub async fn list(
        &self,
        filter: &OfficerFilter,
        page: PageRequest,
    ) -> Result<Page<OfficerRecord>, Error> {
        self.store
            .list(filter, page)
            .await
            .map_err(map_store_error)
    }

    /// Fetch one record.
    pub async fn get(&self, id: Uuid) -> Result<OfficerRecord, Error> {
        self.store
            .find_by_id(id)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("Officer not found"))
    }

    /// Apply an admin edit. The replacement payload passes the same
    /// validation as a submission; the record moves to status `updated`.
    pub async fn update(
        &self,
        id: Uuid,
        submission: OfficerSubmission,
        modified_by: &str,
    ) -> Result<OfficerRecord, Error> {
        let existing = self.get(id).await?;
        if !existing.status.allows_update() {
            return Err(Error::conflict("A rejected record cannot be updated"));
        }

        let now = Utc::now();
        let details = submission.validate(now.date_naive()).map_err(|errors| {
            Error::invalid_request("Validation failed")
                .with_errors(json!(errors))
        })?;

        self.store
            .replace(id, details, modified_by, now)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("Officer not found"))
    }

    /// Hard-delete a record.
    pub async fn delete(&self, id: Uuid) -> Result<(), Error> {
        let deleted = self.store.delete(id).await.map_err(map_store_error)?;
        if deleted {
            info!(record_id = %id, "officer record deleted");
            Ok(())
        } else {
            Err(Error::not_found("Officer not found"))
        }
    }

    /// Approve a pending record.
    pub async fn approve(&self, id: Uuid) -> Result<OfficerRecord, Error> {
        let existing = self.get(id).await?;
        if !existing.status.allows_approval() {
            return Err(Error::conflict("Only pending records can be approved"));
        }

        self.store
            .approve(id, Utc::now())
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found("Officer not found"))
    }

    /// Aggregate dashboard statistics over the full record set.
    pub async fn statistics(&self) -> Result<StatisticsSnapshot, Error> {
        let records = self.store.fetch_all().await.map_err(map_store_error)?;
        Ok(StatisticsSnapshot::from_records(&records))
    }
}
