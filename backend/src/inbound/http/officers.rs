//! Officer record API handlers.
//!
//! ```text
//! POST   /api/officers               public submission
//! GET    /api/officers               list/filter/search (authenticated)
//! GET    /api/officers/stats         dashboard statistics (authenticated)
//! GET    /api/officers/{id}          fetch one (authenticated)
//! PUT    /api/officers/{id}          update (admin, superadmin)
//! DELETE /api/officers/{id}          delete (superadmin)
//! PATCH  /api/officers/{id}/approve  approve (admin, superadmin)
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use pagination::PageRequest;
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::domain::officer::{OfficerSubmission, Rank, RecordStatus};
use crate::domain::ports::OfficerFilter;
use crate::domain::{Error, OfficerService};

use super::ApiResult;
use super::auth::{AdminContext, DELETE_ROLES, REVIEW_ROLES};
use super::envelope::Envelope;

/// Query parameters accepted by the listing endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// 1-based page number, default 1.
    pub page: Option<u32>,
    /// Items per page, default 20, max 100.
    pub limit: Option<u32>,
    /// Filter by lifecycle status.
    pub status: Option<String>,
    /// Filter by command.
    pub command: Option<String>,
    /// Filter by rank title.
    pub rank: Option<String>,
    /// Free-text search over service number, names, and email.
    pub search: Option<String>,
}

impl ListQuery {
    fn into_parts(self) -> Result<(OfficerFilter, PageRequest), Error> {
        let page = PageRequest::from_query(self.page, self.limit)
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let status = self
            .status
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(str::parse::<RecordStatus>)
            .transpose()
            .map_err(|err| Error::invalid_request(format!("status {err}")))?;
        let rank = self
            .rank
            .as_deref()
            .filter(|raw| !raw.trim().is_empty())
            .map(str::parse::<Rank>)
            .transpose()
            .map_err(|err| Error::invalid_request(format!("rank {err}")))?;

        let filter = OfficerFilter {
            status,
            command: self.command.filter(|raw| !raw.trim().is_empty()),
            rank,
            search: self.search.filter(|raw| !raw.trim().is_empty()),
        };
        Ok((filter, page))
    }
}

/// Accept a public officer submission.
#[utoipa::path(
    post,
    path = "/api/officers",
    request_body = OfficerSubmission,
    responses(
        (status = 201, description = "Submission accepted with status pending"),
        (status = 400, description = "Field validation failed", body = Error),
        (status = 409, description = "Service number or email already exists", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["officers"],
    operation_id = "submitOfficer",
    security([])
)]
#[post("/officers")]
pub async fn submit_officer(
    service: web::Data<OfficerService>,
    payload: web::Json<OfficerSubmission>,
) -> ApiResult<HttpResponse> {
    let record = service.submit(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(Envelope::message_and_data(
        "Officer data submitted successfully",
        record,
    )))
}

/// List officer records with filters and pagination.
#[utoipa::path(
    get,
    path = "/api/officers",
    params(ListQuery),
    responses(
        (status = 200, description = "Page of records with pagination metadata"),
        (status = 400, description = "Invalid filter or pagination values", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["officers"],
    operation_id = "listOfficers"
)]
#[get("/officers")]
pub async fn list_officers(
    _ctx: AdminContext,
    service: web::Data<OfficerService>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let (filter, page) = query.into_inner().into_parts()?;
    let records = service.list(&filter, page).await?;
    Ok(HttpResponse::Ok().json(Envelope::from(records)))
}

/// Dashboard statistics over the full record set.
#[utoipa::path(
    get,
    path = "/api/officers/stats",
    responses(
        (status = 200, description = "Aggregated statistics"),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["officers"],
    operation_id = "getStatistics"
)]
#[get("/officers/stats")]
pub async fn get_statistics(
    _ctx: AdminContext,
    service: web::Data<OfficerService>,
) -> ApiResult<HttpResponse> {
    let stats = service.statistics().await?;
    Ok(HttpResponse::Ok().json(Envelope::data(stats)))
}

/// Fetch a single officer record.
#[utoipa::path(
    get,
    path = "/api/officers/{id}",
    params(("id" = Uuid, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "The record"),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 404, description = "Officer not found", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["officers"],
    operation_id = "getOfficer"
)]
#[get("/officers/{id}")]
pub async fn get_officer(
    _ctx: AdminContext,
    service: web::Data<OfficerService>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let record = service.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(record)))
}

/// Apply an admin edit to a record.
#[utoipa::path(
    put,
    path = "/api/officers/{id}",
    params(("id" = Uuid, Path, description = "Record identifier")),
    request_body = OfficerSubmission,
    responses(
        (status = 200, description = "Record updated; status forced to updated"),
        (status = 400, description = "Field validation failed", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller's role may not update records", body = Error),
        (status = 404, description = "Officer not found", body = Error),
        (status = 409, description = "Unique field conflict or rejected record", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["officers"],
    operation_id = "updateOfficer"
)]
#[put("/officers/{id}")]
pub async fn update_officer(
    ctx: AdminContext,
    service: web::Data<OfficerService>,
    path: web::Path<Uuid>,
    payload: web::Json<OfficerSubmission>,
) -> ApiResult<HttpResponse> {
    ctx.require_role(REVIEW_ROLES)?;
    let record = service
        .update(path.into_inner(), payload.into_inner(), ctx.username())
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::message_and_data(
        "Officer data updated successfully",
        record,
    )))
}

/// Delete a record outright. Superadmin only.
#[utoipa::path(
    delete,
    path = "/api/officers/{id}",
    params(("id" = Uuid, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record deleted"),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Delete requires the superadmin role", body = Error),
        (status = 404, description = "Officer not found", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["officers"],
    operation_id = "deleteOfficer"
)]
#[delete("/officers/{id}")]
pub async fn delete_officer(
    ctx: AdminContext,
    service: web::Data<OfficerService>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    ctx.require_role(DELETE_ROLES)?;
    service.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Envelope::message("Officer deleted successfully")))
}

/// Approve a pending record.
#[utoipa::path(
    patch,
    path = "/api/officers/{id}/approve",
    params(("id" = Uuid, Path, description = "Record identifier")),
    responses(
        (status = 200, description = "Record approved"),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 403, description = "Caller's role may not approve records", body = Error),
        (status = 404, description = "Officer not found", body = Error),
        (status = 409, description = "Record is not pending", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["officers"],
    operation_id = "approveOfficer"
)]
#[patch("/officers/{id}/approve")]
pub async fn approve_officer(
    ctx: AdminContext,
    service: web::Data<OfficerService>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    ctx.require_role(REVIEW_ROLES)?;
    let record = service.approve(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(Envelope::message_and_data(
        "Officer approved successfully",
        record,
    )))
}
