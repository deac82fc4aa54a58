//! Admin triage handlers.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::db::{NewStatusUpdate, ReportRepository, ReportStatus, StatusUpdateRepository};
use crate::web::dto::{
    ApiResponse, PaginatedReports, PaginationQuery, ReportInfo, SetStatusRequest,
};
use crate::web::error::ApiError;
use crate::web::middleware::AdminUser;

use super::AppState;

/// GET /admin/reports - Paginated report listing.
pub async fn admin_list_reports(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Query(query): Query<PaginationQuery>,
) -> Result<Json<ApiResponse<PaginatedReports>>, ApiError> {
    let (page, per_page) = query.resolve();
    let repo = ReportRepository::new(state.db.pool());

    let total = repo.count().await.map_err(ApiError::from)? as u64;
    let reports = repo
        .list_paginated(query.offset(), per_page as i64)
        .await
        .map_err(ApiError::from)?;

    let mut infos = Vec::with_capacity(reports.len());
    for report in reports {
        let status = repo.current_status(report.id).await.map_err(ApiError::from)?;
        infos.push(ReportInfo::from_report(report, status.as_str()));
    }

    Ok(Json(ApiResponse::new(PaginatedReports {
        reports: infos,
        page,
        per_page,
        total,
    })))
}

/// GET /admin/reports/:id - Get any report.
pub async fn admin_get_report(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReportInfo>>, ApiError> {
    let repo = ReportRepository::new(state.db.pool());
    let report = repo
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Report not found"))?;

    let status = repo.current_status(id).await.map_err(ApiError::from)?;
    Ok(Json(ApiResponse::new(ReportInfo::from_report(
        report,
        status.as_str(),
    ))))
}

/// PATCH /admin/reports/:id - Transition a report's status.
///
/// Appends to the audit trail; the report row itself is untouched.
pub async fn admin_set_status(
    State(state): State<Arc<AppState>>,
    AdminUser(claims): AdminUser,
    Path(id): Path<i64>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<ReportInfo>>, ApiError> {
    let status: ReportStatus = req
        .status
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid status"))?;

    StatusUpdateRepository::new(state.db.pool())
        .append(&NewStatusUpdate {
            report_id: id,
            updated_by: claims.sub,
            status,
        })
        .await
        .map_err(ApiError::from)?;

    tracing::info!(
        report_id = id,
        status = status.as_str(),
        updated_by = claims.sub,
        "report status updated"
    );

    let repo = ReportRepository::new(state.db.pool());
    let report = repo
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Report not found"))?;

    Ok(Json(ApiResponse::with_message(
        "Status updated",
        ReportInfo::from_report(report, status.as_str()),
    )))
}

/// DELETE /admin/reports/:id - Delete any report.
pub async fn admin_delete_report(
    State(state): State<Arc<AppState>>,
    AdminUser(claims): AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = ReportRepository::new(state.db.pool())
        .delete(id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found("Report not found"));
    }

    tracing::info!(report_id = id, deleted_by = claims.sub, "report deleted");
    Ok(Json(ApiResponse::message_only("Report deleted")))
}
