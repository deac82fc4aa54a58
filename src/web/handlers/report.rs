//! Incident report handlers, including media records and the status trail.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::auth::Claims;
use crate::db::{
    MediaRepository, NewMediaAttachment, NewReport, NewStatusUpdate, Report, ReportRepository,
    ReportStatus, ReportUpdate, StatusUpdateRepository,
};
use crate::web::dto::{
    ApiResponse, CreateMediaRequest, CreateReportRequest, MediaInfo, ReportInfo, SetStatusRequest,
    StatusUpdateInfo, UpdateReportRequest,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AdminUser, AuthUser};

use super::AppState;

/// Fetch a report and check the caller may act on it (owner or admin).
async fn fetch_owned_report(
    state: &AppState,
    claims: &Claims,
    report_id: i64,
) -> Result<Report, ApiError> {
    let report = ReportRepository::new(state.db.pool())
        .get_by_id(report_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Report not found"))?;

    if report.user_id != claims.sub && !claims.role().is_admin() {
        return Err(ApiError::forbidden("Access denied"));
    }

    Ok(report)
}

/// Attach the derived status to a report row.
async fn to_report_info(state: &AppState, report: Report) -> Result<ReportInfo, ApiError> {
    let status = ReportRepository::new(state.db.pool())
        .current_status(report.id)
        .await
        .map_err(ApiError::from)?;
    Ok(ReportInfo::from_report(report, status.as_str()))
}

/// POST /reports - File a new report.
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReportInfo>>), ApiError> {
    if req.incident.trim().is_empty() {
        return Err(ApiError::bad_request("Incident is required"));
    }
    if req.details.trim().is_empty() {
        return Err(ApiError::bad_request("Details are required"));
    }
    if !(-90.0..=90.0).contains(&req.latitude) || !(-180.0..=180.0).contains(&req.longitude) {
        return Err(ApiError::bad_request("Invalid coordinates"));
    }

    let new_report = NewReport {
        user_id: claims.sub,
        incident: req.incident,
        details: req.details,
        latitude: req.latitude,
        longitude: req.longitude,
    };

    // The report and its location row commit together
    let report = ReportRepository::new(state.db.pool())
        .create_with_location(&new_report, req.address.as_deref())
        .await
        .map_err(ApiError::from)?;

    tracing::info!(report_id = report.id, user_id = claims.sub, "report filed");

    let info = to_report_info(&state, report).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("Report created", info)),
    ))
}

/// GET /reports - List every report (admin only).
pub async fn list_reports(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
) -> Result<Json<ApiResponse<Vec<ReportInfo>>>, ApiError> {
    let reports = ReportRepository::new(state.db.pool())
        .list_all()
        .await
        .map_err(ApiError::from)?;

    let mut infos = Vec::with_capacity(reports.len());
    for report in reports {
        infos.push(to_report_info(&state, report).await?);
    }

    Ok(Json(ApiResponse::new(infos)))
}

/// GET /reports/:id - Get a report (owner or admin).
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReportInfo>>, ApiError> {
    let report = fetch_owned_report(&state, &claims, id).await?;
    let info = to_report_info(&state, report).await?;
    Ok(Json(ApiResponse::new(info)))
}

/// PATCH /reports/:id - Update a report (owner or admin).
pub async fn update_report(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateReportRequest>,
) -> Result<Json<ApiResponse<ReportInfo>>, ApiError> {
    fetch_owned_report(&state, &claims, id).await?;

    if let Some(latitude) = req.latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ApiError::bad_request("Invalid coordinates"));
        }
    }
    if let Some(longitude) = req.longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ApiError::bad_request("Invalid coordinates"));
        }
    }

    let update = ReportUpdate {
        incident: req.incident,
        details: req.details,
        latitude: req.latitude,
        longitude: req.longitude,
    };

    let report = ReportRepository::new(state.db.pool())
        .update(id, &update)
        .await
        .map_err(ApiError::from)?;

    let info = to_report_info(&state, report).await?;
    Ok(Json(ApiResponse::with_message("Report updated", info)))
}

/// DELETE /reports/:id - Delete a report (owner or admin).
pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    fetch_owned_report(&state, &claims, id).await?;

    ReportRepository::new(state.db.pool())
        .delete(id)
        .await
        .map_err(ApiError::from)?;

    tracing::info!(report_id = id, deleted_by = claims.sub, "report deleted");
    Ok(Json(ApiResponse::message_only("Report deleted")))
}

/// GET /reports/:id/media - List media records (owner or admin).
pub async fn list_media(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<MediaInfo>>>, ApiError> {
    fetch_owned_report(&state, &claims, id).await?;

    let media = MediaRepository::new(state.db.pool())
        .list_for_report(id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(
        media.into_iter().map(MediaInfo::from).collect(),
    )))
}

/// POST /reports/:id/media - Attach a media record (owner or admin).
pub async fn create_media(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CreateMediaRequest>,
) -> Result<(StatusCode, Json<ApiResponse<MediaInfo>>), ApiError> {
    fetch_owned_report(&state, &claims, id).await?;

    if req.file_url.trim().is_empty() {
        return Err(ApiError::bad_request("File URL is required"));
    }

    let media = MediaRepository::new(state.db.pool())
        .create(&NewMediaAttachment {
            report_id: id,
            file_url: req.file_url,
            media_type: req.media_type,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Media attached",
            MediaInfo::from(media),
        )),
    ))
}

/// DELETE /reports/:id/media - Remove all media records (owner or admin).
pub async fn delete_media(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    fetch_owned_report(&state, &claims, id).await?;

    let deleted = MediaRepository::new(state.db.pool())
        .delete_for_report(id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::message_only(format!(
        "{deleted} media records deleted"
    ))))
}

/// GET /reports/:id/status - Full status audit trail (admin only).
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<StatusUpdateInfo>>>, ApiError> {
    ReportRepository::new(state.db.pool())
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Report not found"))?;

    let trail = StatusUpdateRepository::new(state.db.pool())
        .list_for_report(id)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(
        trail.into_iter().map(StatusUpdateInfo::from).collect(),
    )))
}

/// POST /reports/:id/status - Append a status transition (admin only).
pub async fn set_status(
    State(state): State<Arc<AppState>>,
    AdminUser(claims): AdminUser,
    Path(id): Path<i64>,
    Json(req): Json<SetStatusRequest>,
) -> Result<Json<ApiResponse<StatusUpdateInfo>>, ApiError> {
    let status: ReportStatus = req
        .status
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid status"))?;

    let update = StatusUpdateRepository::new(state.db.pool())
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

    Ok(Json(ApiResponse::with_message(
        "Status updated",
        StatusUpdateInfo::from(update),
    )))
}
