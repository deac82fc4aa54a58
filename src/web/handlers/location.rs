//! Location record handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::db::{LocationRepository, LocationUpdate, NewLocation, ReportRepository};
use crate::web::dto::{ApiResponse, CreateLocationRequest, LocationInfo, UpdateLocationRequest};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

fn check_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<(), ApiError> {
    if let Some(latitude) = latitude {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(ApiError::bad_request("Invalid coordinates"));
        }
    }
    if let Some(longitude) = longitude {
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(ApiError::bad_request("Invalid coordinates"));
        }
    }
    Ok(())
}

/// GET /locations - List all location records.
pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<LocationInfo>>>, ApiError> {
    let locations = LocationRepository::new(state.db.pool())
        .list_all()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(
        locations.into_iter().map(LocationInfo::from).collect(),
    )))
}

/// GET /locations/:id - Get a location record.
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<LocationInfo>>, ApiError> {
    let location = LocationRepository::new(state.db.pool())
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Location not found"))?;

    Ok(Json(ApiResponse::new(LocationInfo::from(location))))
}

/// POST /locations - Create a location record for a report.
pub async fn create_location(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Json(req): Json<CreateLocationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<LocationInfo>>), ApiError> {
    check_coordinates(Some(req.latitude), Some(req.longitude))?;

    ReportRepository::new(state.db.pool())
        .get_by_id(req.report_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Report not found"))?;

    let location = LocationRepository::new(state.db.pool())
        .create(&NewLocation {
            report_id: req.report_id,
            latitude: req.latitude,
            longitude: req.longitude,
            address: req.address,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Location created",
            LocationInfo::from(location),
        )),
    ))
}

/// PATCH /locations/:id - Update a location record.
pub async fn update_location(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateLocationRequest>,
) -> Result<Json<ApiResponse<LocationInfo>>, ApiError> {
    check_coordinates(req.latitude, req.longitude)?;

    let repo = LocationRepository::new(state.db.pool());
    repo.get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Location not found"))?;

    let location = repo
        .update(
            id,
            &LocationUpdate {
                latitude: req.latitude,
                longitude: req.longitude,
                address: req.address,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::with_message(
        "Location updated",
        LocationInfo::from(location),
    )))
}

/// DELETE /locations/:id - Delete a location record.
pub async fn delete_location(
    State(state): State<Arc<AppState>>,
    AuthUser(_claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let deleted = LocationRepository::new(state.db.pool())
        .delete(id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found("Location not found"));
    }

    Ok(Json(ApiResponse::message_only("Location deleted")))
}
