//! User account handlers.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::auth::validation::{validate_email, validate_name, validate_phone};
use crate::auth::Claims;
use crate::db::{UserRepository, UserUpdate};
use crate::web::dto::{ApiResponse, UpdateUserRequest, UserInfo};
use crate::web::error::ApiError;
use crate::web::middleware::{AdminUser, AuthUser};

use super::AppState;

/// A user may act on their own account; admins may act on any.
fn require_self_or_admin(claims: &Claims, user_id: i64) -> Result<(), ApiError> {
    if claims.sub == user_id || claims.role().is_admin() {
        Ok(())
    } else {
        Err(ApiError::forbidden("Access denied"))
    }
}

/// GET /users - List all accounts (admin only).
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AdminUser(_claims): AdminUser,
) -> Result<Json<ApiResponse<Vec<UserInfo>>>, ApiError> {
    let users = UserRepository::new(state.db.pool())
        .list_all()
        .await
        .map_err(ApiError::from)?;

    let users = users.into_iter().map(UserInfo::from).collect();
    Ok(Json(ApiResponse::new(users)))
}

/// GET /users/:id - Get an account (self or admin).
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    require_self_or_admin(&claims, id)?;

    let user = UserRepository::new(state.db.pool())
        .get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    Ok(Json(ApiResponse::new(UserInfo::from(user))))
}

/// PATCH /users/:id - Update an account (self or admin).
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserInfo>>, ApiError> {
    require_self_or_admin(&claims, id)?;

    if let Some(ref first_name) = req.first_name {
        validate_name(first_name).map_err(|e| ApiError::bad_request(e.to_string()))?;
    }
    if let Some(ref last_name) = req.last_name {
        validate_name(last_name).map_err(|e| ApiError::bad_request(e.to_string()))?;
    }
    if let Some(ref email) = req.email {
        validate_email(email).map_err(|e| ApiError::bad_request(e.to_string()))?;
    }
    if let Some(ref phone) = req.phone_number {
        validate_phone(phone).map_err(|e| ApiError::bad_request(e.to_string()))?;
    }

    // New passwords pass through the same strength policy as registration
    let password = match req.password {
        Some(ref plaintext) => Some(crate::auth::hash_password(plaintext).map_err(|e| {
            if e.is_weak_credential() {
                ApiError::bad_request(e.to_string())
            } else {
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal("Failed to update user")
            }
        })?),
        None => None,
    };

    let repo = UserRepository::new(state.db.pool());
    repo.get_by_id(id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let update = UserUpdate {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        phone_number: req.phone_number,
        password,
        role: None,
    };

    if update.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }

    let user = repo.update(id, &update).await.map_err(|e| {
        if e.to_string().contains("UNIQUE") {
            ApiError::conflict("Email or phone number already registered")
        } else {
            tracing::error!("User update failed: {}", e);
            ApiError::internal("Failed to update user")
        }
    })?;

    Ok(Json(ApiResponse::with_message(
        "User updated",
        UserInfo::from(user),
    )))
}

/// DELETE /users/:id - Delete an account (self or admin).
///
/// Owned reports and emergency contacts go with it via cascade.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    require_self_or_admin(&claims, id)?;

    let deleted = UserRepository::new(state.db.pool())
        .delete(id)
        .await
        .map_err(ApiError::from)?;

    if !deleted {
        return Err(ApiError::not_found("User not found"));
    }

    tracing::info!(user_id = id, deleted_by = claims.sub, "user deleted");
    Ok(Json(ApiResponse::message_only("User deleted")))
}
