//! Emergency contact handlers. Contacts are scoped to their owner.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::auth::validation::{validate_name, validate_phone};
use crate::auth::Claims;
use crate::db::{ContactRepository, ContactUpdate, EmergencyContact, NewEmergencyContact};
use crate::web::dto::{ApiResponse, ContactInfo, CreateContactRequest, UpdateContactRequest};
use crate::web::error::ApiError;
use crate::web::middleware::AuthUser;

use super::AppState;

/// Fetch a contact and check the caller owns it (admins may act on any).
async fn fetch_owned_contact(
    state: &AppState,
    claims: &Claims,
    contact_id: i64,
) -> Result<EmergencyContact, ApiError> {
    let contact = ContactRepository::new(state.db.pool())
        .get_by_id(contact_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Emergency contact not found"))?;

    if contact.user_id != claims.sub && !claims.role().is_admin() {
        return Err(ApiError::forbidden("Access denied"));
    }

    Ok(contact)
}

/// GET /emergency-contacts - List the caller's contacts.
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<Vec<ContactInfo>>>, ApiError> {
    let contacts = ContactRepository::new(state.db.pool())
        .list_for_user(claims.sub)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::new(
        contacts.into_iter().map(ContactInfo::from).collect(),
    )))
}

/// GET /emergency-contacts/:id - Get a contact (owner or admin).
pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ContactInfo>>, ApiError> {
    let contact = fetch_owned_contact(&state, &claims, id).await?;
    Ok(Json(ApiResponse::new(ContactInfo::from(contact))))
}

/// POST /emergency-contacts - Add a contact for the caller.
pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Json(req): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ContactInfo>>), ApiError> {
    validate_name(&req.name).map_err(|e| ApiError::bad_request(e.to_string()))?;
    validate_phone(&req.phone_number).map_err(|e| ApiError::bad_request(e.to_string()))?;
    if req.relationship.trim().is_empty() {
        return Err(ApiError::bad_request("Relationship is required"));
    }

    let contact = ContactRepository::new(state.db.pool())
        .create(&NewEmergencyContact {
            user_id: claims.sub,
            name: req.name,
            relationship: req.relationship,
            phone_number: req.phone_number,
            email: req.email,
            address: req.address,
        })
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            "Emergency contact created",
            ContactInfo::from(contact),
        )),
    ))
}

/// PATCH /emergency-contacts/:id - Update a contact (owner or admin).
pub async fn update_contact(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<Json<ApiResponse<ContactInfo>>, ApiError> {
    fetch_owned_contact(&state, &claims, id).await?;

    if let Some(ref name) = req.name {
        validate_name(name).map_err(|e| ApiError::bad_request(e.to_string()))?;
    }
    if let Some(ref phone) = req.phone_number {
        validate_phone(phone).map_err(|e| ApiError::bad_request(e.to_string()))?;
    }

    let contact = ContactRepository::new(state.db.pool())
        .update(
            id,
            &ContactUpdate {
                name: req.name,
                relationship: req.relationship,
                phone_number: req.phone_number,
                email: req.email,
                address: req.address,
            },
        )
        .await
        .map_err(ApiError::from)?;

    Ok(Json(ApiResponse::with_message(
        "Emergency contact updated",
        ContactInfo::from(contact),
    )))
}

/// DELETE /emergency-contacts/:id - Delete a contact (owner or admin).
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    fetch_owned_contact(&state, &claims, id).await?;

    ContactRepository::new(state.db.pool())
        .delete(id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
