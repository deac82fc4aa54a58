//! Session lifecycle handlers: register, login, refresh, logout.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::auth::validation::{validate_email, validate_name, validate_phone};
use crate::auth::TokenKind;
use crate::db::{NewUser, RevocationRepository, Role, User, UserRepository};
use crate::web::dto::{
    AccessTokenResponse, ApiResponse, LoginRequest, RegisterRequest, TokenPairResponse, UserInfo,
};
use crate::web::error::ApiError;
use crate::web::middleware::{AuthUser, RefreshUser};

use super::AppState;

/// Login failure message. Identical for unknown email and wrong password
/// so the endpoint cannot be used to probe which accounts exist.
const LOGIN_FAILED: &str = "Incorrect email or password";

/// Issue an access/refresh pair for a user.
fn issue_pair(state: &AppState, user: &User) -> Result<(String, String), ApiError> {
    let name = user.display_name();
    let access = state
        .issuer
        .issue(user.id, &name, user.role, TokenKind::Access);
    let refresh = state
        .issuer
        .issue(user.id, &name, user.role, TokenKind::Refresh);
    match (access, refresh) {
        (Ok(a), Ok(r)) => Ok((a, r)),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!("Token issuance failed: {}", e);
            Err(ApiError::internal("Failed to generate token"))
        }
    }
}

/// POST /users - Register a new account.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TokenPairResponse>>), ApiError> {
    validate_name(&req.first_name).map_err(|e| ApiError::bad_request(e.to_string()))?;
    validate_name(&req.last_name).map_err(|e| ApiError::bad_request(e.to_string()))?;
    validate_email(&req.email).map_err(|e| ApiError::bad_request(e.to_string()))?;
    validate_phone(&req.phone_number).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let role = match req.role.as_deref() {
        None => Role::User,
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::bad_request("Invalid role"))?,
    };

    // Strength policy runs before any hash is computed
    let password_hash =
        crate::auth::hash_password(&req.password).map_err(|e| {
            if e.is_weak_credential() {
                ApiError::bad_request(e.to_string())
            } else {
                tracing::error!("Password hashing failed: {}", e);
                ApiError::internal("Failed to create user")
            }
        })?;

    let repo = UserRepository::new(state.db.pool());

    if repo
        .get_by_email(&req.email)
        .await
        .map_err(ApiError::from)?
        .is_some()
    {
        return Err(ApiError::conflict("Email already registered"));
    }
    if repo
        .get_by_phone(&req.phone_number)
        .await
        .map_err(ApiError::from)?
        .is_some()
    {
        return Err(ApiError::conflict("Phone number already registered"));
    }

    let new_user = NewUser::new(
        &req.first_name,
        &req.last_name,
        &req.email,
        &req.phone_number,
        &password_hash,
    )
    .with_role(role);

    // The UNIQUE constraints back up the precheck against concurrent inserts
    let user = repo.create(&new_user).await.map_err(|e| {
        if e.to_string().contains("UNIQUE") {
            ApiError::conflict("Email or phone number already registered")
        } else {
            tracing::error!("User creation failed: {}", e);
            ApiError::internal("Failed to create user")
        }
    })?;

    tracing::info!(user_id = user.id, "user registered");

    let (access_token, refresh_token) = issue_pair(&state, &user)?;
    let response = TokenPairResponse {
        access_token,
        refresh_token,
        expires_in: state.issuer.access_expiry_secs(),
        user: UserInfo::from(user),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message("User created", response)),
    ))
}

/// POST /login - Authenticate and issue a fresh token pair.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<TokenPairResponse>>, ApiError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ApiError::bad_request("Email and password are required"));
    }

    let user = UserRepository::new(state.db.pool())
        .get_by_email(&req.email)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::unauthorized(LOGIN_FAILED))?;

    crate::auth::verify_password(&req.password, &user.password)
        .map_err(|_| ApiError::unauthorized(LOGIN_FAILED))?;

    tracing::info!(user_id = user.id, "user logged in");

    let (access_token, refresh_token) = issue_pair(&state, &user)?;
    let response = TokenPairResponse {
        access_token,
        refresh_token,
        expires_in: state.issuer.access_expiry_secs(),
        user: UserInfo::from(user),
    };

    Ok(Json(ApiResponse::with_message("Login successful", response)))
}

/// POST /token/refresh - Mint a new access token.
///
/// The presented refresh token stays valid; there is no rotation.
pub async fn refresh(
    State(state): State<Arc<AppState>>,
    RefreshUser(claims): RefreshUser,
) -> Result<Json<ApiResponse<AccessTokenResponse>>, ApiError> {
    let user = UserRepository::new(state.db.pool())
        .get_by_id(claims.sub)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    let access_token = state
        .issuer
        .issue(user.id, &user.display_name(), user.role, TokenKind::Access)
        .map_err(|e| {
            tracing::error!("Token issuance failed: {}", e);
            ApiError::internal("Failed to generate token")
        })?;

    let response = AccessTokenResponse {
        access_token,
        expires_in: state.issuer.access_expiry_secs(),
    };

    Ok(Json(ApiResponse::new(response)))
}

/// POST /logout - Revoke the presented access token.
///
/// Only the access token's jti goes on the ledger; a refresh token issued
/// alongside it stays usable until it expires.
pub async fn logout(
    State(state): State<Arc<AppState>>,
    AuthUser(claims): AuthUser,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    RevocationRepository::new(state.db.pool())
        .revoke(&claims.jti)
        .await
        .map_err(|e| {
            tracing::error!("Revocation failed: {}", e);
            ApiError::internal("An internal error occurred")
        })?;

    tracing::info!(user_id = claims.sub, "user logged out");

    Ok(Json(ApiResponse::message_only("Successfully logged out")))
}
