//! Access control gate: JWT extractors over the revocation ledger.

use axum::{
    body::Body,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, Request},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{Claims, TokenError, TokenIssuer, TokenKind};
use crate::db::{DbPool, RevocationRepository};
use crate::web::error::ApiError;

/// Shared state for the access control gate.
///
/// Injected into request extensions by the [`auth_gate`] middleware so the
/// extractors can validate tokens and consult the revocation ledger without
/// touching handler state.
#[derive(Clone)]
pub struct AuthState {
    /// Token issuer (decoding side is what the gate uses).
    pub issuer: TokenIssuer,
    /// Pool for revocation lookups.
    pub pool: DbPool,
}

impl AuthState {
    /// Create a new gate state.
    pub fn new(issuer: TokenIssuer, pool: DbPool) -> Self {
        Self { issuer, pool }
    }
}

/// Pull the bearer token out of the Authorization header.
fn bearer_token(parts: &Parts) -> Result<String, ApiError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(|t| t.to_string())
        .ok_or_else(|| ApiError::unauthorized("Missing authorization"))
}

/// Validate a bearer token end to end: signature, expiry, kind, revocation.
///
/// The three 401 variants carry distinct messages so clients can tell a
/// stale token from a revoked one, without leaking anything about accounts.
async fn authenticate(parts: &mut Parts, expected_kind: TokenKind) -> Result<Claims, ApiError> {
    let token = bearer_token(parts)?;

    let auth_state = parts
        .extensions
        .get::<Arc<AuthState>>()
        .cloned()
        .ok_or_else(|| ApiError::internal("Auth state not configured"))?;

    let claims = auth_state.issuer.decode(&token).map_err(|e| match e {
        TokenError::Expired => ApiError::unauthorized("Token has expired"),
        _ => ApiError::unauthorized("Invalid token"),
    })?;

    if claims.kind != expected_kind {
        return Err(ApiError::unauthorized("Invalid token"));
    }

    let revoked = RevocationRepository::new(&auth_state.pool)
        .is_revoked(&claims.jti)
        .await
        .map_err(|e| {
            tracing::error!("Revocation lookup failed: {}", e);
            ApiError::internal("An internal error occurred")
        })?;
    if revoked {
        return Err(ApiError::unauthorized("Token has been revoked"));
    }

    Ok(claims)
}

/// Extractor for authenticated users.
///
/// Requires a live access token. Handlers receive the verified claims.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let claims = authenticate(parts, TokenKind::Access).await?;
            Ok(AuthUser(claims))
        })
    }
}

/// Extractor for administrators.
///
/// Authentication failures stay 401; a valid token with the wrong role is
/// 403. The role comes from the signed claim, so no user lookup happens
/// on the authorization path.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Claims);

impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let claims = authenticate(parts, TokenKind::Access).await?;
            if !claims.role().is_admin() {
                return Err(ApiError::forbidden("Admin access required"));
            }
            Ok(AdminUser(claims))
        })
    }
}

/// Extractor for the refresh flow.
///
/// Same validation pipeline as [`AuthUser`] but requires a refresh token;
/// presenting an access token here is rejected as invalid.
#[derive(Debug, Clone)]
pub struct RefreshUser(pub Claims);

impl<S> FromRequestParts<S> for RefreshUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let claims = authenticate(parts, TokenKind::Refresh).await?;
            Ok(RefreshUser(claims))
        })
    }
}

/// Middleware function to inject the gate state into request extensions.
pub async fn auth_gate(
    auth_state: Arc<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    request.extensions_mut().insert(auth_state);
    next.run(request).await
}
