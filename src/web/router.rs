//! Router configuration for the web API.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use super::handlers::{
    admin_delete_report, admin_get_report, admin_list_reports, admin_set_status, create_contact,
    create_location, create_media, create_report, delete_contact, delete_location, delete_media,
    delete_report, delete_user, get_contact, get_location, get_report, get_status, get_user,
    list_contacts, list_locations, list_media, list_reports, list_users, login, logout, refresh,
    register, set_status, update_contact, update_location, update_report, update_user, AppState,
};
use super::middleware::{auth_gate, create_cors_layer, AuthState};

/// Create the main API router.
pub fn create_router(
    app_state: Arc<AppState>,
    auth_state: Arc<AuthState>,
    cors_origins: &[String],
) -> Router {
    let user_routes = Router::new()
        .route("/users", post(register).get(list_users))
        .route(
            "/users/:id",
            get(get_user).patch(update_user).delete(delete_user),
        );

    let session_routes = Router::new()
        .route("/login", post(login))
        .route("/token/refresh", post(refresh))
        .route("/logout", post(logout));

    let report_routes = Router::new()
        .route("/reports", post(create_report).get(list_reports))
        .route(
            "/reports/:id",
            get(get_report).patch(update_report).delete(delete_report),
        )
        .route(
            "/reports/:id/media",
            get(list_media).post(create_media).delete(delete_media),
        )
        .route("/reports/:id/status", get(get_status).post(set_status));

    let admin_routes = Router::new()
        .route("/admin/reports", get(admin_list_reports))
        .route(
            "/admin/reports/:id",
            get(admin_get_report)
                .patch(admin_set_status)
                .delete(admin_delete_report),
        );

    let location_routes = Router::new()
        .route("/locations", get(list_locations).post(create_location))
        .route(
            "/locations/:id",
            get(get_location)
                .patch(update_location)
                .delete(delete_location),
        );

    let contact_routes = Router::new()
        .route(
            "/emergency-contacts",
            get(list_contacts).post(create_contact),
        )
        .route(
            "/emergency-contacts/:id",
            get(get_contact)
                .patch(update_contact)
                .delete(delete_contact),
        );

    let auth_state_for_middleware = auth_state.clone();

    Router::new()
        .merge(user_routes)
        .merge(session_routes)
        .merge(report_routes)
        .merge(admin_routes)
        .merge(location_routes)
        .merge(contact_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(create_cors_layer(cors_origins))
                .layer(middleware::from_fn(move |req, next| {
                    let state = auth_state_for_middleware.clone();
                    auth_gate(state, req, next)
                })),
        )
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check))
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_health_router() {
        let _router = create_health_router();
        // Should not panic
    }
}
