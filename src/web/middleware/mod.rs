//! Middleware for the web service.

mod auth;
mod cors;

pub use auth::{auth_gate, AdminUser, AuthState, AuthUser, RefreshUser};
pub use cors::create_cors_layer;
