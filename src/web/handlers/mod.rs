//! Request handlers for the web API.

mod admin;
mod auth;
mod contact;
mod location;
mod report;
mod user;

pub use admin::{admin_delete_report, admin_get_report, admin_list_reports, admin_set_status};
pub use auth::{login, logout, refresh, register};
pub use contact::{create_contact, delete_contact, get_contact, list_contacts, update_contact};
pub use location::{
    create_location, delete_location, get_location, list_locations, update_location,
};
pub use report::{
    create_media, create_report, delete_media, delete_report, get_report, get_status, list_media,
    list_reports, set_status, update_report,
};
pub use user::{delete_user, get_user, list_users, update_user};

use crate::auth::TokenIssuer;
use crate::db::Database;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database handle; the pool inside is cheaply cloneable.
    pub db: Database,
    /// Token issuer.
    pub issuer: TokenIssuer,
}

impl AppState {
    /// Create a new application state.
    pub fn new(db: Database, issuer: TokenIssuer) -> Self {
        Self { db, issuer }
    }
}
