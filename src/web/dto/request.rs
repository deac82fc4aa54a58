//! Request DTOs for the web API.

use serde::Deserialize;

/// Registration request.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address (unique).
    pub email: String,
    /// Phone number (unique).
    pub phone_number: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Requested role; defaults to `user` when absent.
    pub role: Option<String>,
}

/// Login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Email address.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// Partial user update.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateUserRequest {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New plaintext password.
    pub password: Option<String>,
}

/// New incident report.
#[derive(Debug, Deserialize)]
pub struct CreateReportRequest {
    /// Incident type or title.
    pub incident: String,
    /// Free-form details.
    pub details: String,
    /// Latitude of the incident.
    pub latitude: f64,
    /// Longitude of the incident.
    pub longitude: f64,
    /// Optional street address for the location record.
    pub address: Option<String>,
}

/// Partial report update.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateReportRequest {
    /// New incident type or title.
    pub incident: Option<String>,
    /// New details.
    pub details: Option<String>,
    /// New latitude.
    pub latitude: Option<f64>,
    /// New longitude.
    pub longitude: Option<f64>,
}

/// New media attachment record.
#[derive(Debug, Deserialize)]
pub struct CreateMediaRequest {
    /// URL of the stored file.
    pub file_url: String,
    /// MIME type.
    pub media_type: String,
}

/// Status transition request.
#[derive(Debug, Deserialize)]
pub struct SetStatusRequest {
    /// New status value.
    pub status: String,
}

/// New location record.
#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    /// Report the location belongs to.
    pub report_id: i64,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Optional street address.
    pub address: Option<String>,
}

/// Partial location update.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateLocationRequest {
    /// New latitude.
    pub latitude: Option<f64>,
    /// New longitude.
    pub longitude: Option<f64>,
    /// New address.
    pub address: Option<String>,
}

/// New emergency contact.
#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    /// Contact name.
    pub name: String,
    /// Relationship to the user.
    pub relationship: String,
    /// Phone number.
    pub phone_number: String,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional street address.
    pub address: Option<String>,
}

/// Partial emergency contact update.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateContactRequest {
    /// New name.
    pub name: Option<String>,
    /// New relationship.
    pub relationship: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New email.
    pub email: Option<String>,
    /// New address.
    pub address: Option<String>,
}

/// Pagination query parameters for admin listings.
#[derive(Debug, Deserialize, Default)]
pub struct PaginationQuery {
    /// Page number, 1-based.
    pub page: Option<u32>,
    /// Items per page, capped at 100.
    pub per_page: Option<u32>,
}

impl PaginationQuery {
    /// Resolve page and per-page with defaults and the cap applied.
    pub fn resolve(&self) -> (u32, u32) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(10).clamp(1, 100);
        (page, per_page)
    }

    /// SQL offset for the resolved page.
    pub fn offset(&self) -> i64 {
        let (page, per_page) = self.resolve();
        ((page - 1) as i64) * (per_page as i64)
    }
}
