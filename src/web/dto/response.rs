//! Response DTOs for the web API.
//!
//! Every successful response uses the same envelope as errors:
//! `{"success": true, "message": ..., "data": ...}` with absent fields
//! omitted.

use serde::Serialize;

use crate::db::{EmergencyContact, Location, MediaAttachment, Report, StatusUpdate, User};

/// Uniform response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `true` on the success path.
    pub success: bool,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Success with a payload.
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Success with a payload and a message.
    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success with only a message.
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// User information in responses. Never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// User ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Role.
    pub role: String,
    /// Account creation timestamp.
    pub created_at: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone_number: user.phone_number,
            role: user.role.as_str().to_string(),
            created_at: user.created_at,
        }
    }
}

/// Registration and login response: token pair plus user info.
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    /// Access token (JWT).
    pub access_token: String,
    /// Refresh token (JWT).
    pub refresh_token: String,
    /// Access token expiry in seconds.
    pub expires_in: u64,
    /// User information.
    pub user: UserInfo,
}

/// Token refresh response: new access token only.
#[derive(Debug, Serialize)]
pub struct AccessTokenResponse {
    /// New access token.
    pub access_token: String,
    /// Expiry in seconds.
    pub expires_in: u64,
}

/// Report in responses, with its derived status.
#[derive(Debug, Serialize)]
pub struct ReportInfo {
    /// Report ID.
    pub id: i64,
    /// Owner user ID.
    pub user_id: i64,
    /// Incident type or title.
    pub incident: String,
    /// Free-form details.
    pub details: String,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Current status, derived from the audit trail.
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
}

impl ReportInfo {
    /// Build from a report row and its derived status.
    pub fn from_report(report: Report, status: &str) -> Self {
        Self {
            id: report.id,
            user_id: report.user_id,
            incident: report.incident,
            details: report.details,
            latitude: report.latitude,
            longitude: report.longitude,
            status: status.to_string(),
            created_at: report.created_at,
        }
    }
}

/// Paginated report listing.
#[derive(Debug, Serialize)]
pub struct PaginatedReports {
    /// Reports on this page.
    pub reports: Vec<ReportInfo>,
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of reports.
    pub total: u64,
}

/// Status transition in responses.
#[derive(Debug, Serialize)]
pub struct StatusUpdateInfo {
    /// Row ID.
    pub id: i64,
    /// Report ID.
    pub report_id: i64,
    /// Admin who made the transition.
    pub updated_by: i64,
    /// Status set by this transition.
    pub status: String,
    /// Transition timestamp.
    pub created_at: String,
}

impl From<StatusUpdate> for StatusUpdateInfo {
    fn from(update: StatusUpdate) -> Self {
        Self {
            id: update.id,
            report_id: update.report_id,
            updated_by: update.updated_by,
            status: update.status,
            created_at: update.created_at,
        }
    }
}

/// Media attachment in responses.
#[derive(Debug, Serialize)]
pub struct MediaInfo {
    /// Attachment ID.
    pub id: i64,
    /// Report ID.
    pub report_id: i64,
    /// URL of the stored file.
    pub file_url: String,
    /// MIME type.
    pub media_type: String,
    /// Upload timestamp.
    pub uploaded_at: String,
}

impl From<MediaAttachment> for MediaInfo {
    fn from(media: MediaAttachment) -> Self {
        Self {
            id: media.id,
            report_id: media.report_id,
            file_url: media.file_url,
            media_type: media.media_type,
            uploaded_at: media.uploaded_at,
        }
    }
}

/// Location in responses.
#[derive(Debug, Serialize)]
pub struct LocationInfo {
    /// Location ID.
    pub id: i64,
    /// Report ID.
    pub report_id: i64,
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
    /// Optional street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

impl From<Location> for LocationInfo {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            report_id: location.report_id,
            latitude: location.latitude,
            longitude: location.longitude,
            address: location.address,
            created_at: location.created_at,
        }
    }
}

/// Emergency contact in responses.
#[derive(Debug, Serialize)]
pub struct ContactInfo {
    /// Contact ID.
    pub id: i64,
    /// Owning user ID.
    pub user_id: i64,
    /// Contact name.
    pub name: String,
    /// Relationship to the user.
    pub relationship: String,
    /// Phone number.
    pub phone_number: String,
    /// Optional email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Optional street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl From<EmergencyContact> for ContactInfo {
    fn from(contact: EmergencyContact) -> Self {
        Self {
            id: contact.id,
            user_id: contact.user_id,
            name: contact.name,
            relationship: contact.relationship,
            phone_number: contact.phone_number,
            email: contact.email,
            address: contact.address,
        }
    }
}
