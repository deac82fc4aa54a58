//! Data transfer objects for the web API.

mod request;
mod response;

pub use request::{
    CreateContactRequest, CreateLocationRequest, CreateMediaRequest, CreateReportRequest,
    LoginRequest, PaginationQuery, RegisterRequest, SetStatusRequest, UpdateContactRequest,
    UpdateLocationRequest, UpdateReportRequest, UpdateUserRequest,
};
pub use response::{
    AccessTokenResponse, ApiResponse, ContactInfo, LocationInfo, MediaInfo, PaginatedReports,
    ReportInfo, StatusUpdateInfo, TokenPairResponse, UserInfo,
};
