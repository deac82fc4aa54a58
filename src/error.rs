//! Error types for SIREN.

use thiserror::Error;

/// Common error type for SIREN.
#[derive(Error, Debug)]
pub enum SirenError {
    /// Database error.
    ///
    /// Generic database error wrapping failures from sqlx. The raw text is
    /// logged at the orchestration boundary and never surfaced to clients.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (bad credentials, invalid/expired/revoked token).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Permission denied error (role mismatch).
    #[error("permission denied: {0}")]
    Permission(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Uniqueness conflict (duplicate email or phone number).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The JWT signing secret is missing at process start.
    #[error("token signing unavailable: {0}")]
    SigningUnavailable(String),
}

// Conversion from sqlx errors
impl From<sqlx::Error> for SirenError {
    fn from(e: sqlx::Error) -> Self {
        SirenError::Database(e.to_string())
    }
}

/// Result type alias for SIREN operations.
pub type Result<T> = std::result::Result<T, SirenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = SirenError::Auth("invalid password".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid password");
    }

    #[test]
    fn test_permission_error_display() {
        let err = SirenError::Permission("admin access required".to_string());
        assert_eq!(err.to_string(), "permission denied: admin access required");
    }

    #[test]
    fn test_validation_error_display() {
        let err = SirenError::Validation("email format is invalid".to_string());
        assert_eq!(err.to_string(), "validation error: email format is invalid");
    }

    #[test]
    fn test_conflict_error_display() {
        let err = SirenError::Conflict("email already taken".to_string());
        assert_eq!(err.to_string(), "conflict: email already taken");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = SirenError::NotFound("user".to_string());
        assert_eq!(err.to_string(), "user not found");
    }

    #[test]
    fn test_signing_unavailable_display() {
        let err = SirenError::SigningUnavailable("jwt_secret is empty".to_string());
        assert_eq!(
            err.to_string(),
            "token signing unavailable: jwt_secret is empty"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SirenError = io_err.into();
        assert!(matches!(err, SirenError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(SirenError::Auth("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
