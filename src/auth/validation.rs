//! Input validation for SIREN user registration.
//!
//! Validates email addresses, phone numbers, and names before any
//! credential is stored.

use thiserror::Error;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Minimum phone number digits.
pub const MIN_PHONE_DIGITS: usize = 7;

/// Maximum phone number digits.
pub const MAX_PHONE_DIGITS: usize = 15;

/// Maximum name length (first or last).
pub const MAX_NAME_LENGTH: usize = 64;

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Email is missing.
    #[error("email is required")]
    EmailMissing,

    /// Email is too long.
    #[error("email must be at most {MAX_EMAIL_LENGTH} characters")]
    EmailTooLong,

    /// Email format is invalid.
    #[error("invalid email format")]
    EmailInvalidFormat,

    /// Phone number is missing.
    #[error("phone number is required")]
    PhoneMissing,

    /// Phone number format is invalid.
    #[error("phone number must be {MIN_PHONE_DIGITS}-{MAX_PHONE_DIGITS} digits")]
    PhoneInvalidFormat,

    /// Name is empty.
    #[error("name cannot be empty")]
    NameEmpty,

    /// Name is too long.
    #[error("name must be at most {MAX_NAME_LENGTH} characters")]
    NameTooLong,
}

/// Validate an email address.
///
/// Requires a single `@` with a non-empty local part and a domain
/// containing a dot.
///
/// # Examples
///
/// ```
/// use siren::auth::validation::validate_email;
///
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("").is_err());
/// assert!(validate_email("invalid").is_err());
/// assert!(validate_email("no@dot").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailMissing);
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::EmailTooLong);
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    if local.is_empty() || domain.is_empty() {
        return Err(ValidationError::EmailInvalidFormat);
    }
    if domain.contains('@') || !domain.contains('.') {
        return Err(ValidationError::EmailInvalidFormat);
    }
    if domain.starts_with('.') || domain.ends_with('.') {
        return Err(ValidationError::EmailInvalidFormat);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::EmailInvalidFormat);
    }

    Ok(())
}

/// Validate a phone number.
///
/// Accepts an optional leading `+` followed by 7-15 digits. Spaces and
/// dashes are not accepted; callers normalize before storage so the
/// uniqueness check is exact-match.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Err(ValidationError::PhoneMissing);
    }

    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PhoneInvalidFormat);
    }
    if digits.len() < MIN_PHONE_DIGITS || digits.len() > MAX_PHONE_DIGITS {
        return Err(ValidationError::PhoneInvalidFormat);
    }

    Ok(())
}

/// Validate a first or last name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::NameTooLong);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_valid() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("a.b+c@sub.domain.org").is_ok());
    }

    #[test]
    fn test_validate_email_missing() {
        assert_eq!(validate_email(""), Err(ValidationError::EmailMissing));
    }

    #[test]
    fn test_validate_email_no_at() {
        assert_eq!(
            validate_email("userexample.com"),
            Err(ValidationError::EmailInvalidFormat)
        );
    }

    #[test]
    fn test_validate_email_no_domain_dot() {
        assert_eq!(
            validate_email("user@localhost"),
            Err(ValidationError::EmailInvalidFormat)
        );
    }

    #[test]
    fn test_validate_email_empty_local() {
        assert_eq!(
            validate_email("@example.com"),
            Err(ValidationError::EmailInvalidFormat)
        );
    }

    #[test]
    fn test_validate_email_trailing_dot() {
        assert_eq!(
            validate_email("user@example.com."),
            Err(ValidationError::EmailInvalidFormat)
        );
    }

    #[test]
    fn test_validate_email_whitespace() {
        assert_eq!(
            validate_email("us er@example.com"),
            Err(ValidationError::EmailInvalidFormat)
        );
    }

    #[test]
    fn test_validate_email_too_long() {
        let long = format!("{}@example.com", "a".repeat(250));
        assert_eq!(validate_email(&long), Err(ValidationError::EmailTooLong));
    }

    #[test]
    fn test_validate_phone_valid() {
        assert!(validate_phone("1234567890").is_ok());
        assert!(validate_phone("+254712345678").is_ok());
        assert!(validate_phone("1234567").is_ok());
    }

    #[test]
    fn test_validate_phone_missing() {
        assert_eq!(validate_phone(""), Err(ValidationError::PhoneMissing));
    }

    #[test]
    fn test_validate_phone_too_short() {
        assert_eq!(
            validate_phone("123456"),
            Err(ValidationError::PhoneInvalidFormat)
        );
    }

    #[test]
    fn test_validate_phone_too_long() {
        assert_eq!(
            validate_phone("1234567890123456"),
            Err(ValidationError::PhoneInvalidFormat)
        );
    }

    #[test]
    fn test_validate_phone_non_digits() {
        assert_eq!(
            validate_phone("12-34-56-78"),
            Err(ValidationError::PhoneInvalidFormat)
        );
        assert_eq!(
            validate_phone("+"),
            Err(ValidationError::PhoneInvalidFormat)
        );
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Jane").is_ok());
        assert_eq!(validate_name(""), Err(ValidationError::NameEmpty));
        assert_eq!(validate_name("   "), Err(ValidationError::NameEmpty));
        assert_eq!(
            validate_name(&"a".repeat(65)),
            Err(ValidationError::NameTooLong)
        );
    }
}
