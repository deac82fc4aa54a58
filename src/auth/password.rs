//! Password hashing and strength policy for SIREN.
//!
//! Uses Argon2id for secure password hashing.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params,
};
use rand_core::OsRng;
use thiserror::Error;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password-related errors.
#[derive(Error, Debug)]
pub enum PasswordError {
    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    TooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    TooLong,

    /// Password has no digit.
    #[error("password must contain at least one digit")]
    MissingDigit,

    /// Password has no uppercase character.
    #[error("password must contain at least one uppercase letter")]
    MissingUppercase,

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    HashError(String),

    /// Password hash is invalid.
    #[error("invalid password hash format")]
    InvalidHash,

    /// Password verification failed (wrong password).
    #[error("password verification failed")]
    VerificationFailed,
}

impl PasswordError {
    /// Whether this error is a strength-policy violation (a weak credential)
    /// as opposed to a hashing or verification failure.
    pub fn is_weak_credential(&self) -> bool {
        matches!(
            self,
            PasswordError::TooShort
                | PasswordError::TooLong
                | PasswordError::MissingDigit
                | PasswordError::MissingUppercase
        )
    }
}

/// Create the Argon2 hasher with recommended parameters.
///
/// Parameters:
/// - Memory cost: 64 MB (65536 KiB)
/// - Time cost: 3 iterations
/// - Parallelism: 4 threads
fn create_argon2() -> Argon2<'static> {
    let m_cost = 65536;
    let t_cost = 3;
    let p_cost = 4;

    let params = Params::new(m_cost, t_cost, p_cost, None).expect("valid Argon2 params");
    Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params)
}

/// Hash a password using Argon2id.
///
/// The strength policy is enforced first; no hash is computed for a weak
/// credential. Returns a PHC-formatted hash string that includes the salt
/// and parameters.
///
/// # Examples
///
/// ```
/// use siren::hash_password;
///
/// let hash = hash_password("Secur3pass").unwrap();
/// assert!(hash.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    validate_password(password)?;

    let salt = SaltString::generate(&mut OsRng);

    let argon2 = create_argon2();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored hash.
///
/// Returns `Ok(())` if the password matches, or an error if it doesn't.
/// Comparison runs in constant time inside the Argon2 verifier.
///
/// # Examples
///
/// ```
/// use siren::{hash_password, verify_password};
///
/// let hash = hash_password("Secur3pass").unwrap();
/// assert!(verify_password("Secur3pass", &hash).is_ok());
/// assert!(verify_password("WrongPass1", &hash).is_err());
/// ```
pub fn verify_password(password: &str, hash: &str) -> Result<(), PasswordError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHash)?;

    // Parameters are taken from the parsed hash, not from create_argon2()
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| PasswordError::VerificationFailed)
}

/// Validate the password strength policy.
///
/// Requirements:
/// - Length: 8-128 characters
/// - At least one ASCII digit
/// - At least one uppercase letter
///
/// # Examples
///
/// ```
/// use siren::validate_password;
///
/// assert!(validate_password("Passw0rd").is_ok());
/// assert!(validate_password("short").is_err());
/// assert!(validate_password("alllowercase1").is_err());
/// assert!(validate_password("NoDigitsHere").is_err());
/// ```
pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort);
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(PasswordError::TooLong);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingDigit);
    }
    if !password.chars().any(|c| c.is_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    Ok(())
}
