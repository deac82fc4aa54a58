//! Authentication module for SIREN.
//!
//! Provides password hashing, the token issuer, and input validation.

mod password;
mod token;
pub mod validation;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
pub use token::{Claims, TokenError, TokenIssuer, TokenKind};
pub use validation::ValidationError;
