//! JWT issuance and validation for SIREN.
//!
//! Tokens are self-contained: the role claim is trusted without a store
//! lookup, so only revocation requires the database.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::Role;
use crate::SirenError;

/// Token kind: short-lived access or long-lived refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Authorizes individual requests.
    Access,
    /// Used solely to mint new access tokens.
    Refresh,
}

impl TokenKind {
    /// Database/display string for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: i64,
    /// Display name of the subject.
    pub name: String,
    /// User role.
    pub role: String,
    /// Token kind.
    pub kind: TokenKind,
    /// Issued at timestamp.
    pub iat: u64,
    /// Expiration timestamp.
    pub exp: u64,
    /// JWT ID (unique identifier, revocation key).
    pub jti: String,
}

impl Claims {
    /// Parse the role claim into the closed enum, defaulting to `User`
    /// for anything unrecognized.
    pub fn role(&self) -> Role {
        self.role.parse().unwrap_or(Role::User)
    }
}

/// Token validation errors.
#[derive(Error, Debug)]
pub enum TokenError {
    /// The token has expired.
    #[error("token has expired")]
    Expired,

    /// Signature or structure is invalid.
    #[error("invalid token")]
    Invalid,

    /// Token encoding failed.
    #[error("failed to encode token: {0}")]
    Encoding(String),
}

/// Issues and validates signed tokens with a process-wide secret.
///
/// Constructed once at startup and shared by reference; there are no
/// ambient signing globals.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_expiry_secs: u64,
    refresh_expiry_secs: u64,
}

impl TokenIssuer {
    /// Create a new token issuer from the signing secret.
    ///
    /// Fails with `SigningUnavailable` when the secret is empty. This is
    /// checked once at process start, not per request.
    pub fn new(
        secret: &str,
        access_expiry_secs: u64,
        refresh_expiry_days: u64,
    ) -> Result<Self, SirenError> {
        if secret.is_empty() {
            return Err(SirenError::SigningUnavailable(
                "jwt_secret is not configured".to_string(),
            ));
        }

        let mut validation = Validation::default();
        validation.validate_exp = true;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_expiry_secs,
            refresh_expiry_secs: refresh_expiry_days * 24 * 3600,
        })
    }

    /// Decoding key for the access control gate.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }

    /// Validation settings for the access control gate.
    pub fn validation(&self) -> &Validation {
        &self.validation
    }

    /// Access token lifetime in seconds.
    pub fn access_expiry_secs(&self) -> u64 {
        self.access_expiry_secs
    }

    /// Refresh token lifetime in seconds.
    pub fn refresh_expiry_secs(&self) -> u64 {
        self.refresh_expiry_secs
    }

    /// Issue a signed token for a subject.
    ///
    /// Every call generates a fresh jti, so two tokens for the same subject
    /// are never equal.
    pub fn issue(
        &self,
        subject_id: i64,
        name: &str,
        role: Role,
        kind: TokenKind,
    ) -> Result<String, TokenError> {
        let now = chrono::Utc::now().timestamp() as u64;
        let lifetime = match kind {
            TokenKind::Access => self.access_expiry_secs,
            TokenKind::Refresh => self.refresh_expiry_secs,
        };

        let claims = Claims {
            sub: subject_id,
            name: name.to_string(),
            role: role.as_str().to_string(),
            kind,
            iat: now,
            exp: now + lifetime,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))
    }

    /// Decode and validate a token's signature and expiry.
    ///
    /// Revocation is checked separately by the access control gate; this
    /// function is side-effect-free.
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("access_expiry_secs", &self.access_expiry_secs)
            .field("refresh_expiry_secs", &self.refresh_expiry_secs)
            .finish()
    }
}
