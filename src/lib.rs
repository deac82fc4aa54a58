//! SIREN - Safety Incident Reporting ENgine
//!
//! An incident-reporting backend: users register, authenticate, and file
//! reports; administrators triage them through an append-only status trail.
//! Authentication is JWT-based with a persistent revocation ledger.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod web;

pub use auth::{
    hash_password, validate_password, verify_password, Claims, PasswordError, TokenError,
    TokenIssuer, TokenKind, ValidationError,
};
pub use config::Config;
pub use db::{Database, NewUser, Role, User, UserRepository, UserUpdate};
pub use error::{Result, SirenError};
pub use web::WebServer;
