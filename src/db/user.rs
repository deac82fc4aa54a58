//! User model for SIREN.
//!
//! Defines the User struct and the closed Role enum.

use std::fmt;
use std::str::FromStr;

/// User role for permission management.
///
/// A closed enumeration; authorization checks match exhaustively so a typo
/// in a role string cannot silently grant or deny access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    /// Regular user.
    #[default]
    User,
    /// Administrator.
    Admin,
}

impl Role {
    /// Convert role to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    /// Check if this role satisfies the required role.
    ///
    /// # Examples
    ///
    /// ```
    /// use siren::db::Role;
    ///
    /// assert!(Role::Admin.can_access(Role::User));
    /// assert!(Role::User.can_access(Role::User));
    /// assert!(!Role::User.can_access(Role::Admin));
    /// ```
    pub fn can_access(&self, required: Role) -> bool {
        *self >= required
    }

    /// Check if this role is admin.
    pub fn is_admin(&self) -> bool {
        *self == Role::Admin
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// User entity representing a registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address (unique).
    pub email: String,
    /// Phone number (unique).
    pub phone_number: String,
    /// Password hash (Argon2).
    pub password: String,
    /// User role for permissions.
    pub role: Role,
    /// Account creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
}

impl User {
    /// Check if this user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Display name used in token claims.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// New user data for creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Password hash (already hashed, never plaintext).
    pub password: String,
    /// Role.
    pub role: Role,
}

impl NewUser {
    /// Create a new user record with the default role.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        phone_number: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            phone_number: phone_number.into(),
            password: password_hash.into(),
            role: Role::default(),
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Partial user update; only set fields are modified.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New first name.
    pub first_name: Option<String>,
    /// New last name.
    pub last_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New password hash (re-hashed by the caller on password change).
    pub password: Option<String>,
    /// New role.
    pub role: Option<Role>,
}

impl UserUpdate {
    /// Whether any field is set.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.phone_number.is_none()
            && self.password.is_none()
            && self.role.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Admin.as_str(), "admin");
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("sysop".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_default() {
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_role_can_access() {
        assert!(Role::Admin.can_access(Role::User));
        assert!(Role::Admin.can_access(Role::Admin));
        assert!(Role::User.can_access(Role::User));
        assert!(!Role::User.can_access(Role::Admin));
    }

    #[test]
    fn test_role_display() {
        assert_eq!(Role::Admin.to_string(), "admin");
    }

    #[test]
    fn test_new_user_builder() {
        let user = NewUser::new("Jane", "Doe", "jane@example.com", "1234567890", "hash");
        assert_eq!(user.role, Role::User);

        let admin = user.clone().with_role(Role::Admin);
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.email, "jane@example.com");
    }

    #[test]
    fn test_user_update_is_empty() {
        let update = UserUpdate::default();
        assert!(update.is_empty());

        let update = UserUpdate {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
