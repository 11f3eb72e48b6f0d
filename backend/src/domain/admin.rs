//! Admin identity model and role vocabulary.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Dashboard roles, least privileged first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// May review, update, and approve records.
    Admin,
    /// Everything an admin may do, plus record deletion.
    Superadmin,
}

/// Error returned when parsing a role from its wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseRoleError;

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("role must be admin or superadmin")
    }
}

impl std::error::Error for ParseRoleError {}

impl Role {
    /// Whether this role appears in an operation's allowed set.
    pub fn is_any_of(self, allowed: &[Self]) -> bool {
        allowed.contains(&self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
            Self::Superadmin => f.write_str("superadmin"),
        }
    }
}

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::Superadmin),
            _ => Err(ParseRoleError),
        }
    }
}

/// A stored dashboard credential identity.
///
/// The password is only ever held as a salted Argon2id hash; raw passwords
/// live in [`crate::domain::LoginCredentials`] and are zeroized on drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminUser {
    /// Stable identifier.
    pub id: Uuid,
    /// Login name, stored lower-cased and unique.
    pub username: String,
    /// Salted Argon2id password hash in PHC string format.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Dashboard role.
    pub role: Role,
    /// Inactive accounts cannot log in.
    pub active: bool,
    /// When the account last logged in successfully.
    pub last_login: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account last changed.
    pub updated_at: DateTime<Utc>,
}

/// A new admin account awaiting persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAdmin {
    /// Login name; the store lower-cases and uniques it.
    pub username: String,
    /// Salted Argon2id password hash.
    pub password_hash: String,
    /// Display name.
    pub full_name: String,
    /// Dashboard role.
    pub role: Role,
}

/// Identity fields safe to return to clients after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    /// Stable identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Dashboard role.
    pub role: Role,
}

impl From<&AdminUser> for AdminProfile {
    fn from(value: &AdminUser) -> Self {
        Self {
            id: value.id,
            username: value.username.clone(),
            full_name: value.full_name.clone(),
            role: value.role,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin", Role::Admin)]
    #[case("superadmin", Role::Superadmin)]
    fn role_round_trips_wire_strings(#[case] raw: &str, #[case] role: Role) {
        assert_eq!(raw.parse::<Role>().expect("known role"), role);
        assert_eq!(role.to_string(), raw);
    }

    #[rstest]
    #[case("Admin")]
    #[case("root")]
    #[case("")]
    fn role_rejects_unknown_strings(#[case] raw: &str) {
        assert!(raw.parse::<Role>().is_err());
    }

    #[rstest]
    #[case(Role::Admin, &[Role::Admin, Role::Superadmin], true)]
    #[case(Role::Superadmin, &[Role::Superadmin], true)]
    #[case(Role::Admin, &[Role::Superadmin], false)]
    fn allowed_set_membership(#[case] role: Role, #[case] allowed: &[Role], #[case] ok: bool) {
        assert_eq!(role.is_any_of(allowed), ok);
    }
}
