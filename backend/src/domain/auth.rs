//! Login credential primitives.
//!
//! Handlers parse their JSON payloads into [`LoginCredentials`] before
//! calling the auth service, so the service only ever sees normalized,
//! non-empty values. The password buffer is zeroized on drop.

use std::fmt;

use zeroize::Zeroizing;

/// Raised when a login payload is structurally unusable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// No username once surrounding whitespace is removed.
    EmptyUsername,
    /// No password at all.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => f.write_str("username must not be empty"),
            Self::EmptyPassword => f.write_str("password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// A username/password pair ready for a store lookup.
///
/// ## Invariants
/// - The username is trimmed and lower-cased; admin usernames are stored
///   lower-cased, so lookups are case-insensitive by construction.
/// - The password is non-empty. Interior whitespace is preserved: what the
///   operator typed is what gets compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Normalize and validate a raw username/password pair.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let username = username.trim().to_lowercase();
        if username.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            username,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Lookup key for the admin store.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password exactly as submitted.
    pub fn password(&self) -> &str {
        &self.password
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw")]
    #[case("  \t ", "pw")]
    fn blank_usernames_are_rejected(#[case] username: &str, #[case] password: &str) {
        assert_eq!(
            LoginCredentials::try_from_parts(username, password),
            Err(LoginValidationError::EmptyUsername)
        );
    }

    #[rstest]
    fn empty_password_is_rejected_before_any_lookup() {
        assert_eq!(
            LoginCredentials::try_from_parts("admin", ""),
            Err(LoginValidationError::EmptyPassword)
        );
    }

    #[rstest]
    #[case("  Admin  ", "admin")]
    #[case("SuperAdmin", "superadmin")]
    #[case("admin", "admin")]
    fn usernames_normalize_to_lower_case(#[case] raw: &str, #[case] expected: &str) {
        let creds = LoginCredentials::try_from_parts(raw, "secret").expect("valid pair");
        assert_eq!(creds.username(), expected);
    }

    #[rstest]
    fn passwords_keep_interior_whitespace() {
        let creds = LoginCredentials::try_from_parts("admin", " spaced out ").expect("valid pair");
        assert_eq!(creds.password(), " spaced out ");
    }
}
