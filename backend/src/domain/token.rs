//! Signed, time-limited bearer tokens for the admin dashboard.
//!
//! Tokens are HS256 JWTs carrying the admin identity and role claim. The
//! signer owns the shared secret; handlers only ever see issued strings and
//! verified [`Claims`].

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::admin::{AdminUser, Role};

/// Default token lifetime: seven days.
pub const DEFAULT_TOKEN_LIFETIME_DAYS: i64 = 7;

/// Verification failures for presented tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// No credential was presented.
    #[error("no token provided")]
    Missing,
    /// Signature, structure, or claims are invalid.
    #[error("invalid token")]
    Invalid,
    /// The token's lifetime has elapsed.
    #[error("token has expired")]
    Expired,
}

/// Claims embedded in an issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Admin identifier.
    pub sub: Uuid,
    /// Login name at issue time.
    pub username: String,
    /// Role claim checked by the authorization gate.
    pub role: Role,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    pub exp: i64,
}

/// Issues and verifies signed bearer tokens.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenSigner {
    /// Build a signer from the shared secret with the default lifetime.
    pub fn new(secret: &str) -> Self {
        Self::with_lifetime(secret, Duration::days(DEFAULT_TOKEN_LIFETIME_DAYS))
    }

    /// Build a signer with an explicit token lifetime.
    pub fn with_lifetime(secret: &str, lifetime: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            lifetime,
        }
    }

    /// Issue a token for an authenticated admin, valid from `now`.
    pub fn issue(&self, admin: &AdminUser, now: DateTime<Utc>) -> Result<String, TokenError> {
        let claims = Claims {
            sub: admin.id,
            username: admin.username.clone(),
            role: admin.role,
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| TokenError::Invalid)
    }

    /// Verify a presented token and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // No leeway: an elapsed lifetime is reported as expired immediately.
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn admin() -> AdminUser {
        let now = Utc::now();
        AdminUser {
            id: Uuid::new_v4(),
            username: "admin".into(),
            password_hash: "unused".into(),
            full_name: "System Administrator".into(),
            role: Role::Superadmin,
            active: true,
            last_login: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn issued_tokens_verify_and_carry_identity_and_role() {
        let signer = TokenSigner::new("test-secret");
        let admin = admin();
        let token = signer.issue(&admin, Utc::now()).expect("token issues");

        let claims = signer.verify(&token).expect("token verifies");
        assert_eq!(claims.sub, admin.id);
        assert_eq!(claims.username, "admin");
        assert_eq!(claims.role, Role::Superadmin);
        assert!(claims.exp > claims.iat);
    }

    #[rstest]
    fn tokens_signed_with_another_secret_are_invalid() {
        let issuer = TokenSigner::new("secret-a");
        let verifier = TokenSigner::new("secret-b");
        let token = issuer.issue(&admin(), Utc::now()).expect("token issues");

        assert_eq!(verifier.verify(&token), Err(TokenError::Invalid));
    }

    #[rstest]
    fn elapsed_lifetime_is_reported_as_expired() {
        let signer = TokenSigner::new("test-secret");
        // Issued eight days ago with a seven-day lifetime.
        let issued_at = Utc::now() - Duration::days(8);
        let token = signer.issue(&admin(), issued_at).expect("token issues");

        assert_eq!(signer.verify(&token), Err(TokenError::Expired));
    }

    #[rstest]
    #[case("")]
    #[case("garbage")]
    #[case("aaaa.bbbb.cccc")]
    fn malformed_tokens_are_invalid(#[case] token: &str) {
        let signer = TokenSigner::new("test-secret");
        assert_eq!(signer.verify(token), Err(TokenError::Invalid));
    }
}
