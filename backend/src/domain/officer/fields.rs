//! Validated scalar fields for officer records.
//!
//! Each newtype normalizes its input (trim, case) and enforces the format
//! the public form promises, so a constructed value is always storable.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Format failures raised by the field constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormatError {
    /// The value was missing or blank once trimmed.
    Empty,
    /// Not an 11-digit Nigerian mobile number with a valid prefix.
    Phone,
    /// Not a plausible email address.
    Email,
    /// Not an 11-digit National Identification Number.
    Nin,
}

impl fmt::Display for FieldFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "is required"),
            Self::Phone => write!(f, "must be a valid Nigerian phone number"),
            Self::Email => write!(f, "must be a valid email address"),
            Self::Nin => write!(f, "must be exactly 11 digits"),
        }
    }
}

impl std::error::Error for FieldFormatError {}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();
static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
static NIN_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        // 11 digits, 0 then a valid mobile prefix (070x/080x/081x/090x/091x).
        Regex::new(r"^0[789][01]\d{8}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^\S+@\S+\.\S+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn nin_regex() -> &'static Regex {
    NIN_RE.get_or_init(|| {
        Regex::new(r"^\d{11}$")
            .unwrap_or_else(|error| panic!("NIN regex failed to compile: {error}"))
    })
}

macro_rules! string_field {
    ($type:ident) => {
        impl AsRef<str> for $type {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl fmt::Display for $type {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl From<$type> for String {
            fn from(value: $type) -> Self {
                value.0
            }
        }

        impl TryFrom<String> for $type {
            type Error = FieldFormatError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }
    };
}

/// Unique service number assigned to an officer.
///
/// ## Invariants
/// - Trimmed, upper-cased, non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "CDT/2020/01234")]
pub struct ServiceNumber(String);

impl ServiceNumber {
    /// Normalize and validate a raw service number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldFormatError> {
        let normalized = raw.as_ref().trim().to_uppercase();
        if normalized.is_empty() {
            return Err(FieldFormatError::Empty);
        }
        Ok(Self(normalized))
    }
}

string_field!(ServiceNumber);

/// Unique contact email, stored lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "a.bello@example.org")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Normalize and validate a raw email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldFormatError> {
        let normalized = raw.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return Err(FieldFormatError::Empty);
        }
        if !email_regex().is_match(&normalized) {
            return Err(FieldFormatError::Email);
        }
        Ok(Self(normalized))
    }
}

string_field!(EmailAddress);

/// Nigerian mobile number in the national 11-digit format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "08012345678")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Normalize and validate a raw phone number.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldFormatError> {
        let normalized = raw.as_ref().trim().to_owned();
        if normalized.is_empty() {
            return Err(FieldFormatError::Empty);
        }
        if !phone_regex().is_match(&normalized) {
            return Err(FieldFormatError::Phone);
        }
        Ok(Self(normalized))
    }
}

string_field!(PhoneNumber);

/// 11-digit National Identification Number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "12345678901")]
pub struct Nin(String);

impl Nin {
    /// Normalize and validate a raw NIN.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, FieldFormatError> {
        let normalized = raw.as_ref().trim().to_owned();
        if normalized.is_empty() {
            return Err(FieldFormatError::Empty);
        }
        if !nin_regex().is_match(&normalized) {
            return Err(FieldFormatError::Nin);
        }
        Ok(Self(normalized))
    }
}

string_field!(Nin);

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("08012345678")]
    #[case("07098765432")]
    #[case("09112345678")]
    #[case("08198765432")]
    fn accepts_valid_mobile_prefixes(#[case] raw: &str) {
        let phone = PhoneNumber::new(raw).expect("valid phone");
        assert_eq!(phone.as_ref(), raw);
    }

    #[rstest]
    #[case("0801234567", FieldFormatError::Phone)] // too short
    #[case("080123456789", FieldFormatError::Phone)] // too long
    #[case("06012345678", FieldFormatError::Phone)] // bad prefix
    #[case("+2348012345678", FieldFormatError::Phone)] // international form
    #[case("", FieldFormatError::Empty)]
    fn rejects_malformed_phone_numbers(#[case] raw: &str, #[case] expected: FieldFormatError) {
        assert_eq!(PhoneNumber::new(raw).expect_err("must fail"), expected);
    }

    #[rstest]
    #[case("12345678901")]
    fn accepts_eleven_digit_nin(#[case] raw: &str) {
        assert!(Nin::new(raw).is_ok());
    }

    #[rstest]
    #[case("1234567890")]
    #[case("123456789012")]
    #[case("1234567890a")]
    fn rejects_malformed_nin(#[case] raw: &str) {
        assert_eq!(Nin::new(raw).expect_err("must fail"), FieldFormatError::Nin);
    }

    #[rstest]
    fn email_is_lower_cased() {
        let email = EmailAddress::new("  A.Bello@Example.ORG ").expect("valid email");
        assert_eq!(email.as_ref(), "a.bello@example.org");
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("a@b")]
    #[case("a b@c.d")]
    fn rejects_malformed_email(#[case] raw: &str) {
        assert_eq!(
            EmailAddress::new(raw).expect_err("must fail"),
            FieldFormatError::Email
        );
    }

    #[rstest]
    fn service_number_is_upper_cased_and_trimmed() {
        let number = ServiceNumber::new(" cdt/2020/01234 ").expect("valid number");
        assert_eq!(number.as_ref(), "CDT/2020/01234");
    }
}
