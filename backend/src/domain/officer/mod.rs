//! Officer record aggregate and its building blocks.
//!
//! The aggregate is grouped into the same sections the public form uses
//! (personal, service, contact, education, next of kin, additional,
//! declaration); serde flattening keeps the wire representation flat and
//! camelCased, matching the submitted payload.

mod enums;
mod fields;
mod submission;

pub use enums::{BloodGroup, Gender, MaritalStatus, Rank, RecordStatus, UnknownVariant};
pub use fields::{EmailAddress, FieldFormatError, Nin, PhoneNumber, ServiceNumber};
pub use submission::{FieldError, OfficerSubmission};

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Form revision stamped onto every stored record.
pub const FORM_VERSION: &str = "1.0";

/// Personal details section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Personal {
    /// Family name, stored upper-cased.
    pub surname: String,
    /// First name, stored upper-cased.
    pub first_name: String,
    /// Optional middle name, stored upper-cased.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// Date of birth; the validator requires age >= 18.
    pub date_of_birth: NaiveDate,
    /// Gender.
    pub gender: Gender,
    /// Optional blood group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<BloodGroup>,
    /// State of origin.
    pub state_of_origin: String,
    /// Local Government Area of origin.
    pub lga: String,
    /// Nationality.
    pub nationality: String,
    /// Residential address.
    pub home_address: String,
}

/// Service record section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetails {
    /// Unique service number.
    pub service_number: ServiceNumber,
    /// Rank from the fixed corps list.
    pub rank: Rank,
    /// Date of enlistment; never in the future, never before birth.
    pub date_of_enlistment: NaiveDate,
    /// Date of last promotion, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_last_promotion: Option<NaiveDate>,
    /// Command the officer serves under.
    pub command: String,
    /// Unit within the command.
    pub unit: String,
    /// Optional specialization.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    /// Current posting.
    pub current_posting: String,
    /// Date the current posting began, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_current_posting: Option<NaiveDate>,
}

/// Contact details section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Primary mobile number.
    pub phone_number: PhoneNumber,
    /// Optional secondary mobile number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_phone: Option<PhoneNumber>,
    /// Unique contact email.
    pub email_address: EmailAddress,
    /// Postal contact address.
    pub contact_address: String,
}

/// Educational qualifications section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    /// Highest qualification attained.
    pub highest_qualification: String,
    /// Field of study.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
    /// Awarding institution.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,
    /// Graduation year, 1960 up to the current year.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year_of_graduation: Option<i32>,
    /// Professional certifications, free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub professional_certifications: Option<String>,
}

/// Next-of-kin section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NextOfKin {
    /// Next of kin full name.
    #[serde(rename = "nokName")]
    pub name: String,
    /// Relationship to the officer.
    #[serde(rename = "nokRelationship")]
    pub relationship: String,
    /// Next of kin mobile number.
    #[serde(rename = "nokPhone")]
    pub phone: PhoneNumber,
    /// Next of kin address.
    #[serde(rename = "nokAddress")]
    pub address: String,
}

/// Additional information section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Additional {
    /// Marital status.
    pub marital_status: MaritalStatus,
    /// Number of dependents, never negative.
    pub number_of_dependents: i32,
    /// Optional National Identification Number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nin: Option<Nin>,
    /// Special skills, free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_skills: Option<String>,
    /// Remarks, free text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Declaration section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Declaration {
    /// Officer signature as captured by the form.
    pub officer_signature: String,
    /// Date the officer signed the declaration.
    pub submission_date: NaiveDate,
}

/// A validated, normalized officer record awaiting persistence.
///
/// Produced only by [`OfficerSubmission::validate`]; system fields are added
/// when the store accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewOfficer {
    /// Personal details.
    #[serde(flatten)]
    pub personal: Personal,
    /// Service record.
    #[serde(flatten)]
    pub service: ServiceDetails,
    /// Contact details.
    #[serde(flatten)]
    pub contact: Contact,
    /// Educational qualifications.
    #[serde(flatten)]
    pub education: Education,
    /// Next of kin.
    #[serde(flatten)]
    pub next_of_kin: NextOfKin,
    /// Additional information.
    #[serde(flatten)]
    pub additional: Additional,
    /// Declaration.
    #[serde(flatten)]
    pub declaration: Declaration,
}

/// A stored officer record with system fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OfficerRecord {
    /// Stable record identifier.
    pub id: Uuid,
    /// The submitted, validated details.
    #[serde(flatten)]
    pub details: NewOfficer,
    /// Lifecycle status.
    pub status: RecordStatus,
    /// When the submission was accepted.
    pub submitted_at: DateTime<Utc>,
    /// When the record last changed.
    pub updated_at: DateTime<Utc>,
    /// Username of the last admin editor, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
    /// Form revision the record was captured with.
    pub form_version: String,
}

impl OfficerRecord {
    /// Stamp a freshly validated submission with system fields.
    pub fn accepted(id: Uuid, details: NewOfficer, now: DateTime<Utc>) -> Self {
        Self {
            id,
            details,
            status: RecordStatus::Pending,
            submitted_at: now,
            updated_at: now,
            modified_by: None,
            form_version: FORM_VERSION.to_owned(),
        }
    }

    /// Replace the submitted details after an admin edit, forcing the
    /// `updated` status.
    pub fn apply_update(
        &mut self,
        details: NewOfficer,
        modified_by: impl Into<String>,
        now: DateTime<Utc>,
    ) {
        self.details = details;
        self.status = RecordStatus::Updated;
        self.modified_by = Some(modified_by.into());
        self.updated_at = now;
    }

    /// "SURNAME FIRSTNAME MIDDLENAME" with absent parts omitted.
    pub fn full_name(&self) -> String {
        full_name(
            &self.details.personal.surname,
            &self.details.personal.first_name,
            self.details.personal.middle_name.as_deref(),
        )
    }

    /// Whole years of age as of `on`.
    pub fn age_on(&self, on: NaiveDate) -> i32 {
        whole_years_between(self.details.personal.date_of_birth, on)
    }

    /// Whole years of service as of `on`.
    pub fn years_of_service_on(&self, on: NaiveDate) -> i32 {
        whole_years_between(self.details.service.date_of_enlistment, on)
    }
}

/// Join name parts into the display form used across listings and exports.
pub(crate) fn full_name(surname: &str, first_name: &str, middle_name: Option<&str>) -> String {
    let mut name = format!("{surname} {first_name}");
    if let Some(middle) = middle_name {
        if !middle.is_empty() {
            name.push(' ');
            name.push_str(middle);
        }
    }
    name
}

/// Whole years elapsed from `start` to `end`, counting anniversaries.
pub(crate) fn whole_years_between(start: NaiveDate, end: NaiveDate) -> i32 {
    let mut years = end.year() - start.year();
    if (end.month(), end.day()) < (start.month(), start.day()) {
        years -= 1;
    }
    years
}
