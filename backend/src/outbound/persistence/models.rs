//! Diesel row structs and their domain conversions.
//!
//! Rows are an internal detail of the persistence layer: reads convert into
//! domain aggregates (failing loudly on data that no longer parses), writes
//! convert from validated domain values.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::officer::{
    Additional, Contact, Declaration, Education, EmailAddress, NewOfficer, NextOfKin,
    OfficerRecord, Personal, PhoneNumber, ServiceDetails, ServiceNumber,
};
use crate::domain::officer::{Nin, Rank, RecordStatus};
use crate::domain::{AdminUser, Role};

use super::schema::{admins, officers};

/// A stored value that no longer satisfies domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored {column} is invalid: {message}")]
pub struct RowConversionError {
    /// Offending column.
    pub column: &'static str,
    /// Why it failed to parse.
    pub message: String,
}

impl RowConversionError {
    fn new(column: &'static str, err: impl std::fmt::Display) -> Self {
        Self {
            column,
            message: err.to_string(),
        }
    }
}

/// One `officers` row, field order matching the table definition.
#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = officers)]
pub struct OfficerRow {
    pub id: Uuid,
    pub surname: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub blood_group: Option<String>,
    pub state_of_origin: String,
    pub lga: String,
    pub nationality: String,
    pub home_address: String,
    pub service_number: String,
    pub rank: String,
    pub date_of_enlistment: NaiveDate,
    pub date_of_last_promotion: Option<NaiveDate>,
    pub command: String,
    pub unit: String,
    pub specialization: Option<String>,
    pub current_posting: String,
    pub date_of_current_posting: Option<NaiveDate>,
    pub phone_number: String,
    pub alternate_phone: Option<String>,
    pub email_address: String,
    pub contact_address: String,
    pub highest_qualification: String,
    pub discipline: Option<String>,
    pub institution: Option<String>,
    pub year_of_graduation: Option<i32>,
    pub professional_certifications: Option<String>,
    pub nok_name: String,
    pub nok_relationship: String,
    pub nok_phone: String,
    pub nok_address: String,
    pub marital_status: String,
    pub number_of_dependents: i32,
    pub nin: Option<String>,
    pub special_skills: Option<String>,
    pub remarks: Option<String>,
    pub officer_signature: String,
    pub submission_date: NaiveDate,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub form_version: String,
}

impl TryFrom<OfficerRow> for OfficerRecord {
    type Error = RowConversionError;

    fn try_from(row: OfficerRow) -> Result<Self, Self::Error> {
        let details = NewOfficer {
            personal: Personal {
                surname: row.surname,
                first_name: row.first_name,
                middle_name: row.middle_name,
                date_of_birth: row.date_of_birth,
                gender: row
                    .gender
                    .parse()
                    .map_err(|e| RowConversionError::new("gender", e))?,
                blood_group: row
                    .blood_group
                    .map(|raw| raw.parse())
                    .transpose()
                    .map_err(|e| RowConversionError::new("blood_group", e))?,
                state_of_origin: row.state_of_origin,
                lga: row.lga,
                nationality: row.nationality,
                home_address: row.home_address,
            },
            service: ServiceDetails {
                service_number: ServiceNumber::new(&row.service_number)
                    .map_err(|e| RowConversionError::new("service_number", e))?,
                rank: row
                    .rank
                    .parse::<Rank>()
                    .map_err(|e| RowConversionError::new("rank", e))?,
                date_of_enlistment: row.date_of_enlistment,
                date_of_last_promotion: row.date_of_last_promotion,
                command: row.command,
                unit: row.unit,
                specialization: row.specialization,
                current_posting: row.current_posting,
                date_of_current_posting: row.date_of_current_posting,
            },
            contact: Contact {
                phone_number: PhoneNumber::new(&row.phone_number)
                    .map_err(|e| RowConversionError::new("phone_number", e))?,
                alternate_phone: row
                    .alternate_phone
                    .map(PhoneNumber::new)
                    .transpose()
                    .map_err(|e| RowConversionError::new("alternate_phone", e))?,
                email_address: EmailAddress::new(&row.email_address)
                    .map_err(|e| RowConversionError::new("email_address", e))?,
                contact_address: row.contact_address,
            },
            education: Education {
                highest_qualification: row.highest_qualification,
                discipline: row.discipline,
                institution: row.institution,
                year_of_graduation: row.year_of_graduation,
                professional_certifications: row.professional_certifications,
            },
            next_of_kin: NextOfKin {
                name: row.nok_name,
                relationship: row.nok_relationship,
                phone: PhoneNumber::new(&row.nok_phone)
                    .map_err(|e| RowConversionError::new("nok_phone", e))?,
                address: row.nok_address,
            },
            additional: Additional {
                marital_status: row
                    .marital_status
                    .parse()
                    .map_err(|e| RowConversionError::new("marital_status", e))?,
                number_of_dependents: row.number_of_dependents,
                nin: row
                    .nin
                    .map(Nin::new)
                    .transpose()
                    .map_err(|e| RowConversionError::new("nin", e))?,
                special_skills: row.special_skills,
                remarks: row.remarks,
            },
            declaration: Declaration {
                officer_signature: row.officer_signature,
                submission_date: row.submission_date,
            },
        };

        Ok(Self {
            id: row.id,
            details,
            status: row
                .status
                .parse::<RecordStatus>()
                .map_err(|e| RowConversionError::new("status", e))?,
            submitted_at: row.submitted_at,
            updated_at: row.updated_at,
            modified_by: row.modified_by,
            form_version: row.form_version,
        })
    }
}

/// Insertable row for a fresh submission. `None` binds as SQL `NULL` rather
/// than falling back to column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = officers, treat_none_as_default_value = false)]
pub struct NewOfficerRow {
    pub id: Uuid,
    pub surname: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub blood_group: Option<String>,
    pub state_of_origin: String,
    pub lga: String,
    pub nationality: String,
    pub home_address: String,
    pub service_number: String,
    pub rank: String,
    pub date_of_enlistment: NaiveDate,
    pub date_of_last_promotion: Option<NaiveDate>,
    pub command: String,
    pub unit: String,
    pub specialization: Option<String>,
    pub current_posting: String,
    pub date_of_current_posting: Option<NaiveDate>,
    pub phone_number: String,
    pub alternate_phone: Option<String>,
    pub email_address: String,
    pub contact_address: String,
    pub highest_qualification: String,
    pub discipline: Option<String>,
    pub institution: Option<String>,
    pub year_of_graduation: Option<i32>,
    pub professional_certifications: Option<String>,
    pub nok_name: String,
    pub nok_relationship: String,
    pub nok_phone: String,
    pub nok_address: String,
    pub marital_status: String,
    pub number_of_dependents: i32,
    pub nin: Option<String>,
    pub special_skills: Option<String>,
    pub remarks: Option<String>,
    pub officer_signature: String,
    pub submission_date: NaiveDate,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub modified_by: Option<String>,
    pub form_version: String,
}

/// Column values shared by inserts and full-record updates.
fn detail_columns(details: NewOfficer) -> DetailColumns {
    DetailColumns {
        surname: details.personal.surname,
        first_name: details.personal.first_name,
        middle_name: details.personal.middle_name,
        date_of_birth: details.personal.date_of_birth,
        gender: details.personal.gender.to_string(),
        blood_group: details.personal.blood_group.map(|g| g.to_string()),
        state_of_origin: details.personal.state_of_origin,
        lga: details.personal.lga,
        nationality: details.personal.nationality,
        home_address: details.personal.home_address,
        service_number: details.service.service_number.into(),
        rank: details.service.rank.title().to_owned(),
        date_of_enlistment: details.service.date_of_enlistment,
        date_of_last_promotion: details.service.date_of_last_promotion,
        command: details.service.command,
        unit: details.service.unit,
        specialization: details.service.specialization,
        current_posting: details.service.current_posting,
        date_of_current_posting: details.service.date_of_current_posting,
        phone_number: details.contact.phone_number.into(),
        alternate_phone: details.contact.alternate_phone.map(Into::into),
        email_address: details.contact.email_address.into(),
        contact_address: details.contact.contact_address,
        highest_qualification: details.education.highest_qualification,
        discipline: details.education.discipline,
        institution: details.education.institution,
        year_of_graduation: details.education.year_of_graduation,
        professional_certifications: details.education.professional_certifications,
        nok_name: details.next_of_kin.name,
        nok_relationship: details.next_of_kin.relationship,
        nok_phone: details.next_of_kin.phone.into(),
        nok_address: details.next_of_kin.address,
        marital_status: details.additional.marital_status.to_string(),
        number_of_dependents: details.additional.number_of_dependents,
        nin: details.additional.nin.map(Into::into),
        special_skills: details.additional.special_skills,
        remarks: details.additional.remarks,
        officer_signature: details.declaration.officer_signature,
        submission_date: details.declaration.submission_date,
    }
}

struct DetailColumns {
    surname: String,
    first_name: String,
    middle_name: Option<String>,
    date_of_birth: NaiveDate,
    gender: String,
    blood_group: Option<String>,
    state_of_origin: String,
    lga: String,
    nationality: String,
    home_address: String,
    service_number: String,
    rank: String,
    date_of_enlistment: NaiveDate,
    date_of_last_promotion: Option<NaiveDate>,
    command: String,
    unit: String,
    specialization: Option<String>,
    current_posting: String,
    date_of_current_posting: Option<NaiveDate>,
    phone_number: String,
    alternate_phone: Option<String>,
    email_address: String,
    contact_address: String,
    highest_qualification: String,
    discipline: Option<String>,
    institution: Option<String>,
    year_of_graduation: Option<i32>,
    professional_certifications: Option<String>,
    nok_name: String,
    nok_relationship: String,
    nok_phone: String,
    nok_address: String,
    marital_status: String,
    number_of_dependents: i32,
    nin: Option<String>,
    special_skills: Option<String>,
    remarks: Option<String>,
    officer_signature: String,
    submission_date: NaiveDate,
}

impl NewOfficerRow {
    /// Build the insert row for a fresh `pending` submission.
    pub fn pending(id: Uuid, details: NewOfficer, now: DateTime<Utc>) -> Self {
        let c = detail_columns(details);
        Self {
            id,
            surname: c.surname,
            first_name: c.first_name,
            middle_name: c.middle_name,
            date_of_birth: c.date_of_birth,
            gender: c.gender,
            blood_group: c.blood_group,
            state_of_origin: c.state_of_origin,
            lga: c.lga,
            nationality: c.nationality,
            home_address: c.home_address,
            service_number: c.service_number,
            rank: c.rank,
            date_of_enlistment: c.date_of_enlistment,
            date_of_last_promotion: c.date_of_last_promotion,
            command: c.command,
            unit: c.unit,
            specialization: c.specialization,
            current_posting: c.current_posting,
            date_of_current_posting: c.date_of_current_posting,
            phone_number: c.phone_number,
            alternate_phone: c.alternate_phone,
            email_address: c.email_address,
            contact_address: c.contact_address,
            highest_qualification: c.highest_qualification,
            discipline: c.discipline,
            institution: c.institution,
            year_of_graduation: c.year_of_graduation,
            professional_certifications: c.professional_certifications,
            nok_name: c.nok_name,
            nok_relationship: c.nok_relationship,
            nok_phone: c.nok_phone,
            nok_address: c.nok_address,
            marital_status: c.marital_status,
            number_of_dependents: c.number_of_dependents,
            nin: c.nin,
            special_skills: c.special_skills,
            remarks: c.remarks,
            officer_signature: c.officer_signature,
            submission_date: c.submission_date,
            status: RecordStatus::Pending.to_string(),
            submitted_at: now,
            updated_at: now,
            modified_by: None,
            form_version: crate::domain::officer::FORM_VERSION.to_owned(),
        }
    }
}

/// Changeset applying an admin edit: every detail column plus the forced
/// `updated` status and audit fields. `submitted_at` and `form_version`
/// are never touched after acceptance.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = officers, treat_none_as_null = true)]
pub struct OfficerUpdate {
    pub surname: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub blood_group: Option<String>,
    pub state_of_origin: String,
    pub lga: String,
    pub nationality: String,
    pub home_address: String,
    pub service_number: String,
    pub rank: String,
    pub date_of_enlistment: NaiveDate,
    pub date_of_last_promotion: Option<NaiveDate>,
    pub command: String,
    pub unit: String,
    pub specialization: Option<String>,
    pub current_posting: String,
    pub date_of_current_posting: Option<NaiveDate>,
    pub phone_number: String,
    pub alternate_phone: Option<String>,
    pub email_address: String,
    pub contact_address: String,
    pub highest_qualification: String,
    pub discipline: Option<String>,
    pub institution: Option<String>,
    pub year_of_graduation: Option<i32>,
    pub professional_certifications: Option<String>,
    pub nok_name: String,
    pub nok_relationship: String,
    pub nok_phone: String,
    pub nok_address: String,
    pub marital_status: String,
    pub number_of_dependents: i32,
    pub nin: Option<String>,
    pub special_skills: Option<String>,
    pub remarks: Option<String>,
    pub officer_signature: String,
    pub submission_date: NaiveDate,
    pub status: String,
    pub updated_at: DateTime<Utc>,
    pub modified_by: Option<String>,
}

impl OfficerUpdate {
    /// Build the changeset for an admin edit.
    pub fn edited(details: NewOfficer, modified_by: &str, now: DateTime<Utc>) -> Self {
        let c = detail_columns(details);
        Self {
            surname: c.surname,
            first_name: c.first_name,
            middle_name: c.middle_name,
            date_of_birth: c.date_of_birth,
            gender: c.gender,
            blood_group: c.blood_group,
            state_of_origin: c.state_of_origin,
            lga: c.lga,
            nationality: c.nationality,
            home_address: c.home_address,
            service_number: c.service_number,
            rank: c.rank,
            date_of_enlistment: c.date_of_enlistment,
            date_of_last_promotion: c.date_of_last_promotion,
            command: c.command,
            unit: c.unit,
            specialization: c.specialization,
            current_posting: c.current_posting,
            date_of_current_posting: c.date_of_current_posting,
            phone_number: c.phone_number,
            alternate_phone: c.alternate_phone,
            email_address: c.email_address,
            contact_address: c.contact_address,
            highest_qualification: c.highest_qualification,
            discipline: c.discipline,
            institution: c.institution,
            year_of_graduation: c.year_of_graduation,
            professional_certifications: c.professional_certifications,
            nok_name: c.nok_name,
            nok_relationship: c.nok_relationship,
            nok_phone: c.nok_phone,
            nok_address: c.nok_address,
            marital_status: c.marital_status,
            number_of_dependents: c.number_of_dependents,
            nin: c.nin,
            special_skills: c.special_skills,
            remarks: c.remarks,
            officer_signature: c.officer_signature,
            submission_date: c.submission_date,
            status: RecordStatus::Updated.to_string(),
            updated_at: now,
            modified_by: Some(modified_by.to_owned()),
        }
    }
}

/// One `admins` row.
#[derive(Debug, Clone, Queryable, Identifiable)]
#[diesel(table_name = admins)]
pub struct AdminRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<AdminRow> for AdminUser {
    type Error = RowConversionError;

    fn try_from(row: AdminRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            full_name: row.full_name,
            role: row
                .role
                .parse::<Role>()
                .map_err(|e| RowConversionError::new("role", e))?,
            active: row.active,
            last_login: row.last_login,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insertable row for a new admin account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admins)]
pub struct NewAdminRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub full_name: String,
    pub role: String,
    pub active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
