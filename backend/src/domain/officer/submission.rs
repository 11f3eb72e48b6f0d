//! The field validator for public officer submissions.
//!
//! An [`OfficerSubmission`] is the raw, string-typed payload exactly as the
//! form posts it. [`OfficerSubmission::validate`] applies every declared rule
//! and either produces a normalized [`NewOfficer`] or the complete list of
//! field errors. Validation never stops at the first failure; a rejected
//! submission reports everything the submitter has to fix.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::fields::{EmailAddress, Nin, PhoneNumber, ServiceNumber};
use super::{
    Additional, BloodGroup, Contact, Declaration, Education, Gender, MaritalStatus, NewOfficer,
    NextOfKin, Personal, Rank, ServiceDetails, whole_years_between,
};

/// Minimum age, in whole years, at which a submission is accepted.
pub const MINIMUM_AGE: i32 = 18;

/// Earliest accepted graduation year.
const GRADUATION_YEAR_FLOOR: i32 = 1960;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    /// The submitted field, in its wire spelling.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    /// Build an error for `field`, composing the message from the detail.
    pub fn new(field: &str, detail: impl fmt::Display) -> Self {
        Self {
            field: field.to_owned(),
            message: format!("{field} {detail}"),
        }
    }
}

/// Raw submission payload, one optional string per form field.
///
/// Dates arrive as `YYYY-MM-DD` strings and are parsed by the validator so
/// that a malformed date is reported as a field error next to the others
/// rather than failing JSON deserialization wholesale.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct OfficerSubmission {
    /// Family name.
    pub surname: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Middle name.
    pub middle_name: Option<String>,
    /// Date of birth, `YYYY-MM-DD`.
    pub date_of_birth: Option<String>,
    /// Gender: `Male` or `Female`.
    pub gender: Option<String>,
    /// Blood group, e.g. `O+`.
    pub blood_group: Option<String>,
    /// State of origin.
    pub state_of_origin: Option<String>,
    /// Local Government Area.
    pub lga: Option<String>,
    /// Nationality.
    pub nationality: Option<String>,
    /// Residential address.
    pub home_address: Option<String>,
    /// Service number.
    pub service_number: Option<String>,
    /// Rank title from the fixed list.
    pub rank: Option<String>,
    /// Enlistment date, `YYYY-MM-DD`.
    pub date_of_enlistment: Option<String>,
    /// Last promotion date, `YYYY-MM-DD`.
    pub date_of_last_promotion: Option<String>,
    /// Command.
    pub command: Option<String>,
    /// Unit.
    pub unit: Option<String>,
    /// Specialization.
    pub specialization: Option<String>,
    /// Current posting.
    pub current_posting: Option<String>,
    /// Date the current posting began, `YYYY-MM-DD`.
    pub date_of_current_posting: Option<String>,
    /// Primary phone number.
    pub phone_number: Option<String>,
    /// Alternate phone number.
    pub alternate_phone: Option<String>,
    /// Email address.
    pub email_address: Option<String>,
    /// Contact address.
    pub contact_address: Option<String>,
    /// Highest qualification.
    pub highest_qualification: Option<String>,
    /// Discipline.
    pub discipline: Option<String>,
    /// Institution.
    pub institution: Option<String>,
    /// Graduation year.
    pub year_of_graduation: Option<i32>,
    /// Professional certifications.
    pub professional_certifications: Option<String>,
    /// Next of kin name.
    pub nok_name: Option<String>,
    /// Next of kin relationship.
    pub nok_relationship: Option<String>,
    /// Next of kin phone number.
    pub nok_phone: Option<String>,
    /// Next of kin address.
    pub nok_address: Option<String>,
    /// Marital status.
    pub marital_status: Option<String>,
    /// Number of dependents.
    pub number_of_dependents: Option<i32>,
    /// National Identification Number.
    pub nin: Option<String>,
    /// Special skills.
    pub special_skills: Option<String>,
    /// Remarks.
    pub remarks: Option<String>,
    /// Officer signature.
    pub officer_signature: Option<String>,
    /// Declaration date, `YYYY-MM-DD`.
    pub submission_date: Option<String>,
}

impl OfficerSubmission {
    /// Validate and normalize the submission against `today`.
    ///
    /// # Errors
    /// Returns every field failure at once; the list is never empty on the
    /// error path.
    pub fn validate(self, today: NaiveDate) -> Result<NewOfficer, Vec<FieldError>> {
        let mut errors = Vec::new();

        // The enlistment cross-check needs the birth date even when another
        // personal field fails, so it is parsed independently of the section.
        let date_of_birth = self
            .date_of_birth
            .as_deref()
            .and_then(|raw| parse_date(raw).ok());

        let personal = self.personal(&mut errors, today);
        let service = self.service(&mut errors, today, date_of_birth);
        let contact = self.contact(&mut errors);
        let education = self.education(&mut errors, today);
        let next_of_kin = self.next_of_kin(&mut errors);
        let additional = self.additional(&mut errors);
        let declaration = self.declaration(&mut errors);

        match (
            personal,
            service,
            contact,
            education,
            next_of_kin,
            additional,
            declaration,
        ) {
            (
                Some(personal),
                Some(service),
                Some(contact),
                Some(education),
                Some(next_of_kin),
                Some(additional),
                Some(declaration),
            ) if errors.is_empty() => Ok(NewOfficer {
                personal,
                service,
                contact,
                education,
                next_of_kin,
                additional,
                declaration,
            }),
            _ => {
                debug_assert!(!errors.is_empty(), "missing section without recorded error");
                Err(errors)
            }
        }
    }

    fn personal(&self, errors: &mut Vec<FieldError>, today: NaiveDate) -> Option<Personal> {
        let surname = required_upper(errors, "surname", self.surname.as_deref());
        let first_name = required_upper(errors, "firstName", self.first_name.as_deref());
        let middle_name = optional_upper(self.middle_name.as_deref());
        let date_of_birth = required_date(errors, "dateOfBirth", self.date_of_birth.as_deref());
        if let Some(dob) = date_of_birth {
            if whole_years_between(dob, today) < MINIMUM_AGE {
                errors.push(FieldError::new(
                    "dateOfBirth",
                    format!("implies an age below {MINIMUM_AGE} years"),
                ));
            }
        }
        let gender = required_parsed::<Gender>(errors, "gender", self.gender.as_deref());
        let blood_group =
            optional_parsed::<BloodGroup>(errors, "bloodGroup", self.blood_group.as_deref());
        let state_of_origin = required_text(errors, "stateOfOrigin", self.state_of_origin.as_deref());
        let lga = required_text(errors, "lga", self.lga.as_deref());
        let nationality = required_text(errors, "nationality", self.nationality.as_deref());
        let home_address = required_text(errors, "homeAddress", self.home_address.as_deref());

        Some(Personal {
            surname: surname?,
            first_name: first_name?,
            middle_name,
            date_of_birth: date_of_birth?,
            gender: gender?,
            blood_group,
            state_of_origin: state_of_origin?,
            lga: lga?,
            nationality: nationality?,
            home_address: home_address?,
        })
    }

    fn service(
        &self,
        errors: &mut Vec<FieldError>,
        today: NaiveDate,
        date_of_birth: Option<NaiveDate>,
    ) -> Option<ServiceDetails> {
        let service_number = match self.service_number.as_deref() {
            None => {
                errors.push(FieldError::new("serviceNumber", "is required"));
                None
            }
            Some(raw) => record(errors, "serviceNumber", ServiceNumber::new(raw)),
        };
        let rank = required_parsed::<Rank>(errors, "rank", self.rank.as_deref());
        let date_of_enlistment =
            required_date(errors, "dateOfEnlistment", self.date_of_enlistment.as_deref());
        if let Some(enlisted) = date_of_enlistment {
            if enlisted > today {
                errors.push(FieldError::new(
                    "dateOfEnlistment",
                    "must not be in the future",
                ));
            }
            if let Some(born) = date_of_birth {
                if enlisted < born {
                    errors.push(FieldError::new(
                        "dateOfEnlistment",
                        "must not precede the date of birth",
                    ));
                }
            }
        }
        let date_of_last_promotion = optional_date(
            errors,
            "dateOfLastPromotion",
            self.date_of_last_promotion.as_deref(),
        );
        let command = required_text(errors, "command", self.command.as_deref());
        let unit = required_text(errors, "unit", self.unit.as_deref());
        let specialization = optional_text(self.specialization.as_deref());
        let current_posting = required_text(errors, "currentPosting", self.current_posting.as_deref());
        let date_of_current_posting = optional_date(
            errors,
            "dateOfCurrentPosting",
            self.date_of_current_posting.as_deref(),
        );

        Some(ServiceDetails {
            service_number: service_number?,
            rank: rank?,
            date_of_enlistment: date_of_enlistment?,
            date_of_last_promotion,
            command: command?,
            unit: unit?,
            specialization,
            current_posting: current_posting?,
            date_of_current_posting,
        })
    }

    fn contact(&self, errors: &mut Vec<FieldError>) -> Option<Contact> {
        let phone_number = required_phone(errors, "phoneNumber", self.phone_number.as_deref());
        let alternate_phone = optional_phone(errors, "alternatePhone", self.alternate_phone.as_deref());
        let email_address = match self.email_address.as_deref() {
            None => {
                errors.push(FieldError::new("emailAddress", "is required"));
                None
            }
            Some(raw) => record(errors, "emailAddress", EmailAddress::new(raw)),
        };
        let contact_address = required_text(errors, "contactAddress", self.contact_address.as_deref());

        Some(Contact {
            phone_number: phone_number?,
            alternate_phone,
            email_address: email_address?,
            contact_address: contact_address?,
        })
    }

    fn education(&self, errors: &mut Vec<FieldError>, today: NaiveDate) -> Option<Education> {
        let highest_qualification = required_text(
            errors,
            "highestQualification",
            self.highest_qualification.as_deref(),
        );
        let year_of_graduation = self.year_of_graduation;
        if let Some(year) = year_of_graduation {
            if year < GRADUATION_YEAR_FLOOR || year > today.year() {
                errors.push(FieldError::new(
                    "yearOfGraduation",
                    format!("must be between {GRADUATION_YEAR_FLOOR} and {}", today.year()),
                ));
            }
        }

        Some(Education {
            highest_qualification: highest_qualification?,
            discipline: optional_text(self.discipline.as_deref()),
            institution: optional_text(self.institution.as_deref()),
            year_of_graduation,
            professional_certifications: optional_text(self.professional_certifications.as_deref()),
        })
    }

    fn next_of_kin(&self, errors: &mut Vec<FieldError>) -> Option<NextOfKin> {
        let name = required_text(errors, "nokName", self.nok_name.as_deref());
        let relationship = required_text(errors, "nokRelationship", self.nok_relationship.as_deref());
        let phone = required_phone(errors, "nokPhone", self.nok_phone.as_deref());
        let address = required_text(errors, "nokAddress", self.nok_address.as_deref());

        Some(NextOfKin {
            name: name?,
            relationship: relationship?,
            phone: phone?,
            address: address?,
        })
    }

    fn additional(&self, errors: &mut Vec<FieldError>) -> Option<Additional> {
        let marital_status =
            required_parsed::<MaritalStatus>(errors, "maritalStatus", self.marital_status.as_deref());
        let number_of_dependents = self.number_of_dependents.unwrap_or(0);
        if number_of_dependents < 0 {
            errors.push(FieldError::new("numberOfDependents", "must not be negative"));
        }
        let nin = match self.nin.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => record(errors, "nin", Nin::new(raw)),
        };

        Some(Additional {
            marital_status: marital_status?,
            number_of_dependents,
            nin,
            special_skills: optional_text(self.special_skills.as_deref()),
            remarks: optional_text(self.remarks.as_deref()),
        })
    }

    fn declaration(&self, errors: &mut Vec<FieldError>) -> Option<Declaration> {
        let officer_signature =
            required_text(errors, "officerSignature", self.officer_signature.as_deref());
        let submission_date =
            required_date(errors, "submissionDate", self.submission_date.as_deref());

        Some(Declaration {
            officer_signature: officer_signature?,
            submission_date: submission_date?,
        })
    }
}

/// Record a constructor failure under `field`, passing successes through.
fn record<T, E: fmt::Display>(
    errors: &mut Vec<FieldError>,
    field: &str,
    result: Result<T, E>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            errors.push(FieldError::new(field, err));
            None
        }
    }
}

fn required_text(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(trimmed) => Some(trimmed.to_owned()),
    }
}

fn required_upper(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) -> Option<String> {
    required_text(errors, field, value).map(|text| text.to_uppercase())
}

fn optional_text(value: Option<&str>) -> Option<String> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(trimmed) => Some(trimmed.to_owned()),
    }
}

fn optional_upper(value: Option<&str>) -> Option<String> {
    optional_text(value).map(|text| text.to_uppercase())
}

fn parse_date(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
}

fn required_date(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(raw) => match parse_date(raw) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new(field, "must be a valid date (YYYY-MM-DD)"));
                None
            }
        },
    }
}

fn optional_date(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) -> Option<NaiveDate> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(raw) => match parse_date(raw) {
            Ok(date) => Some(date),
            Err(_) => {
                errors.push(FieldError::new(field, "must be a valid date (YYYY-MM-DD)"));
                None
            }
        },
    }
}

fn required_parsed<T>(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value.map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(raw) => record(errors, field, raw.parse::<T>()),
    }
}

fn optional_parsed<T>(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) -> Option<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    match value.map(str::trim) {
        None | Some("") => None,
        Some(raw) => record(errors, field, raw.parse::<T>()),
    }
}

fn required_phone(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&str>,
) -> Option<PhoneNumber> {
    match value.map(str::trim) {
        None | Some("") => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
        Some(raw) => record(errors, field, PhoneNumber::new(raw)),
    }
}

fn optional_phone(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: Option<&str>,
) -> Option<PhoneNumber> {
    match value.map(str::trim) {
        None | Some("") => None,
        Some(raw) => record(errors, field, PhoneNumber::new(raw)),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn today() -> NaiveDate {
        date(2025, 6, 1)
    }

    /// A submission that passes every rule: age 30, enlisted 5 years ago.
    fn complete_submission() -> OfficerSubmission {
        OfficerSubmission {
            surname: Some("Okafor".into()),
            first_name: Some("Chukwudi".into()),
            middle_name: Some("Emeka".into()),
            date_of_birth: Some("1995-06-01".into()),
            gender: Some("Male".into()),
            blood_group: Some("O+".into()),
            state_of_origin: Some("Anambra".into()),
            lga: Some("Awka South".into()),
            nationality: Some("Nigerian".into()),
            home_address: Some("12 Zik Avenue, Awka".into()),
            service_number: Some("cdt/2020/01234".into()),
            rank: Some("Inspector".into()),
            date_of_enlistment: Some("2020-06-01".into()),
            command: Some("Enugu Command".into()),
            unit: Some("Operations".into()),
            current_posting: Some("Enugu HQ".into()),
            phone_number: Some("08012345678".into()),
            email_address: Some("a@b.com".into()),
            contact_address: Some("12 Zik Avenue, Awka".into()),
            highest_qualification: Some("B.Sc".into()),
            nok_name: Some("Adaeze Okafor".into()),
            nok_relationship: Some("Spouse".into()),
            nok_phone: Some("08087654321".into()),
            nok_address: Some("12 Zik Avenue, Awka".into()),
            marital_status: Some("Married".into()),
            nin: Some("12345678901".into()),
            officer_signature: Some("C.E. Okafor".into()),
            submission_date: Some("2025-06-01".into()),
            ..OfficerSubmission::default()
        }
    }

    fn field_names(errors: &[FieldError]) -> Vec<&str> {
        errors.iter().map(|e| e.field.as_str()).collect()
    }

    #[rstest]
    fn accepts_and_normalizes_a_complete_submission() {
        let officer = complete_submission()
            .validate(today())
            .expect("complete submission must validate");

        assert_eq!(officer.personal.surname, "OKAFOR");
        assert_eq!(officer.personal.first_name, "CHUKWUDI");
        assert_eq!(officer.personal.middle_name.as_deref(), Some("EMEKA"));
        assert_eq!(officer.service.service_number.as_ref(), "CDT/2020/01234");
        assert_eq!(officer.service.rank, Rank::Inspector);
        assert_eq!(officer.contact.email_address.as_ref(), "a@b.com");
        assert_eq!(officer.contact.phone_number.as_ref(), "08012345678");
        assert_eq!(officer.additional.nin.as_ref().map(AsRef::as_ref), Some("12345678901"));
        assert_eq!(officer.additional.number_of_dependents, 0);
    }

    #[rstest]
    #[case("2008-06-02")] // turns 18 the day after
    #[case("2010-01-01")]
    fn rejects_submitters_under_eighteen(#[case] dob: &str) {
        let submission = OfficerSubmission {
            date_of_birth: Some(dob.into()),
            ..complete_submission()
        };
        let errors = submission.validate(today()).expect_err("must reject");
        assert!(field_names(&errors).contains(&"dateOfBirth"), "{errors:?}");
    }

    #[rstest]
    fn accepts_a_submitter_who_turned_eighteen_today() {
        let submission = OfficerSubmission {
            date_of_birth: Some("2007-06-01".into()),
            date_of_enlistment: Some("2025-05-30".into()),
            ..complete_submission()
        };
        assert!(submission.validate(today()).is_ok());
    }

    #[rstest]
    fn rejects_enlistment_before_birth() {
        let submission = OfficerSubmission {
            date_of_enlistment: Some("1990-01-01".into()),
            ..complete_submission()
        };
        let errors = submission.validate(today()).expect_err("must reject");
        assert!(field_names(&errors).contains(&"dateOfEnlistment"));
    }

    #[rstest]
    fn rejects_enlistment_in_the_future() {
        let submission = OfficerSubmission {
            date_of_enlistment: Some("2026-01-01".into()),
            ..complete_submission()
        };
        let errors = submission.validate(today()).expect_err("must reject");
        assert!(field_names(&errors).contains(&"dateOfEnlistment"));
    }

    #[rstest]
    #[case("Sergeant")]
    #[case("General")]
    #[case("inspector")]
    fn rejects_ranks_outside_the_fixed_list(#[case] rank: &str) {
        let submission = OfficerSubmission {
            rank: Some(rank.into()),
            ..complete_submission()
        };
        let errors = submission.validate(today()).expect_err("must reject");
        assert!(field_names(&errors).contains(&"rank"));
    }

    #[rstest]
    fn collects_every_failure_instead_of_stopping_at_the_first() {
        let submission = OfficerSubmission {
            surname: None,
            phone_number: Some("123".into()),
            email_address: Some("not-an-email".into()),
            rank: Some("Sergeant".into()),
            nin: Some("12".into()),
            ..complete_submission()
        };
        let errors = submission.validate(today()).expect_err("must reject");
        let fields = field_names(&errors);
        for expected in ["surname", "phoneNumber", "emailAddress", "rank", "nin"] {
            assert!(fields.contains(&expected), "missing {expected}: {errors:?}");
        }
    }

    #[rstest]
    fn an_empty_submission_reports_every_required_field() {
        let errors = OfficerSubmission::default()
            .validate(today())
            .expect_err("must reject");
        let fields = field_names(&errors);
        for expected in [
            "surname",
            "firstName",
            "dateOfBirth",
            "gender",
            "stateOfOrigin",
            "lga",
            "nationality",
            "homeAddress",
            "serviceNumber",
            "rank",
            "dateOfEnlistment",
            "command",
            "unit",
            "currentPosting",
            "phoneNumber",
            "emailAddress",
            "contactAddress",
            "highestQualification",
            "nokName",
            "nokRelationship",
            "nokPhone",
            "nokAddress",
            "maritalStatus",
            "officerSignature",
            "submissionDate",
        ] {
            assert!(fields.contains(&expected), "missing {expected}");
        }
    }

    #[rstest]
    #[case(Some(-1), true)]
    #[case(Some(0), false)]
    #[case(Some(4), false)]
    #[case(None, false)]
    fn dependents_must_not_be_negative(#[case] value: Option<i32>, #[case] rejected: bool) {
        let submission = OfficerSubmission {
            number_of_dependents: value,
            ..complete_submission()
        };
        let result = submission.validate(today());
        assert_eq!(result.is_err(), rejected, "{result:?}");
    }

    #[rstest]
    #[case(Some(1959), true)]
    #[case(Some(2026), true)]
    #[case(Some(2018), false)]
    fn graduation_year_is_range_checked(#[case] year: Option<i32>, #[case] rejected: bool) {
        let submission = OfficerSubmission {
            year_of_graduation: year,
            ..complete_submission()
        };
        let result = submission.validate(today());
        assert_eq!(result.is_err(), rejected, "{result:?}");
    }

    #[rstest]
    fn blank_optional_fields_are_dropped_not_rejected() {
        let submission = OfficerSubmission {
            middle_name: Some("   ".into()),
            blood_group: Some("".into()),
            nin: Some("".into()),
            alternate_phone: Some(" ".into()),
            ..complete_submission()
        };
        let officer = submission.validate(today()).expect("must validate");
        assert_eq!(officer.personal.middle_name, None);
        assert_eq!(officer.personal.blood_group, None);
        assert_eq!(officer.additional.nin, None);
        assert_eq!(officer.contact.alternate_phone, None);
    }

    #[rstest]
    fn error_messages_name_the_wire_field() {
        let submission = OfficerSubmission {
            phone_number: Some("123".into()),
            ..complete_submission()
        };
        let errors = submission.validate(today()).expect_err("must reject");
        let phone_error = errors
            .iter()
            .find(|e| e.field == "phoneNumber")
            .expect("phone error present");
        assert_eq!(
            phone_error.message,
            "phoneNumber must be a valid Nigerian phone number"
        );
    }
}
