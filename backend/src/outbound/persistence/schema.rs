//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations exactly; regenerate with
//! `diesel print-schema` after a migration changes the layout.

diesel::table! {
    /// Officer records, one row per submission.
    ///
    /// `service_number` and `email_address` carry unique indexes; the store
    /// relies on them for duplicate detection under concurrency.
    officers (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Family name, upper-cased.
        surname -> Varchar,
        /// First name, upper-cased.
        first_name -> Varchar,
        /// Optional middle name, upper-cased.
        middle_name -> Nullable<Varchar>,
        /// Date of birth.
        date_of_birth -> Date,
        /// `Male` or `Female`.
        gender -> Varchar,
        /// Optional blood group, e.g. `O+`.
        blood_group -> Nullable<Varchar>,
        /// State of origin.
        state_of_origin -> Varchar,
        /// Local Government Area.
        lga -> Varchar,
        /// Nationality.
        nationality -> Varchar,
        /// Residential address.
        home_address -> Text,
        /// Unique service number, upper-cased.
        service_number -> Varchar,
        /// Rank title from the fixed list.
        rank -> Varchar,
        /// Enlistment date.
        date_of_enlistment -> Date,
        /// Last promotion date.
        date_of_last_promotion -> Nullable<Date>,
        /// Command.
        command -> Varchar,
        /// Unit.
        unit -> Varchar,
        /// Specialization.
        specialization -> Nullable<Varchar>,
        /// Current posting.
        current_posting -> Varchar,
        /// Date the current posting began.
        date_of_current_posting -> Nullable<Date>,
        /// Primary phone number.
        phone_number -> Varchar,
        /// Alternate phone number.
        alternate_phone -> Nullable<Varchar>,
        /// Unique email, lower-cased.
        email_address -> Varchar,
        /// Contact address.
        contact_address -> Text,
        /// Highest qualification.
        highest_qualification -> Varchar,
        /// Discipline.
        discipline -> Nullable<Varchar>,
        /// Institution.
        institution -> Nullable<Varchar>,
        /// Graduation year.
        year_of_graduation -> Nullable<Int4>,
        /// Professional certifications.
        professional_certifications -> Nullable<Text>,
        /// Next of kin name.
        nok_name -> Varchar,
        /// Next of kin relationship.
        nok_relationship -> Varchar,
        /// Next of kin phone number.
        nok_phone -> Varchar,
        /// Next of kin address.
        nok_address -> Text,
        /// Marital status.
        marital_status -> Varchar,
        /// Number of dependents.
        number_of_dependents -> Int4,
        /// Optional National Identification Number.
        nin -> Nullable<Varchar>,
        /// Special skills.
        special_skills -> Nullable<Text>,
        /// Remarks.
        remarks -> Nullable<Text>,
        /// Officer signature.
        officer_signature -> Varchar,
        /// Declaration date.
        submission_date -> Date,
        /// Lifecycle status.
        status -> Varchar,
        /// When the submission was accepted.
        submitted_at -> Timestamptz,
        /// When the record last changed.
        updated_at -> Timestamptz,
        /// Username of the last admin editor.
        modified_by -> Nullable<Varchar>,
        /// Form revision.
        form_version -> Varchar,
    }
}

diesel::table! {
    /// Dashboard admin accounts.
    ///
    /// `username` carries a unique index; it doubles as the backstop for the
    /// bootstrap guard under concurrent requests.
    admins (id) {
        /// Primary key: UUID v4.
        id -> Uuid,
        /// Unique login name, lower-cased.
        username -> Varchar,
        /// Salted Argon2id hash in PHC string format.
        password_hash -> Varchar,
        /// Display name.
        full_name -> Varchar,
        /// `admin` or `superadmin`.
        role -> Varchar,
        /// Inactive accounts cannot log in.
        active -> Bool,
        /// Last successful login.
        last_login -> Nullable<Timestamptz>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
