//! Closed vocabularies for officer records.
//!
//! Each enum round-trips through the exact strings the public form submits,
//! so `FromStr` failures double as membership-check failures in the field
//! validator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error returned when a string does not belong to a closed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    allowed: &'static str,
}

impl UnknownVariant {
    fn new(allowed: &'static str) -> Self {
        Self { allowed }
    }
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "must be one of: {}", self.allowed)
    }
}

impl std::error::Error for UnknownVariant {}

/// Officer gender as captured on the public form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => f.write_str("Male"),
            Self::Female => f.write_str("Female"),
        }
    }
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            _ => Err(UnknownVariant::new("Male, Female")),
        }
    }
}

/// Marital status as captured on the public form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum MaritalStatus {
    /// Single.
    Single,
    /// Married.
    Married,
    /// Divorced.
    Divorced,
    /// Widowed.
    Widowed,
}

impl fmt::Display for MaritalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => f.write_str("Single"),
            Self::Married => f.write_str("Married"),
            Self::Divorced => f.write_str("Divorced"),
            Self::Widowed => f.write_str("Widowed"),
        }
    }
}

impl FromStr for MaritalStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Single" => Ok(Self::Single),
            "Married" => Ok(Self::Married),
            "Divorced" => Ok(Self::Divorced),
            "Widowed" => Ok(Self::Widowed),
            _ => Err(UnknownVariant::new("Single, Married, Divorced, Widowed")),
        }
    }
}

/// ABO/Rh blood group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BloodGroup {
    /// A+
    #[serde(rename = "A+")]
    APositive,
    /// A-
    #[serde(rename = "A-")]
    ANegative,
    /// B+
    #[serde(rename = "B+")]
    BPositive,
    /// B-
    #[serde(rename = "B-")]
    BNegative,
    /// AB+
    #[serde(rename = "AB+")]
    AbPositive,
    /// AB-
    #[serde(rename = "AB-")]
    AbNegative,
    /// O+
    #[serde(rename = "O+")]
    OPositive,
    /// O-
    #[serde(rename = "O-")]
    ONegative,
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        };
        f.write_str(text)
    }
}

impl FromStr for BloodGroup {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "A+" => Ok(Self::APositive),
            "A-" => Ok(Self::ANegative),
            "B+" => Ok(Self::BPositive),
            "B-" => Ok(Self::BNegative),
            "AB+" => Ok(Self::AbPositive),
            "AB-" => Ok(Self::AbNegative),
            "O+" => Ok(Self::OPositive),
            "O-" => Ok(Self::ONegative),
            _ => Err(UnknownVariant::new("A+, A-, B+, B-, AB+, AB-, O+, O-")),
        }
    }
}

/// Lifecycle status of an officer record.
///
/// ## Invariants
/// Transitions are limited to `pending -> approved` (approval action) and
/// `pending/approved/updated -> updated` (admin edit). `rejected` is
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordStatus {
    /// Freshly submitted, awaiting review.
    Pending,
    /// Approved by an admin.
    Approved,
    /// Rejected; no further transitions.
    Rejected,
    /// Edited by an admin after submission.
    Updated,
}

impl RecordStatus {
    /// Whether an admin edit may be applied from this status.
    pub fn allows_update(self) -> bool {
        matches!(self, Self::Pending | Self::Approved | Self::Updated)
    }

    /// Whether the approval action may be applied from this status.
    pub fn allows_approval(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Approved => f.write_str("approved"),
            Self::Rejected => f.write_str("rejected"),
            Self::Updated => f.write_str("updated"),
        }
    }
}

impl FromStr for RecordStatus {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "updated" => Ok(Self::Updated),
            _ => Err(UnknownVariant::new("pending, approved, rejected, updated")),
        }
    }
}

/// The fixed corps rank structure, senior-most first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
pub enum Rank {
    /// Commandant General.
    CommandantGeneral,
    /// Deputy Commandant General.
    DeputyCommandantGeneral,
    /// Assistant Commandant General.
    AssistantCommandantGeneral,
    /// Commandant.
    Commandant,
    /// Deputy Commandant.
    DeputyCommandant,
    /// Assistant Commandant.
    AssistantCommandant,
    /// Chief Superintendent.
    ChiefSuperintendent,
    /// Superintendent.
    Superintendent,
    /// Deputy Superintendent.
    DeputySuperintendent,
    /// Assistant Superintendent.
    AssistantSuperintendent,
    /// Senior Inspector.
    SeniorInspector,
    /// Inspector.
    Inspector,
    /// Assistant Inspector.
    AssistantInspector,
}

impl Rank {
    /// Every rank in seniority order. The list is closed: the validator
    /// rejects any string outside it.
    pub const ALL: [Self; 13] = [
        Self::CommandantGeneral,
        Self::DeputyCommandantGeneral,
        Self::AssistantCommandantGeneral,
        Self::Commandant,
        Self::DeputyCommandant,
        Self::AssistantCommandant,
        Self::ChiefSuperintendent,
        Self::Superintendent,
        Self::DeputySuperintendent,
        Self::AssistantSuperintendent,
        Self::SeniorInspector,
        Self::Inspector,
        Self::AssistantInspector,
    ];

    /// The title as printed on the form and stored in the record.
    pub fn title(self) -> &'static str {
        match self {
            Self::CommandantGeneral => "Commandant General",
            Self::DeputyCommandantGeneral => "Deputy Commandant General",
            Self::AssistantCommandantGeneral => "Assistant Commandant General",
            Self::Commandant => "Commandant",
            Self::DeputyCommandant => "Deputy Commandant",
            Self::AssistantCommandant => "Assistant Commandant",
            Self::ChiefSuperintendent => "Chief Superintendent",
            Self::Superintendent => "Superintendent",
            Self::DeputySuperintendent => "Deputy Superintendent",
            Self::AssistantSuperintendent => "Assistant Superintendent",
            Self::SeniorInspector => "Senior Inspector",
            Self::Inspector => "Inspector",
            Self::AssistantInspector => "Assistant Inspector",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Rank {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rank| rank.title() == value)
            .ok_or(UnknownVariant::new("the fixed corps rank titles"))
    }
}

impl From<Rank> for String {
    fn from(value: Rank) -> Self {
        value.title().to_owned()
    }
}

impl TryFrom<String> for Rank {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Commandant General", Rank::CommandantGeneral)]
    #[case("Assistant Inspector", Rank::AssistantInspector)]
    #[case("Superintendent", Rank::Superintendent)]
    fn rank_round_trips_its_title(#[case] title: &str, #[case] rank: Rank) {
        assert_eq!(title.parse::<Rank>().expect("known title"), rank);
        assert_eq!(rank.to_string(), title);
    }

    #[rstest]
    #[case("Sergeant")]
    #[case("commandant general")]
    #[case("")]
    fn rank_rejects_strings_outside_the_fixed_list(#[case] value: &str) {
        assert!(value.parse::<Rank>().is_err());
    }

    #[rstest]
    fn rank_list_has_thirteen_entries() {
        assert_eq!(Rank::ALL.len(), 13);
    }

    #[rstest]
    #[case(RecordStatus::Pending, true, true)]
    #[case(RecordStatus::Approved, true, false)]
    #[case(RecordStatus::Updated, true, false)]
    #[case(RecordStatus::Rejected, false, false)]
    fn status_transition_rules(
        #[case] status: RecordStatus,
        #[case] updatable: bool,
        #[case] approvable: bool,
    ) {
        assert_eq!(status.allows_update(), updatable);
        assert_eq!(status.allows_approval(), approvable);
    }

    #[rstest]
    fn blood_group_serializes_with_sign() {
        let encoded = serde_json::to_string(&BloodGroup::AbNegative).expect("encode");
        assert_eq!(encoded, "\"AB-\"");
    }
}
