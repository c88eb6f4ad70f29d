use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Flat adoption fee charged for dogs at registration time.
pub const DOG_ADOPTION_FEE: f64 = 250.0;
/// Flat adoption fee charged for cats at registration time.
pub const CAT_ADOPTION_FEE: f64 = 150.0;

/// Fee schedule keyed on the normalized (lowercased) species. Species outside
/// the schedule adopt for free.
pub fn adoption_fee_for(species: &str) -> f64 {
    match species {
        "dog" => DOG_ADOPTION_FEE,
        "cat" => CAT_ADOPTION_FEE,
        _ => 0.0,
    }
}

/// Lifecycle of a pet record as it moves through the adoption pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PetStatus {
    Available,
    Pending,
    Adopted,
}

impl PetStatus {
    /// Stored form of the status, matching the values the intake desk has
    /// always written to the `pets` table.
    pub const fn label(self) -> &'static str {
        match self {
            PetStatus::Available => "Available",
            PetStatus::Pending => "Pending",
            PetStatus::Adopted => "Adopted",
        }
    }
}

impl Default for PetStatus {
    fn default() -> Self {
        PetStatus::Available
    }
}

impl fmt::Display for PetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PetStatus {
    type Err = UnknownLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(PetStatus::Available),
            "pending" => Ok(PetStatus::Pending),
            "adopted" => Ok(PetStatus::Adopted),
            _ => Err(UnknownLabel::new("pet status", raw)),
        }
    }
}

/// Review state of a submitted adoption application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    Submitted,
    Approved,
    Denied,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Submitted => "Submitted",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Denied => "Denied",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ApplicationStatus {
    type Err = UnknownLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "submitted" => Ok(ApplicationStatus::Submitted),
            "approved" => Ok(ApplicationStatus::Approved),
            "denied" => Ok(ApplicationStatus::Denied),
            _ => Err(UnknownLabel::new("application status", raw)),
        }
    }
}

/// Yes/no answer collected on the adoption questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    pub const fn label(self) -> &'static str {
        match self {
            Answer::Yes => "Yes",
            Answer::No => "No",
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Answer {
    type Err = UnknownLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(Answer::Yes),
            "no" => Ok(Answer::No),
            _ => Err(UnknownLabel::new("answer", raw)),
        }
    }
}

/// Housing arrangement declared by the adopter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LivingSituation {
    House,
    Apartment,
    Condo,
    Other,
}

impl LivingSituation {
    pub const fn label(self) -> &'static str {
        match self {
            LivingSituation::House => "House",
            LivingSituation::Apartment => "Apartment",
            LivingSituation::Condo => "Condo",
            LivingSituation::Other => "Other",
        }
    }
}

impl fmt::Display for LivingSituation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LivingSituation {
    type Err = UnknownLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "house" => Ok(LivingSituation::House),
            "apartment" => Ok(LivingSituation::Apartment),
            "condo" => Ok(LivingSituation::Condo),
            "other" => Ok(LivingSituation::Other),
            _ => Err(UnknownLabel::new("living situation", raw)),
        }
    }
}

/// Fenced-yard answer; `NotApplicable` covers adopters of indoor animals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FencedYard {
    Yes,
    No,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl FencedYard {
    pub const fn label(self) -> &'static str {
        match self {
            FencedYard::Yes => "Yes",
            FencedYard::No => "No",
            FencedYard::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for FencedYard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FencedYard {
    type Err = UnknownLabel;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(FencedYard::Yes),
            "no" => Ok(FencedYard::No),
            "n/a" => Ok(FencedYard::NotApplicable),
            _ => Err(UnknownLabel::new("fenced yard answer", raw)),
        }
    }
}

/// Raised when a stored label cannot be mapped back onto a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    kind: &'static str,
    raw: String,
}

impl UnknownLabel {
    fn new(kind: &'static str, raw: &str) -> Self {
        Self {
            kind,
            raw: raw.to_string(),
        }
    }
}

impl fmt::Display for UnknownLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} label {:?}", self.kind, self.raw)
    }
}

impl std::error::Error for UnknownLabel {}

/// A pet record as stored by the shelter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pet {
    pub pet_id: i64,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: u32,
    pub gender: String,
    pub size: String,
    pub shelter: String,
    pub adoption_fee: f64,
    pub status: PetStatus,
    pub comments: String,
}

/// Raw registration form for a pet. The identifier and age arrive as free
/// text from the intake form and are parsed during registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetForm {
    pub pet_id: String,
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub size: String,
    #[serde(default)]
    pub shelter: String,
    #[serde(default)]
    pub status: PetStatus,
    #[serde(default)]
    pub comments: String,
}

/// Optional, conjunctive criteria for browsing the pet catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetFilter {
    pub species: Option<String>,
    pub breed: Option<String>,
    pub age: Option<u32>,
    pub status: Option<PetStatus>,
}

/// An adopter's questionnaire for a specific pet, as submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationForm {
    pub pet_id: i64,
    #[serde(default)]
    pub adopter_name: String,
    #[serde(default)]
    pub adopter_email: String,
    #[serde(default)]
    pub adopter_phone: String,
    pub owned_before: Option<Answer>,
    pub aware_needs: Option<Answer>,
    pub ready_costs: Option<Answer>,
    pub adoption_date: NaiveDate,
    pub own_other_pets: Option<Answer>,
    #[serde(default)]
    pub other_pets_type: String,
    pub living_situation: Option<LivingSituation>,
    pub fenced_yard: Option<FencedYard>,
    #[serde(default)]
    pub primary_caregiver: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub certified: bool,
}

/// A submitted application together with its review state. `pet_name` is a
/// snapshot taken at submission time and does not follow later pet edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    pub app_id: i64,
    pub pet_id: i64,
    pub pet_name: String,
    pub adopter_name: String,
    pub adopter_email: String,
    pub adopter_phone: String,
    pub owned_before: Answer,
    pub aware_needs: Answer,
    pub ready_costs: Answer,
    pub adoption_date: NaiveDate,
    pub own_other_pets: Answer,
    pub other_pets_type: String,
    pub living_situation: LivingSituation,
    pub fenced_yard: FencedYard,
    pub primary_caregiver: String,
    pub notes: String,
    pub status: ApplicationStatus,
    pub submitted_at: DateTime<Utc>,
}
