//! Lead data model.
//!
//! The closed choice fields of the intake form (degree level, English test,
//! budget bracket) are enums that serialize to the exact codes used on the
//! wire. [`LeadDraft`] is the client-side, in-progress form state;
//! [`NewLead`] is a normalised submission accepted by the API; [`Lead`] is
//! the persisted record.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ParseFieldError;

/// Destination countries offered as suggestions in the preferences step.
///
/// The country field stays free-form; `Other` is a valid answer.
pub const COUNTRY_SUGGESTIONS: [&str; 8] = [
    "USA",
    "Australia",
    "UK",
    "Canada",
    "Japan",
    "Germany",
    "South Korea",
    "Other",
];

// ── Degree ───────────────────────────────────────────────────────────

/// Degree level the student is applying for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Degree {
    Bachelors,
    Masters,
}

impl Degree {
    /// Every degree level, in display order.
    pub const ALL: [Self; 2] = [Self::Bachelors, Self::Masters];

    /// Wire code (`bachelors` / `masters`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bachelors => "bachelors",
            Self::Masters => "masters",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Bachelors => "Bachelor's",
            Self::Masters => "Master's",
        }
    }
}

impl fmt::Display for Degree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Degree {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "bachelors" => Ok(Self::Bachelors),
            "masters" => Ok(Self::Masters),
            other => Err(ParseFieldError {
                field: "degree",
                value: other.to_owned(),
            }),
        }
    }
}

// ── English test ─────────────────────────────────────────────────────

/// English proficiency test taken by the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    /// Server-side default when a caller omits the test type.
    #[default]
    Ielts,
    Pte,
    Toefl,
    /// No test taken; a score is never stored.
    None,
}

impl TestType {
    /// Every test type, in display order.
    pub const ALL: [Self; 4] = [Self::Ielts, Self::Pte, Self::Toefl, Self::None];

    /// Wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ielts => "ielts",
            Self::Pte => "pte",
            Self::Toefl => "toefl",
            Self::None => "none",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ielts => "IELTS",
            Self::Pte => "PTE",
            Self::Toefl => "TOEFL",
            Self::None => "Not yet",
        }
    }

    /// Whether a score accompanies this test type.
    #[must_use]
    pub const fn has_score(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TestType {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ielts" => Ok(Self::Ielts),
            "pte" => Ok(Self::Pte),
            "toefl" => Ok(Self::Toefl),
            "none" => Ok(Self::None),
            other => Err(ParseFieldError {
                field: "testType",
                value: other.to_owned(),
            }),
        }
    }
}

// ── Budget ───────────────────────────────────────────────────────────

/// Total study budget bracket, in lakhs of rupees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetBracket {
    #[serde(rename = "Under 15L")]
    Under15L,
    #[serde(rename = "15-25L")]
    From15To25L,
    #[serde(rename = "25-40L")]
    From25To40L,
    #[serde(rename = "40L+")]
    Over40L,
}

impl BudgetBracket {
    /// Every bracket, cheapest first.
    pub const ALL: [Self; 4] = [
        Self::Under15L,
        Self::From15To25L,
        Self::From25To40L,
        Self::Over40L,
    ];

    /// Wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Under15L => "Under 15L",
            Self::From15To25L => "15-25L",
            Self::From25To40L => "25-40L",
            Self::Over40L => "40L+",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under15L => "Under 15 Lakhs",
            Self::From15To25L => "15 – 25 Lakhs",
            Self::From25To40L => "25 – 40 Lakhs",
            Self::Over40L => "40 Lakhs +",
        }
    }
}

impl fmt::Display for BudgetBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BudgetBracket {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.as_str() == trimmed)
            .ok_or_else(|| ParseFieldError {
                field: "budget",
                value: trimmed.to_owned(),
            })
    }
}

// ── Identifiers ──────────────────────────────────────────────────────

/// System-generated identifier of a persisted lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(Uuid);

impl LeadId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. read back from storage).
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for LeadId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

// ── Draft ────────────────────────────────────────────────────────────

/// In-progress intake form values, owned by
/// [`IntakeForm`](crate::form::IntakeForm).
///
/// Text fields hold raw user input; blank-vs-present is decided by the
/// validation rules, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadDraft {
    pub degree: Option<Degree>,
    pub country: Option<String>,
    pub budget: Option<BudgetBracket>,
    pub gpa: String,
    pub test_type: Option<TestType>,
    pub test_score: String,
    pub full_name: String,
    pub phone: String,
    pub email: String,
}

// ── Persisted record ─────────────────────────────────────────────────

/// A normalised lead accepted by the API, not yet stored.
///
/// All strings are trimmed. `test_score` is `None` whenever `test_type` is
/// [`TestType::None`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLead {
    pub full_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub degree: Degree,
    pub gpa: String,
    pub test_type: TestType,
    pub test_score: Option<String>,
    pub country: String,
    pub budget: BudgetBracket,
}

impl NewLead {
    /// Stamp the lead with a fresh identifier and creation time.
    #[must_use]
    pub fn into_lead(self, now: DateTime<Utc>) -> Lead {
        // A score without a test is never stored.
        let test_score = if self.test_type.has_score() {
            self.test_score
        } else {
            None
        };

        Lead {
            id: LeadId::generate(),
            full_name: self.full_name,
            phone: self.phone,
            email: self.email,
            degree: self.degree,
            gpa: self.gpa,
            test_type: self.test_type,
            test_score,
            country: self.country,
            budget: self.budget,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A persisted lead. Created once, never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: LeadId,
    pub full_name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub degree: Degree,
    pub gpa: String,
    pub test_type: TestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_score: Option<String>,
    pub country: String,
    pub budget: BudgetBracket,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
