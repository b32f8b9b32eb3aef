//! Per-step validation rules for the intake form.
//!
//! [`validate_step`] is pure: it inspects a [`LeadDraft`] and returns the
//! complete set of field errors for one step. Whitespace-only input counts
//! as empty everywhere.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::lead::{LeadDraft, TestType};

#[allow(clippy::expect_used)]
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("literal pattern"));

#[allow(clippy::expect_used)]
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("literal pattern"));

// ── Steps and fields ─────────────────────────────────────────────────

/// One of the three pages of the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Step {
    /// Degree, destination country, budget.
    Preferences,
    /// GPA and English test.
    AcademicProfile,
    /// Name, phone, email.
    ContactInfo,
}

impl Step {
    /// Total number of steps.
    pub const COUNT: u8 = 3;

    /// 1-based position of the step.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::Preferences => 1,
            Self::AcademicProfile => 2,
            Self::ContactInfo => 3,
        }
    }

    /// Step by 1-based position.
    #[must_use]
    pub const fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Self::Preferences),
            2 => Some(Self::AcademicProfile),
            3 => Some(Self::ContactInfo),
            _ => None,
        }
    }

    /// The following step, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// The preceding step, if any.
    #[must_use]
    pub const fn prev(self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    /// Heading shown for the step.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Preferences => "Your preferences",
            Self::AcademicProfile => "Academic profile",
            Self::ContactInfo => "Contact info",
        }
    }

    /// Fields collected on this step, in display order.
    #[must_use]
    pub const fn fields(self) -> &'static [Field] {
        match self {
            Self::Preferences => &[Field::Degree, Field::Country, Field::Budget],
            Self::AcademicProfile => &[Field::Gpa, Field::TestType, Field::TestScore],
            Self::ContactInfo => &[Field::FullName, Field::Phone, Field::Email],
        }
    }
}

/// A draft field. Ordering follows the form layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Degree,
    Country,
    Budget,
    Gpa,
    TestType,
    TestScore,
    FullName,
    Phone,
    Email,
}

impl Field {
    /// JSON field name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Country => "country",
            Self::Budget => "budget",
            Self::Gpa => "gpa",
            Self::TestType => "testType",
            Self::TestScore => "testScore",
            Self::FullName => "fullName",
            Self::Phone => "phone",
            Self::Email => "email",
        }
    }

    /// The step that collects this field.
    #[must_use]
    pub const fn step(self) -> Step {
        match self {
            Self::Degree | Self::Country | Self::Budget => Step::Preferences,
            Self::Gpa | Self::TestType | Self::TestScore => Step::AcademicProfile,
            Self::FullName | Self::Phone | Self::Email => Step::ContactInfo,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Error map ────────────────────────────────────────────────────────

/// Field name → human-readable message for the current step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    /// Whether the step passed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of offending fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for a field, if it has one.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    /// Whether the field has an error.
    #[must_use]
    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    /// Errors in form-layout order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub(crate) fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_owned());
    }

    pub(crate) fn remove(&mut self, field: Field) {
        self.0.remove(&field);
    }

    pub(crate) fn clear(&mut self) {
        self.0.clear();
    }
}

// ── Rules ────────────────────────────────────────────────────────────

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Whether `value`, once trimmed, is exactly ten ASCII digits.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value.trim())
}

/// Whether `value`, once trimmed, looks like `local@domain.tld`.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Validate every field of `step` against the draft.
///
/// Returns an empty map when the step may be advanced past.
#[must_use]
pub fn validate_step(step: Step, draft: &LeadDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();

    match step {
        Step::Preferences => {
            if draft.degree.is_none() {
                errors.insert(Field::Degree, "Please select a degree level");
            }
            if draft.country.as_deref().is_none_or(is_blank) {
                errors.insert(Field::Country, "Please select a country");
            }
            if draft.budget.is_none() {
                errors.insert(Field::Budget, "Please select your budget range");
            }
        }
        Step::AcademicProfile => {
            if is_blank(&draft.gpa) {
                errors.insert(Field::Gpa, "Please enter your GPA or percentage");
            }
            match draft.test_type {
                None => errors.insert(Field::TestType, "Please select a test"),
                Some(TestType::None) => {}
                Some(TestType::Ielts | TestType::Pte | TestType::Toefl) => {
                    if is_blank(&draft.test_score) {
                        errors.insert(Field::TestScore, "Please enter your score");
                    }
                }
            }
        }
        Step::ContactInfo => {
            if is_blank(&draft.full_name) {
                errors.insert(Field::FullName, "Please enter your name");
            }
            if is_blank(&draft.phone) {
                errors.insert(Field::Phone, "Please enter your phone number");
            } else if !is_valid_phone(&draft.phone) {
                errors.insert(Field::Phone, "Enter a valid 10-digit number");
            }
            if !is_blank(&draft.email) && !is_valid_email(&draft.email) {
                errors.insert(Field::Email, "Enter a valid email address");
            }
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::{BudgetBracket, Degree};

    fn contact(phone: &str, email: &str) -> LeadDraft {
        LeadDraft {
            full_name: "Ram Sharma".to_owned(),
            phone: phone.to_owned(),
            email: email.to_owned(),
            ..LeadDraft::default()
        }
    }

    #[test]
    fn empty_preferences_report_all_three_fields() {
        let errors = validate_step(Step::Preferences, &LeadDraft::default());
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Degree), Some("Please select a degree level"));
        assert_eq!(errors.get(Field::Country), Some("Please select a country"));
        assert_eq!(
            errors.get(Field::Budget),
            Some("Please select your budget range")
        );
    }

    #[test]
    fn complete_preferences_pass() {
        let draft = LeadDraft {
            degree: Some(Degree::Masters),
            country: Some("Other".to_owned()),
            budget: Some(BudgetBracket::Under15L),
            ..LeadDraft::default()
        };
        assert!(validate_step(Step::Preferences, &draft).is_empty());
    }

    #[test]
    fn blank_country_counts_as_unset() {
        let draft = LeadDraft {
            degree: Some(Degree::Bachelors),
            country: Some("   ".to_owned()),
            budget: Some(BudgetBracket::Over40L),
            ..LeadDraft::default()
        };
        let errors = validate_step(Step::Preferences, &draft);
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(Field::Country));
    }

    #[test]
    fn whitespace_gpa_is_missing() {
        let draft = LeadDraft {
            gpa: "  \t".to_owned(),
            test_type: Some(TestType::None),
            ..LeadDraft::default()
        };
        let errors = validate_step(Step::AcademicProfile, &draft);
        assert_eq!(
            errors.get(Field::Gpa),
            Some("Please enter your GPA or percentage")
        );
    }

    #[test]
    fn no_test_never_requires_a_score() {
        for score in ["", "   ", "7.5"] {
            let draft = LeadDraft {
                gpa: "85%".to_owned(),
                test_type: Some(TestType::None),
                test_score: score.to_owned(),
                ..LeadDraft::default()
            };
            let errors = validate_step(Step::AcademicProfile, &draft);
            assert!(!errors.contains(Field::TestScore), "score {score:?}");
            assert!(errors.is_empty());
        }
    }

    #[test]
    fn taken_test_requires_a_score() {
        let draft = LeadDraft {
            gpa: "3.2".to_owned(),
            test_type: Some(TestType::Toefl),
            test_score: " ".to_owned(),
            ..LeadDraft::default()
        };
        let errors = validate_step(Step::AcademicProfile, &draft);
        assert_eq!(errors.get(Field::TestScore), Some("Please enter your score"));
    }

    #[test]
    fn unset_test_type_reports_only_the_type() {
        let draft = LeadDraft {
            gpa: "3.2".to_owned(),
            ..LeadDraft::default()
        };
        let errors = validate_step(Step::AcademicProfile, &draft);
        assert_eq!(errors.get(Field::TestType), Some("Please select a test"));
        assert!(!errors.contains(Field::TestScore));
    }

    #[test]
    fn phone_must_be_exactly_ten_digits() {
        assert!(validate_step(Step::ContactInfo, &contact("9812345678", "")).is_empty());
        assert!(validate_step(Step::ContactInfo, &contact(" 9812345678 ", "")).is_empty());

        for bad in ["98123", "98123456789", "981234567a", "98123 45678"] {
            let errors = validate_step(Step::ContactInfo, &contact(bad, ""));
            assert_eq!(
                errors.get(Field::Phone),
                Some("Enter a valid 10-digit number"),
                "phone {bad:?}"
            );
        }
    }

    #[test]
    fn missing_phone_has_its_own_message() {
        let errors = validate_step(Step::ContactInfo, &contact("  ", ""));
        assert_eq!(
            errors.get(Field::Phone),
            Some("Please enter your phone number")
        );
    }

    #[test]
    fn email_is_optional_but_checked_when_present() {
        assert!(validate_step(Step::ContactInfo, &contact("9812345678", "   ")).is_empty());
        assert!(
            validate_step(Step::ContactInfo, &contact("9812345678", "ram@example.com"))
                .is_empty()
        );

        for bad in ["ram", "ram@example", "ram @example.com", "@example.com"] {
            let errors = validate_step(Step::ContactInfo, &contact("9812345678", bad));
            assert_eq!(
                errors.get(Field::Email),
                Some("Enter a valid email address"),
                "email {bad:?}"
            );
        }
    }

    #[test]
    fn blank_name_is_missing() {
        let mut draft = contact("9812345678", "");
        draft.full_name = "  ".to_owned();
        let errors = validate_step(Step::ContactInfo, &draft);
        assert_eq!(errors.get(Field::FullName), Some("Please enter your name"));
    }

    #[test]
    fn errors_iterate_in_layout_order() {
        let mut draft = contact("", "bad");
        draft.full_name.clear();
        let errors = validate_step(Step::ContactInfo, &draft);
        let fields: Vec<Field> = errors.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec![Field::FullName, Field::Phone, Field::Email]);
    }

    #[test]
    fn step_navigation_is_bounded() {
        assert_eq!(Step::Preferences.prev(), None);
        assert_eq!(Step::Preferences.next(), Some(Step::AcademicProfile));
        assert_eq!(Step::ContactInfo.next(), None);
        for step in [Step::Preferences, Step::AcademicProfile, Step::ContactInfo] {
            assert!(step.fields().iter().all(|f| f.step() == step));
        }
    }
}
