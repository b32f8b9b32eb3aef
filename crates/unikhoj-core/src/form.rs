//! The three-step intake form state machine.
//!
//! An [`IntakeForm`] is a single value holding the current stage, the
//! navigation direction, the [`LeadDraft`], the current step's
//! [`FieldErrors`] and the submission status. It changes only through
//! [`IntakeForm::apply`], one [`FormAction`] at a time:
//!
//! ```text
//! Preferences ──Next──▶ AcademicProfile ──Next──▶ ContactInfo ──submit ok──▶ Submitted
//!      ◀──────Back──────        ◀──────Back──────       │
//!                                                       └─submit failed─▶ ContactInfo[failed]
//! ```
//!
//! `Next` only fires when the current step validates. Submission is split
//! into [`FormAction::SubmitStarted`] and a success/failure action so the
//! network call can happen outside the state machine; [`IntakeForm::submit`]
//! wires the two halves to a [`LeadSubmitter`].

use crate::error::{FormSubmitError, SubmissionError, SubmitBlocked};
use crate::lead::{BudgetBracket, Degree, LeadDraft, LeadId, TestType};
use crate::validation::{Field, FieldErrors, Step, validate_step};

/// Sends a finished draft to the lead API.
#[async_trait::async_trait]
pub trait LeadSubmitter: Send + Sync {
    /// Transmit the draft and return the identifier of the created lead.
    ///
    /// Implementations do not re-validate business rules.
    ///
    /// # Errors
    ///
    /// Returns a [`SubmissionError`] if the API cannot be reached or does not
    /// accept the lead.
    async fn submit(&self, draft: &LeadDraft) -> Result<LeadId, SubmissionError>;
}

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Filling in one of the three steps.
    Editing(Step),
    /// Terminal: the lead was created.
    Submitted(LeadId),
}

/// Direction of the last navigation. Only affects presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

/// Submission progress, layered on the contact-info step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// A request is in flight; the submit control is disabled.
    Submitting,
    /// The last attempt failed with this user-facing message.
    Failed(String),
}

/// A new value for one draft field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Degree(Degree),
    Country(String),
    Budget(BudgetBracket),
    Gpa(String),
    TestType(TestType),
    TestScore(String),
    FullName(String),
    Phone(String),
    Email(String),
}

impl FieldEdit {
    /// The field this edit writes.
    #[must_use]
    pub const fn field(&self) -> Field {
        match self {
            Self::Degree(_) => Field::Degree,
            Self::Country(_) => Field::Country,
            Self::Budget(_) => Field::Budget,
            Self::Gpa(_) => Field::Gpa,
            Self::TestType(_) => Field::TestType,
            Self::TestScore(_) => Field::TestScore,
            Self::FullName(_) => Field::FullName,
            Self::Phone(_) => Field::Phone,
            Self::Email(_) => Field::Email,
        }
    }
}

/// Everything that can happen to a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// The user changed a field.
    Edit(FieldEdit),
    /// Try to advance past the current step.
    Next,
    /// Return to the previous step.
    Back,
    /// Validate the contact step and mark the submission as in flight.
    SubmitStarted,
    /// The API created the lead.
    SubmitSucceeded(LeadId),
    /// The API call failed; carries the banner message.
    SubmitFailed(String),
    /// Discard everything and start over.
    Reset,
}

/// State of one intake workflow instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakeForm {
    stage: Stage,
    direction: Direction,
    draft: LeadDraft,
    errors: FieldErrors,
    submission: SubmissionStatus,
}

impl Default for IntakeForm {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeForm {
    /// A blank form on the first step.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: Stage::Editing(Step::Preferences),
            direction: Direction::Forward,
            draft: LeadDraft::default(),
            errors: FieldErrors::default(),
            submission: SubmissionStatus::Idle,
        }
    }

    #[must_use]
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The step being edited, or `None` once submitted.
    #[must_use]
    pub fn current_step(&self) -> Option<Step> {
        match self.stage {
            Stage::Editing(step) => Some(step),
            Stage::Submitted(_) => None,
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn draft(&self) -> &LeadDraft {
        &self.draft
    }

    /// Errors from the last validation attempt, minus fields edited since.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submission == SubmissionStatus::Submitting
    }

    /// Banner message of the last failed submission.
    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        match &self.submission {
            SubmissionStatus::Failed(msg) => Some(msg),
            SubmissionStatus::Idle | SubmissionStatus::Submitting => None,
        }
    }

    /// Identifier of the created lead, once submitted.
    #[must_use]
    pub fn lead_id(&self) -> Option<LeadId> {
        match self.stage {
            Stage::Submitted(id) => Some(id),
            Stage::Editing(_) => None,
        }
    }

    /// Apply one action.
    ///
    /// Actions that make no sense in the current state are ignored; nothing
    /// leaves [`Stage::Submitted`] except [`FormAction::Reset`].
    pub fn apply(&mut self, action: FormAction) {
        if matches!(action, FormAction::Reset) {
            *self = Self::new();
            return;
        }

        let Stage::Editing(step) = self.stage else {
            return;
        };

        match action {
            FormAction::Edit(edit) => self.edit(edit),
            FormAction::Next => self.go_next(step),
            FormAction::Back => self.go_back(step),
            FormAction::SubmitStarted => self.start_submit(step),
            FormAction::SubmitSucceeded(id) => {
                if self.is_submitting() {
                    self.submission = SubmissionStatus::Idle;
                    self.stage = Stage::Submitted(id);
                }
            }
            FormAction::SubmitFailed(message) => {
                if self.is_submitting() {
                    self.submission = SubmissionStatus::Failed(message);
                }
            }
            FormAction::Reset => {}
        }
    }

    /// Validate the contact step and mark the form as submitting.
    ///
    /// Returns a snapshot of the draft to hand to the submitter.
    ///
    /// # Errors
    ///
    /// Returns [`SubmitBlocked`] when the form is not on its final step, is
    /// already submitting or submitted, or the contact step is invalid (the
    /// error map is refreshed in that case).
    pub fn begin_submit(&mut self) -> Result<LeadDraft, SubmitBlocked> {
        match self.stage {
            Stage::Submitted(_) => return Err(SubmitBlocked::AlreadySubmitted),
            Stage::Editing(Step::ContactInfo) => {}
            Stage::Editing(_) => return Err(SubmitBlocked::NotOnFinalStep),
        }
        if self.is_submitting() {
            return Err(SubmitBlocked::InFlight);
        }

        self.apply(FormAction::SubmitStarted);
        if self.is_submitting() {
            Ok(self.draft.clone())
        } else {
            Err(SubmitBlocked::Invalid)
        }
    }

    /// Run a full submission attempt through `submitter`.
    ///
    /// On success the form becomes [`Stage::Submitted`]; on failure it stays
    /// on the contact step with the draft intact and the banner message set.
    ///
    /// # Errors
    ///
    /// Returns [`FormSubmitError::Blocked`] if the attempt could not start
    /// and [`FormSubmitError::Failed`] if the submitter failed.
    pub async fn submit<S>(&mut self, submitter: &S) -> Result<LeadId, FormSubmitError>
    where
        S: LeadSubmitter + ?Sized,
    {
        let draft = self.begin_submit()?;

        match submitter.submit(&draft).await {
            Ok(id) => {
                self.apply(FormAction::SubmitSucceeded(id));
                Ok(id)
            }
            Err(err) => {
                self.apply(FormAction::SubmitFailed(err.user_message()));
                Err(err.into())
            }
        }
    }

    // ── Action handlers ──────────────────────────────────────────────

    fn edit(&mut self, edit: FieldEdit) {
        if self.is_submitting() {
            return;
        }

        self.errors.remove(edit.field());
        if let SubmissionStatus::Failed(_) = self.submission {
            self.submission = SubmissionStatus::Idle;
        }

        let draft = &mut self.draft;
        match edit {
            FieldEdit::Degree(v) => draft.degree = Some(v),
            FieldEdit::Country(v) => draft.country = Some(v),
            FieldEdit::Budget(v) => draft.budget = Some(v),
            FieldEdit::Gpa(v) => draft.gpa = v,
            FieldEdit::TestType(v) => {
                draft.test_type = Some(v);
                if !v.has_score() {
                    draft.test_score.clear();
                    self.errors.remove(Field::TestScore);
                }
            }
            FieldEdit::TestScore(v) => draft.test_score = v,
            FieldEdit::FullName(v) => draft.full_name = v,
            FieldEdit::Phone(v) => draft.phone = v,
            FieldEdit::Email(v) => draft.email = v,
        }
    }

    fn go_next(&mut self, step: Step) {
        if self.is_submitting() {
            return;
        }

        self.errors = validate_step(step, &self.draft);
        if !self.errors.is_empty() {
            return;
        }

        self.direction = Direction::Forward;
        if let Some(next) = step.next() {
            self.stage = Stage::Editing(next);
        }
    }

    fn go_back(&mut self, step: Step) {
        if self.is_submitting() {
            return;
        }

        self.errors.clear();
        self.submission = SubmissionStatus::Idle;
        self.direction = Direction::Backward;
        if let Some(prev) = step.prev() {
            self.stage = Stage::Editing(prev);
        }
    }

    fn start_submit(&mut self, step: Step) {
        if step != Step::ContactInfo || self.is_submitting() {
            return;
        }

        self.errors = validate_step(step, &self.draft);
        if self.errors.is_empty() {
            self.submission = SubmissionStatus::Submitting;
        }
    }
}
