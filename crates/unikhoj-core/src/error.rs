//! Error types for `unikhoj-core`.
//!
//! Each variant carries enough context to tell what went wrong without a
//! debugger. User-facing text is produced separately via
//! [`SubmissionError::user_message`] so log lines can stay precise.

/// Message shown to users whenever a submission fails for a reason they
/// cannot act on.
pub const GENERIC_SUBMISSION_MESSAGE: &str = "Something went wrong. Please try again.";

/// A wire code that does not name any variant of a closed field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field} value '{value}'")]
pub struct ParseFieldError {
    /// Wire name of the field (e.g. `degree`).
    pub field: &'static str,
    /// The rejected input.
    pub value: String,
}

/// Errors from sending a finished draft to the lead API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    /// The API answered with a non-success status.
    #[error("lead API rejected the submission with status {status}")]
    Rejected { status: u16 },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("{reason}")]
    Transport { reason: String },

    /// The API answered with success but the body was not understood.
    #[error("invalid lead API response: {reason}")]
    InvalidResponse { reason: String },
}

impl SubmissionError {
    /// Text suitable for the banner next to the submit control.
    ///
    /// Status and decoding failures collapse into the generic message;
    /// transport failures carry their own message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport { reason } if !reason.trim().is_empty() => reason.clone(),
            Self::Rejected { .. } | Self::Transport { .. } | Self::InvalidResponse { .. } => {
                GENERIC_SUBMISSION_MESSAGE.to_owned()
            }
        }
    }
}

/// Reasons the form refuses to start a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitBlocked {
    /// Submission is only possible from the contact-info step.
    #[error("the form is not on its final step")]
    NotOnFinalStep,

    /// The contact-info step has validation errors.
    #[error("the contact details are incomplete or invalid")]
    Invalid,

    /// A previous submission is still in flight.
    #[error("a submission is already in progress")]
    InFlight,

    /// The form has already been submitted.
    #[error("the form has already been submitted")]
    AlreadySubmitted,
}

/// Errors from [`IntakeForm::submit`](crate::form::IntakeForm::submit).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormSubmitError {
    /// The form could not start a submission.
    #[error(transparent)]
    Blocked(#[from] SubmitBlocked),

    /// The submission was sent and failed.
    #[error(transparent)]
    Failed(#[from] SubmissionError),
}
