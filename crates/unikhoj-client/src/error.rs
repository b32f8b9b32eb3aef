//! Error types for the lead client.
//!
//! Request failures are reported as
//! [`SubmissionError`](unikhoj_core::error::SubmissionError) so the form
//! can show them; this module only covers building the client.

/// Errors raised while constructing a [`LeadClient`](crate::LeadClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The base URL is empty or not an absolute `http(s)` URL.
    #[error("invalid lead API url '{0}'")]
    InvalidUrl(String),

    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}
