//! Storage error types.
//!
//! Every variant carries enough context to diagnose the problem without a
//! debugger. None of this text is ever sent to API clients.

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to connect to or initialise the backend.
    #[error("failed to open storage at '{target}': {reason}")]
    Open { target: String, reason: String },

    /// Failed to persist a lead.
    #[error("failed to write lead '{id}': {reason}")]
    Write { id: String, reason: String },

    /// Failed to read a lead.
    #[error("failed to read lead '{id}': {reason}")]
    Read { id: String, reason: String },

    /// A stored row could not be mapped back to a lead.
    #[error("corrupt lead record '{id}': {reason}")]
    Corrupt { id: String, reason: String },
}
