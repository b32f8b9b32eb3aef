//! HTTP client for the `UniKhoj` lead API.
//!
//! [`LeadClient`] sends a finished intake draft to `POST /api/leads` and
//! implements [`LeadSubmitter`](unikhoj_core::form::LeadSubmitter), so it
//! can be handed straight to
//! [`IntakeForm::submit`](unikhoj_core::form::IntakeForm::submit).
//!
//! # Example
//!
//! ```rust,no_run
//! use unikhoj_client::LeadClient;
//! use unikhoj_core::form::IntakeForm;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = LeadClient::new()?;
//! let mut form = IntakeForm::new();
//! // ... fill in the three steps ...
//! let id = form.submit(&client).await?;
//! # let _ = id;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod types;

pub use error::ClientError;
pub use types::HealthStatus;

use std::time::Duration;

/// Base URL used when `UNIKHOJ_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// Transport timeout for every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the lead client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL, without the `/api` prefix. Default: `http://localhost:5000`.
    pub base_url: String,
    /// Request timeout. Default: 10 seconds.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `UNIKHOJ_API_URL` when set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        match std::env::var("UNIKHOJ_API_URL") {
            Ok(url) if !url.trim().is_empty() => config.base_url = url,
            _ => {}
        }
        config
    }
}

/// Lead API client.
pub struct LeadClient {
    base_url: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for LeadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
