//! Lead client implementation.

use std::time::Instant;

use tracing::{debug, warn};

use unikhoj_core::error::{GENERIC_SUBMISSION_MESSAGE, SubmissionError};
use unikhoj_core::form::LeadSubmitter;
use unikhoj_core::lead::{LeadDraft, LeadId};
use unikhoj_core::wire::{HealthResponse, LeadCreated, LeadRequest};

use crate::error::ClientError;
use crate::types::HealthStatus;
use crate::{ClientConfig, DEFAULT_TIMEOUT, LeadClient};

/// Banner text when the request timed out.
pub const TIMEOUT_MESSAGE: &str = "The request timed out. Please try again.";

/// Banner text when the server could not be reached at all.
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the server. Please check your connection.";

impl LeadClient {
    /// Create a client from the environment (`UNIKHOJ_API_URL`) and defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the URL is invalid or the HTTP client
    /// cannot be built.
    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::from_env())
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] unless the base URL starts with
    /// `http://` or `https://`.
    #[allow(clippy::needless_pass_by_value)]
    pub fn with_config(cfg: ClientConfig) -> Result<Self, ClientError> {
        let base_url = cfg.base_url.trim().trim_end_matches('/').to_owned();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::InvalidUrl(cfg.base_url));
        }

        let timeout = if cfg.timeout.is_zero() {
            DEFAULT_TIMEOUT
        } else {
            cfg.timeout
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("unikhoj-client/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base_url, client })
    }

    /// Base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a draft to `POST /api/leads` and return the new lead's id.
    ///
    /// The draft is sent as-is; step validation is the caller's job. A
    /// failed request is not retried.
    ///
    /// # Errors
    ///
    /// - [`SubmissionError::Rejected`] for any non-2xx status
    /// - [`SubmissionError::Transport`] if no response arrived
    /// - [`SubmissionError::InvalidResponse`] if the success body is unreadable
    pub async fn submit(&self, draft: &LeadDraft) -> Result<LeadId, SubmissionError> {
        let url = format!("{}/api/leads", self.base_url);
        let body = LeadRequest::from(draft);

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "lead API rejected submission");
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        let created: LeadCreated = read_json(resp).await?;
        if !created.success {
            return Err(SubmissionError::InvalidResponse {
                reason: "success flag was false".to_owned(),
            });
        }

        debug!(lead_id = %created.id, "lead submitted");
        Ok(created.id)
    }

    /// Probe `GET /api/health`.
    ///
    /// # Errors
    ///
    /// Same mapping as [`submit`](Self::submit).
    pub async fn health(&self) -> Result<HealthStatus, SubmissionError> {
        let url = format!("{}/api/health", self.base_url);
        let start = Instant::now();

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: HealthResponse = read_json(resp).await?;
        Ok(HealthStatus {
            status: body.status,
            latency_ms: start.elapsed().as_millis(),
        })
    }
}

#[async_trait::async_trait]
impl LeadSubmitter for LeadClient {
    async fn submit(&self, draft: &LeadDraft) -> Result<LeadId, SubmissionError> {
        LeadClient::submit(self, draft).await
    }
}

// --- Private ---

async fn read_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, SubmissionError> {
    let text = resp.text().await.map_err(transport_error)?;
    serde_json::from_str(&text).map_err(|e| SubmissionError::InvalidResponse {
        reason: e.to_string(),
    })
}

fn transport_error(err: reqwest::Error) -> SubmissionError {
    warn!(error = %err, "lead API unreachable");
    let reason = if err.is_timeout() {
        TIMEOUT_MESSAGE
    } else if err.is_connect() {
        UNREACHABLE_MESSAGE
    } else {
        GENERIC_SUBMISSION_MESSAGE
    };
    SubmissionError::Transport {
        reason: reason.to_owned(),
    }
}
