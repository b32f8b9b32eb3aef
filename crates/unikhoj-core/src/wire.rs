//! JSON bodies exchanged with the lead API.
//!
//! Field names are camelCase on the wire. Every request field is optional at
//! the JSON level so the server can answer a missing field with its own
//! `400` instead of a deserializer rejection.

use serde::{Deserialize, Serialize};

use crate::lead::{LeadDraft, LeadId};

/// Body of `POST /api/leads`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub degree: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gpa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_score: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

fn present(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

impl From<&LeadDraft> for LeadRequest {
    fn from(draft: &LeadDraft) -> Self {
        Self {
            full_name: present(&draft.full_name),
            phone: present(&draft.phone),
            email: present(&draft.email),
            degree: draft.degree.map(|d| d.as_str().to_owned()),
            gpa: present(&draft.gpa),
            test_type: draft.test_type.map(|t| t.as_str().to_owned()),
            test_score: present(&draft.test_score),
            country: draft.country.as_deref().and_then(present),
            budget: draft.budget.map(|b| b.as_str().to_owned()),
        }
    }
}

/// `201` body of `POST /api/leads`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadCreated {
    pub success: bool,
    pub id: LeadId,
}

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    /// The only status the server reports.
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_owned(),
        }
    }
}
