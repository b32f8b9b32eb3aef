//! Lead capture route: `/api/leads`
//!
//! Accepts a submitted intake form, checks that the required fields are
//! present, normalises the values and persists one new lead per request.
//! Repeated submissions are not deduplicated.

use std::sync::Arc;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{debug, info};

use unikhoj_core::error::ParseFieldError;
use unikhoj_core::lead::{BudgetBracket, Degree, NewLead, TestType};
use unikhoj_core::wire::{LeadCreated, LeadRequest};

use crate::error::AppError;
use crate::state::AppState;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const INVALID_VALUE_MESSAGE: &str = "Invalid field value";
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";

/// Build the `/api/leads` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(create_lead))
}

// ── Handlers ─────────────────────────────────────────────────────────

/// Create a lead.
///
/// `201 {"success": true, "id": ...}` on success, `400` for a missing or
/// malformed field, `500` if the store fails.
async fn create_lead(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LeadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LeadCreated>), AppError> {
    let Json(body) = body.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "unreadable lead body");
        AppError::BadRequest(INVALID_BODY_MESSAGE.to_owned())
    })?;

    let new_lead = into_new_lead(body)?;
    let lead = state.store.create(new_lead).await?;

    info!(lead_id = %lead.id, degree = %lead.degree, country = %lead.country, "lead created");

    Ok((
        StatusCode::CREATED,
        Json(LeadCreated {
            success: true,
            id: lead.id,
        }),
    ))
}

// ── Normalisation ────────────────────────────────────────────────────

/// Trimmed value, or `None` when absent or blank.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn invalid(err: &ParseFieldError) -> AppError {
    debug!(error = %err, "rejected lead field");
    AppError::BadRequest(INVALID_VALUE_MESSAGE.to_owned())
}

/// Turn a request body into a storable lead.
///
/// Missing `testType` defaults to `ielts`; a score sent with `none` is
/// dropped; a blank email is stored as absent and emails are lower-cased.
///
/// # Errors
///
/// Returns [`AppError::BadRequest`] when a required field is missing or an
/// enum field holds an unknown code.
pub fn into_new_lead(body: LeadRequest) -> Result<NewLead, AppError> {
    let (Some(full_name), Some(phone), Some(degree), Some(gpa), Some(country), Some(budget)) = (
        present(body.full_name),
        present(body.phone),
        present(body.degree),
        present(body.gpa),
        present(body.country),
        present(body.budget),
    ) else {
        return Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_owned()));
    };

    let degree: Degree = degree.parse().map_err(|e| invalid(&e))?;
    let budget: BudgetBracket = budget.parse().map_err(|e| invalid(&e))?;
    let test_type: TestType = match present(body.test_type) {
        Some(code) => code.parse().map_err(|e| invalid(&e))?,
        None => TestType::default(),
    };

    let test_score = if test_type.has_score() {
        present(body.test_score)
    } else {
        None
    };

    Ok(NewLead {
        full_name,
        phone,
        email: present(body.email).map(|e| e.to_lowercase()),
        degree,
        gpa,
        test_type,
        test_score,
        country,
        budget,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    fn full_request() -> LeadRequest {
        LeadRequest {
            full_name: Some("  Ram Sharma ".to_owned()),
            phone: Some("9812345678".to_owned()),
            email: Some(" Ram@Example.COM ".to_owned()),
            degree: Some("bachelors".to_owned()),
            gpa: Some("3.5".to_owned()),
            test_type: Some("ielts".to_owned()),
            test_score: Some("7.5".to_owned()),
            country: Some("USA".to_owned()),
            budget: Some("15-25L".to_owned()),
        }
    }

    fn assert_bad_request(result: Result<NewLead, AppError>, expected: &str) {
        match result {
            Err(AppError::BadRequest(msg)) => assert_eq!(msg, expected),
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn normalises_a_full_request() {
        let lead = into_new_lead(full_request()).unwrap();
        assert_eq!(lead.full_name, "Ram Sharma");
        assert_eq!(lead.email.as_deref(), Some("ram@example.com"));
        assert_eq!(lead.degree, Degree::Bachelors);
        assert_eq!(lead.test_type, TestType::Ielts);
        assert_eq!(lead.test_score.as_deref(), Some("7.5"));
        assert_eq!(lead.budget, BudgetBracket::From15To25L);
    }

    #[test]
    fn each_required_field_is_enforced() {
        let clears: [fn(&mut LeadRequest); 6] = [
            |r| r.full_name = None,
            |r| r.phone = None,
            |r| r.degree = None,
            |r| r.gpa = Some("   ".to_owned()),
            |r| r.country = Some(String::new()),
            |r| r.budget = None,
        ];
        for clear in clears {
            let mut req = full_request();
            clear(&mut req);
            assert_bad_request(into_new_lead(req), MISSING_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let mut req = full_request();
        req.email = Some(String::new());
        req.test_type = None;
        req.test_score = None;

        let lead = into_new_lead(req).unwrap();
        assert_eq!(lead.email, None);
        assert_eq!(lead.test_type, TestType::Ielts);
        assert_eq!(lead.test_score, None);
    }

    #[test]
    fn score_is_dropped_without_a_test() {
        let mut req = full_request();
        req.test_type = Some("none".to_owned());

        let lead = into_new_lead(req).unwrap();
        assert_eq!(lead.test_type, TestType::None);
        assert_eq!(lead.test_score, None);
    }

    #[test]
    fn unknown_codes_are_rejected() {
        let mut req = full_request();
        req.degree = Some("phd".to_owned());
        assert_bad_request(into_new_lead(req), INVALID_VALUE_MESSAGE);

        let mut req = full_request();
        req.budget = Some("cheap".to_owned());
        assert_bad_request(into_new_lead(req), INVALID_VALUE_MESSAGE);

        let mut req = full_request();
        req.test_type = Some("gre".to_owned());
        assert_bad_request(into_new_lead(req), INVALID_VALUE_MESSAGE);
    }
}
