//! HTTP request handlers for the Shift Compliance Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::compliance::{authorize_override, evaluate};
use crate::error::EngineError;

use super::request::{EvaluationRequest, OverrideRequest, ReplaceAgreementsRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/agreements", put(replace_agreements_handler))
        .route("/agreements/:code", get(get_agreement_handler))
        .route("/evaluate", post(evaluate_handler))
        .route("/overrides", post(override_handler))
        .with_state(state)
}

/// Handler for GET /agreements/:code.
///
/// Returns the registered rule for the agreement code.
async fn get_agreement_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Response {
    let snapshot = state.registry().snapshot();
    match snapshot.get(&code) {
        Ok(rule) => json_response(StatusCode::OK, rule),
        Err(err) => {
            warn!(agreement_code = %code, "Agreement lookup failed");
            error_response(err)
        }
    }
}

/// Handler for PUT /agreements.
///
/// Replaces the whole agreement set. On validation failure the previous set
/// keeps serving.
async fn replace_agreements_handler(
    State(state): State<AppState>,
    payload: Result<Json<ReplaceAgreementsRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing agreement replacement");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match state.registry().replace(&request.agreements) {
        Ok(count) => {
            let snapshot = state.registry().snapshot();
            json_response(
                StatusCode::OK,
                &serde_json::json!({
                    "agreements": count,
                    "codes": snapshot.codes()
                }),
            )
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Agreement replacement rejected"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /evaluate.
///
/// Looks up the rule for the proposed shift's agreement and returns the
/// verdict. Blocking verdicts are still a 200: callers inspect `is_blocking`.
async fn evaluate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EvaluationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing evaluation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let snapshot = state.registry().snapshot();
    let rule = match snapshot.get(&request.proposed.agreement_code) {
        Ok(rule) => rule,
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                agreement_code = %request.proposed.agreement_code,
                "Agreement not found"
            );
            return error_response(err);
        }
    };

    let start_time = Instant::now();
    match evaluate(&request.proposed, &request.ledger, rule, &request.overrides) {
        Ok(verdict) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %verdict.employee_id(),
                agreement_code = %verdict.agreement_code(),
                ledger_entries = request.ledger.len(),
                violations = verdict.violations().len(),
                is_blocking = verdict.is_blocking(),
                duration_us = start_time.elapsed().as_micros(),
                "Evaluation completed"
            );
            json_response(StatusCode::OK, &verdict)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Evaluation failed"
            );
            error_response(err)
        }
    }
}

/// Handler for POST /overrides.
///
/// Constructs an override record. Persisting it to the audit log is the
/// caller's responsibility.
async fn override_handler(payload: Result<Json<OverrideRequest>, JsonRejection>) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    match authorize_override(
        &request.actor_id,
        request.violation_kind,
        &request.justification,
    ) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                override_id = %record.id,
                actor_id = %record.actor_id,
                violation_kind = %record.violation_kind,
                audit_action = record.violation_kind.audit_action().unwrap_or_default(),
                "Override authorized"
            );
            json_response(StatusCode::CREATED, &record)
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                actor_id = %request.actor_id,
                error = %err,
                "Override rejected"
            );
            error_response(err)
        }
    }
}

fn json_response<T: Serialize>(status: StatusCode, body: &T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(err: EngineError) -> Response {
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, &api_error.error)
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's detailed message
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    json_response(StatusCode::BAD_REQUEST, &error)
}
