//! Mapping from domain outcomes to HTTP responses
//!
//! Success is 200 with the value as JSON. A failed outcome is 400 with the
//! array of external `{code, message}` pairs; the precise code of each
//! violated rule travels inside the array.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use leaderboard_common::Outcome;
use serde::Serialize;

/// Respond with the outcome's value or its errors
pub fn respond<T: Serialize>(outcome: Outcome<T>) -> Response {
    match outcome {
        Outcome::Success(value) => (StatusCode::OK, Json(value)).into_response(),
        failure => failed(&failure),
    }
}

/// Respond with a fixed confirmation message on success
pub fn respond_with_message(outcome: Outcome<()>, message: &'static str) -> Response {
    if outcome.is_success() {
        return (StatusCode::OK, Json(message)).into_response();
    }
    failed(&outcome)
}

fn failed<T>(outcome: &Outcome<T>) -> Response {
    (StatusCode::BAD_REQUEST, Json(outcome.external_errors())).into_response()
}
