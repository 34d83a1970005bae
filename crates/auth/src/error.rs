//! Authentication errors

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use leaderboard_common::{Check, ErrorSink, Outcome, TracingSink};
use serde_json::json;

/// Authentication error
#[derive(Debug)]
pub enum AuthError {
    MissingAuthorization,
    InvalidAuthorizationFormat,
    InvalidToken,
    TokenIssueFailed,
}

impl AuthError {
    /// Log-only reason and code
    fn internal(&self) -> (&'static str, u16) {
        match self {
            AuthError::MissingAuthorization => ("Token missing or malformed.", 401),
            AuthError::InvalidAuthorizationFormat => ("Token missing or malformed.", 401),
            AuthError::InvalidToken => ("Bad token.", 403),
            AuthError::TokenIssueFailed => ("Failed to sign token.", 500),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::TokenIssueFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
            _ => (StatusCode::FORBIDDEN, "Forbidden."),
        };

        let (reason, code) = self.internal();
        let _logged: Outcome<()> = Outcome::fail_if(
            &TracingSink as &dyn ErrorSink,
            true,
            Check::with_code(message, status.as_u16())
                .internal(reason, code)
                .in_function("authenticate_token"),
        );

        let body = Json(json!({
            "message": message,
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
