//! Fault types for unexpected errors
//!
//! Expected business failures travel as `Outcome` values. The types here are
//! for everything else (store connectivity loss, serialization bugs) and are
//! turned into a generic response at the HTTP boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::db::RepositoryError;
use crate::outcome::ExternalError;

/// Common result type
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the Leaderboard application
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Password hashing and other library failures
    #[error("Unexpected error: {0}")]
    Unexpected(#[from] anyhow::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Get the appropriate HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::Unexpected(_) | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Client-facing error pair; server faults never expose their detail
    pub fn external(&self) -> ExternalError {
        let status = self.status_code();
        match self {
            Error::NotFound(msg) | Error::Conflict(msg) => {
                ExternalError::new(status.as_u16(), msg.clone())
            }
            _ => ExternalError::internal_server_error(),
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::CapacityReached => Error::Conflict("Capacity reached".to_string()),
            RepositoryError::Connection(e) => Error::Database(e),
            RepositoryError::InvalidData(msg) => Error::Internal(msg),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log internal errors with full context
        if matches!(status, StatusCode::INTERNAL_SERVER_ERROR) {
            tracing::error!(error = %self, "Internal server error");
        }

        (status, Json(vec![self.external()])).into_response()
    }
}
