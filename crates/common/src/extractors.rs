//! Custom axum extractors for Leaderboard

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::logging::{ErrorSink, TracingSink};
use crate::outcome::{Check, Outcome};

/// JSON body extractor whose rejection uses the external error-array shape.
///
/// A missing or malformed body is reported as `[{"code":400,"message":"Bad request."}]`
/// and logged with the parser's reason.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

/// Rejection type for `JsonBody`
#[derive(Debug)]
pub struct JsonBodyRejection(JsonRejection);

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        let outcome: Outcome<()> = Outcome::fail_if(
            &TracingSink as &dyn ErrorSink,
            true,
            Check::default()
                .internal(self.0.body_text(), self.0.status().as_u16())
                .in_function("json_body"),
        );

        (self.0.status(), Json(outcome.external_errors())).into_response()
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(JsonBodyRejection)?;
        Ok(JsonBody(value))
    }
}
