//! Composable success/failure values for business-rule outcomes
//!
//! Every domain operation reports expected failures (bad input, missing
//! entities, ownership violations) through an [`Outcome`] instead of an
//! `Err`. Independent checks are built with [`Outcome::fail_if`] and folded
//! together with [`merge`], so a caller sees every violated rule at once.
//!
//! A failure carries one [`ErrorDescriptor`] per violated rule. Each
//! descriptor holds an external `{code, message}` pair that is safe to return
//! to clients, plus an optional internal detail that only ever reaches the
//! error log. [`Outcome::fail`] strips the internal detail before an outcome
//! leaves the domain layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::logging::{ErrorRecord, ErrorSink};

/// External message used when a check does not name one
pub const DEFAULT_MESSAGE: &str = "Bad request.";

/// External code used when a check does not name one
pub const DEFAULT_CODE: u16 = 400;

/// Client-facing error pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalError {
    pub code: u16,
    pub message: String,
}

impl ExternalError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Generic 500 pair used for unexpected faults
    pub fn internal_server_error() -> Self {
        Self::new(500, "Internal server error.")
    }
}

/// Log-only details of a failure
#[derive(Debug, Clone, PartialEq)]
pub struct InternalDetail {
    pub code: u16,
    pub message: String,
    pub cause: Option<String>,
    pub context: Option<Value>,
}

/// One violated rule inside a failed [`Outcome`]
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorDescriptor {
    external: ExternalError,
    internal: Option<InternalDetail>,
}

impl ErrorDescriptor {
    /// Descriptor that only carries the client-facing pair
    pub fn external_only(external: ExternalError) -> Self {
        Self {
            external,
            internal: None,
        }
    }

    pub fn external(&self) -> &ExternalError {
        &self.external
    }

    pub fn internal(&self) -> Option<&InternalDetail> {
        self.internal.as_ref()
    }

    /// Internal code when present, external code otherwise
    pub fn code(&self) -> u16 {
        self.internal
            .as_ref()
            .map_or(self.external.code, |detail| detail.code)
    }

    /// Internal message when present, external message otherwise
    pub fn message(&self) -> &str {
        self.internal
            .as_ref()
            .map_or(self.external.message.as_str(), |detail| {
                detail.message.as_str()
            })
    }

    /// Drop everything except the client-facing pair
    pub fn into_external(self) -> Self {
        Self::external_only(self.external)
    }
}

/// Description of a single rule for [`Outcome::fail_if`]
///
/// The external pair defaults to `400 "Bad request."`. The internal pair
/// defaults to the external one and is what gets logged.
#[derive(Debug, Clone)]
pub struct Check {
    external: ExternalError,
    internal_message: Option<String>,
    internal_code: Option<u16>,
    cause: Option<String>,
    context: Option<Value>,
    function: &'static str,
}

impl Default for Check {
    fn default() -> Self {
        Self::with_code(DEFAULT_MESSAGE, DEFAULT_CODE)
    }
}

impl Check {
    /// Rule reported as a 400 with the given external message
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_code(message, DEFAULT_CODE)
    }

    pub fn with_code(message: impl Into<String>, code: u16) -> Self {
        Self {
            external: ExternalError::new(code, message),
            internal_message: None,
            internal_code: None,
            cause: None,
            context: None,
            function: "fail_if",
        }
    }

    /// Log a different message and code than the one returned to the client
    pub fn internal(mut self, message: impl Into<String>, code: u16) -> Self {
        self.internal_message = Some(message.into());
        self.internal_code = Some(code);
        self
    }

    pub fn cause(mut self, cause: impl std::fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    /// Request details attached to the log record
    pub fn context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }

    /// Name of the operation that ran the check, for the log record
    pub fn in_function(mut self, function: &'static str) -> Self {
        self.function = function;
        self
    }

    fn into_parts(self) -> (ErrorDescriptor, ErrorRecord) {
        let internal = InternalDetail {
            code: self.internal_code.unwrap_or(self.external.code),
            message: self
                .internal_message
                .unwrap_or_else(|| self.external.message.clone()),
            cause: self.cause,
            context: self.context,
        };

        let record = ErrorRecord::new(&internal, &self.external, self.function);
        let descriptor = ErrorDescriptor {
            external: self.external,
            internal: Some(internal),
        };

        (descriptor, record)
    }
}

/// Success with an optional value, or failure with violated rules
///
/// `Failure` is never built with an empty list by this module; an empty list
/// is still treated as success so hand-built values cannot masquerade as
/// failures.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum Outcome<T> {
    Success(Option<T>),
    Failure(Vec<ErrorDescriptor>),
}

impl<T> Outcome<T> {
    /// Success wrapping a value
    pub fn ok(value: T) -> Self {
        Outcome::Success(Some(value))
    }

    /// Success without a value
    pub fn empty() -> Self {
        Outcome::Success(None)
    }

    /// Failure for `check` when `predicate` holds, a neutral empty success otherwise.
    ///
    /// Building the failure writes one record to `sink`. Sink errors are
    /// ignored so logging can never break the pipeline.
    pub fn fail_if(sink: &dyn ErrorSink, predicate: bool, check: Check) -> Self {
        if !predicate {
            return Outcome::empty();
        }

        let (descriptor, record) = check.into_parts();
        if let Err(e) = sink.record(&record) {
            tracing::debug!(error = %e, "Dropped error record");
        }

        Outcome::Failure(vec![descriptor])
    }

    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Success(_) => true,
            Outcome::Failure(errors) => errors.is_empty(),
        }
    }

    pub fn is_error(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success(value) => value.as_ref(),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success(value) => value,
            Outcome::Failure(_) => None,
        }
    }

    pub fn errors(&self) -> &[ErrorDescriptor] {
        match self {
            Outcome::Success(_) => &[],
            Outcome::Failure(errors) => errors,
        }
    }

    /// Client-facing pairs of every violated rule, in order
    pub fn external_errors(&self) -> Vec<ExternalError> {
        self.errors()
            .iter()
            .map(|error| error.external().clone())
            .collect()
    }

    /// Presentation-ready failure: internal details are discarded.
    ///
    /// Calling this on a success is a programming error and yields a generic
    /// 500 failure rather than leaking the value.
    pub fn fail<U>(self) -> Outcome<U> {
        match self {
            Outcome::Failure(errors) if !errors.is_empty() => Outcome::Failure(
                errors
                    .into_iter()
                    .map(ErrorDescriptor::into_external)
                    .collect(),
            ),
            _ => Outcome::Failure(vec![ErrorDescriptor::external_only(
                ExternalError::internal_server_error(),
            )]),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(value) => Outcome::Success(value.map(f)),
            Outcome::Failure(errors) => Outcome::Failure(errors),
        }
    }
}

/// Values collected by [`merge`] when every input succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Merged<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Merged<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Merged::One(value) => vec![value],
            Merged::Many(values) => values,
        }
    }
}

/// Fold several outcomes into one.
///
/// Any failure wins: the result carries every input's errors concatenated in
/// input order, duplicates included. Otherwise the non-empty success values
/// are collected in order and returned as nothing (zero values), the value
/// itself (one) or the ordered list (more than one).
pub fn merge<T>(results: impl IntoIterator<Item = Outcome<T>>) -> Outcome<Merged<T>> {
    let mut errors = Vec::new();
    let mut values = Vec::new();

    for result in results {
        match result {
            Outcome::Success(value) => values.extend(value),
            Outcome::Failure(mut errs) => errors.append(&mut errs),
        }
    }

    if !errors.is_empty() {
        return Outcome::Failure(errors);
    }

    match values.len() {
        0 => Outcome::empty(),
        1 => Outcome::ok(Merged::One(values.remove(0))),
        _ => Outcome::ok(Merged::Many(values)),
    }
}
