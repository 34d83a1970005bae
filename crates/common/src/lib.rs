//! Shared building blocks for the Leaderboard service
//!
//! This crate provides common functionality used across the application:
//! - The `Outcome` success/failure pipeline used by every domain operation
//! - The error-log sink that records each failure
//! - Fault types for unexpected errors and their HTTP mapping
//! - Configuration management following 12-factor principles

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod outcome;

pub use config::{Config, LogFormat};
pub use db::RepositoryError;
pub use error::{Error, Result};
pub use extractors::JsonBody;
pub use logging::{ErrorRecord, ErrorSink, MemorySink, SinkError, TracingSink};
pub use outcome::{merge, Check, ErrorDescriptor, ExternalError, InternalDetail, Merged, Outcome};
