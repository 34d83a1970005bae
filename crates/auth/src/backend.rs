//! Concrete authentication backend
//!
//! Wraps `AuthConfig` and owns token issuing and verification. Tokens are
//! self-contained, so verifying one needs no store lookup.

use crate::config::AuthConfig;
use crate::context::AuthContext;
use crate::error::AuthError;
use crate::jwt::{issue_jwt_token, validate_jwt_token};

/// Concrete authentication backend.
///
/// Domain states expose this via `FromRef`:
/// ```ignore
/// impl FromRef<MyDomainState> for AuthBackend {
///     fn from_ref(state: &MyDomainState) -> Self {
///         state.auth.clone()
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthBackend {
    config: AuthConfig,
}

impl AuthBackend {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Sign a token for a user
    pub fn issue_token(&self, email: &str, name: &str) -> Result<String, AuthError> {
        issue_jwt_token(email, name, &self.config)
    }

    /// Validate a bearer token and return the caller identity
    pub fn authenticate_jwt(&self, token: &str) -> Result<AuthContext, AuthError> {
        validate_jwt_token(token, &self.config).map(AuthContext::from)
    }
}
