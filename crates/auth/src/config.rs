//! Authentication configuration

use leaderboard_common::config::DEFAULT_JWT_EXPIRY_HOURS;

/// Authentication configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
    /// Token lifetime in hours
    pub expiry_hours: i64,
}

impl AuthConfig {
    /// Config with the default lifetime and no issuer/audience checks
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            issuer: None,
            audience: None,
            expiry_hours: DEFAULT_JWT_EXPIRY_HOURS,
        }
    }
}
