//! Identity of an authenticated caller

use crate::claims::Claims;

/// Represents an authenticated user context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub email: String,
    pub name: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
            name: claims.name,
        }
    }
}
