// Session authentication: token issuance, verification, ownership checks
// and the cookie that carries the token between client and server.

pub mod cookie;
pub mod guard;
pub mod issuer;
pub mod verifier;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use guard::authorize;
pub use issuer::SessionIssuer;
pub use verifier::SessionVerifier;

/// Claims embedded in every session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Identity the session was issued for (an email address)
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(email: impl Into<String>, issued_at: DateTime<Utc>, ttl_secs: i64) -> Self {
        Self {
            email: email.into(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::seconds(ttl_secs)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing, malformed, tampered or expired token
    #[error("{0}")]
    Unauthenticated(String),

    /// Valid session whose identity does not own the requested resource
    #[error("{0}")]
    Forbidden(String),

    #[error("Failed to sign session token: {0}")]
    Signing(String),
}

impl AuthError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        AuthError::Unauthenticated(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        AuthError::Forbidden(message.into())
    }
}
