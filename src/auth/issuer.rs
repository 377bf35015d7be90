use chrono::{DateTime, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

use super::{AuthError, SessionClaims};
use crate::config::SecurityConfig;

/// Mints signed, time-limited session tokens
#[derive(Clone)]
pub struct SessionIssuer {
    encoding_key: EncodingKey,
    ttl_secs: i64,
}

impl SessionIssuer {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret, security.session_ttl_secs)
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl_secs
    }

    /// Issue a token for `email` valid from now until now + ttl
    pub fn issue(&self, email: &str) -> Result<String, AuthError> {
        self.issue_at(email, Utc::now())
    }

    /// Issue a token with an explicit issuance instant
    pub fn issue_at(&self, email: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = SessionClaims::new(email, issued_at, self.ttl_secs);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }
}
