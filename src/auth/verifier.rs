use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};

use super::{AuthError, SessionClaims};
use crate::config::SecurityConfig;

/// Validates inbound session tokens
#[derive(Clone)]
pub struct SessionVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is exact: a token is dead the second its exp passes
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(&security.jwt_secret)
    }

    /// Verify an optional token and return its claims
    pub fn verify(&self, token: Option<&str>) -> Result<SessionClaims, AuthError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AuthError::unauthenticated("Missing session token"))?;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::unauthenticated("Session token expired"),
                ErrorKind::InvalidSignature => AuthError::unauthenticated("Invalid session token signature"),
                _ => AuthError::unauthenticated(format!("Invalid session token: {}", e)),
            })?;

        if data.claims.email.is_empty() {
            return Err(AuthError::unauthenticated("Session token has no identity"));
        }

        Ok(data.claims)
    }
}
