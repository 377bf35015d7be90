use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::app::AppState;
use crate::auth::{cookie, SessionClaims};
use crate::error::ApiError;

/// Authenticated identity extracted from the session cookie
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub email: String,
}

impl From<SessionClaims> for AuthUser {
    fn from(claims: SessionClaims) -> Self {
        Self { email: claims.email }
    }
}

impl AuthUser {
    /// Ownership check against the identity a request targets
    pub fn authorize(&self, owner: &str) -> Result<(), ApiError> {
        crate::auth::authorize(&self.email, owner).map_err(ApiError::from)
    }
}

/// Session gate: verifies the `token` cookie and injects [`AuthUser`].
/// The wrapped handler never runs when verification fails.
pub async fn require_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = cookie::session_token(&headers);

    let claims = state.verifier.verify(token.as_deref()).map_err(|e| {
        tracing::warn!(
            "Rejected {} {}: {}",
            request.method(),
            request.uri().path(),
            e
        );
        ApiError::from(e)
    })?;

    tracing::debug!("Session verified for {}", claims.email);
    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}
