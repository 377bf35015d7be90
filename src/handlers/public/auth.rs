// handlers/public/auth.rs - session issuance and teardown
//
// POST /jwt     issue a session cookie for an identity
// POST /logout  tell the client to discard its session cookie

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SessionRequest {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SessionIssued {
    pub email: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct SessionRevoked {
    pub logged_out: bool,
}

/// POST /jwt - mint a session token and bind it to the `token` cookie.
///
/// The identity is trusted as given; no user store is consulted.
pub async fn issue_session(
    State(state): State<AppState>,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> ApiResult<SessionIssued> {
    let Json(payload) = payload?;

    if payload.email.trim().is_empty() {
        let mut field_errors = std::collections::HashMap::new();
        field_errors.insert("email".to_string(), "This field is required".to_string());
        return Err(ApiError::validation_error("Missing required fields", Some(field_errors)));
    }

    let token = state.issuer.issue(&payload.email)?;
    let cookie = HeaderValue::from_str(&state.cookies.session(&token))
        .map_err(|_| ApiError::internal_server_error("Failed to build session cookie"))?;

    tracing::info!("Issued session for {}", payload.email);

    Ok(ApiResponse::success(SessionIssued {
        email: payload.email,
        expires_in: state.issuer.ttl_secs(),
    })
    .with_header(header::SET_COOKIE, cookie))
}

/// POST /logout - replace the session cookie with an expired one.
///
/// Tokens are not tracked server-side, so a copy of the old token stays
/// valid until its own expiry.
pub async fn logout(State(state): State<AppState>) -> ApiResult<SessionRevoked> {
    let cookie = HeaderValue::from_str(&state.cookies.revoked())
        .map_err(|_| ApiError::internal_server_error("Failed to build session cookie"))?;

    Ok(ApiResponse::success(SessionRevoked { logged_out: true })
        .with_header(header::SET_COOKIE, cookie))
}
