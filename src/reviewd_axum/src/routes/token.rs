//! Axum-specific token exchange route.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use reviewd_application::{AttemptPolicy, ObtainTokenError, ObtainTokenUseCase};
use reviewd_core::{ConfirmationCode, RateLimitStore, TokenIssuer, UserStore, Username};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Axum token exchange route.
///
/// Redeems a confirmation code for a signed bearer token. Rate limiting is
/// reported with its own message so clients can tell "try again" from "wait
/// and try later".
#[tracing::instrument(name = "Obtain token", skip(state, request))]
pub async fn obtain_token<U, R, T>(
    State(state): State<(U, R, T, AttemptPolicy)>,
    Json(request): Json<TokenRequest>,
) -> Result<impl IntoResponse, TokenError>
where
    U: UserStore,
    R: RateLimitStore,
    T: TokenIssuer,
{
    let (user_store, rate_limit_store, token_issuer, policy) = state;

    // Parse domain entities
    let username = Username::try_from(request.username)
        .map_err(|e| TokenError::InvalidUsername(e.to_string()))?;
    let code = ConfirmationCode::parse(request.confirmation_code)
        .map_err(|e| TokenError::InvalidCode(e.to_string()))?;

    let use_case = ObtainTokenUseCase::new(&user_store, &rate_limit_store, &token_issuer, policy);
    let token = use_case
        .execute(username, code)
        .await
        .map_err(|e| match e {
            ObtainTokenError::UserNotFound => TokenError::UserNotFound,
            ObtainTokenError::InvalidCode => TokenError::InvalidCode(e.to_string()),
            ObtainTokenError::RateLimited => TokenError::RateLimited(e.to_string()),
            other => TokenError::UnexpectedError(other.to_string()),
        })?;

    Ok((StatusCode::OK, Json(TokenResponse { token })))
}

/// Axum-specific request body for the token exchange
#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    /// Account handle the code was issued to
    pub username: String,

    /// The confirmation code received via email
    pub confirmation_code: String,
}

/// Bearer token returned on successful exchange
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Errors that can occur during the token exchange
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("{0}")]
    InvalidCode(String),

    #[error("{0}")]
    RateLimited(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Token exchange failed: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for TokenError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            TokenError::InvalidUsername(msg) => (StatusCode::BAD_REQUEST, msg),
            TokenError::InvalidCode(msg) => (StatusCode::BAD_REQUEST, msg),
            TokenError::RateLimited(msg) => (StatusCode::BAD_REQUEST, msg),
            TokenError::UserNotFound => (StatusCode::NOT_FOUND, "User not found".to_string()),
            TokenError::UnexpectedError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
