//! Axum-specific token verification route.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use http::HeaderMap;
use reviewd_core::TokenIssuer;
use serde::Serialize;
use thiserror::Error;

use crate::auth::bearer_token;

/// Axum token verification route.
///
/// Returns the identity and role bound to the presented bearer token.
#[tracing::instrument(name = "Verify token", skip(token_issuer, headers))]
pub async fn verify<T>(
    State(token_issuer): State<T>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, VerifyError>
where
    T: TokenIssuer,
{
    let token = bearer_token(&headers).ok_or(VerifyError::MissingToken)?;

    let claims = token_issuer
        .verify_token(token)
        .map_err(|_| VerifyError::InvalidToken)?;

    Ok((
        StatusCode::OK,
        Json(VerifyResponse {
            username: claims.username.to_string(),
            role: claims.role.to_string(),
        }),
    ))
}

/// Identity recovered from a valid bearer token
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub username: String,
    pub role: String,
}

/// Errors that can occur during token verification
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,
}

impl IntoResponse for VerifyError {
    fn into_response(self) -> axum::response::Response {
        let message = self.to_string();
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}
