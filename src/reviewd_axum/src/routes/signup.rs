//! Axum-specific signup route.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use reviewd_application::{SignupError as SignupUseCaseError, SignupUseCase};
use reviewd_core::{Email, EmailClient, UserStore, Username};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Axum signup route.
///
/// Validates the claimed identity, registers (or re-registers) the account
/// and issues a confirmation code by mail. The echoed payload is returned on
/// success.
#[tracing::instrument(name = "Signup", skip(user_store, email_client, request))]
pub async fn signup<U, E>(
    State((user_store, email_client)): State<(U, E)>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, SignupError>
where
    U: UserStore,
    E: EmailClient,
{
    // Parse domain entities
    let username = Username::try_from(request.username)
        .map_err(|e| SignupError::InvalidUsername(e.to_string()))?;
    let email =
        Email::try_from(request.email).map_err(|e| SignupError::InvalidEmail(e.to_string()))?;

    let use_case = SignupUseCase::new(&user_store, &email_client);
    use_case
        .execute(username.clone(), email.clone())
        .await
        .map_err(|e| match e {
            SignupUseCaseError::UsernameTaken | SignupUseCaseError::EmailTaken => {
                SignupError::IdentityConflict(e.to_string())
            }
            SignupUseCaseError::UserStoreError(inner) => {
                SignupError::UnexpectedError(inner.to_string())
            }
        })?;

    Ok((
        StatusCode::OK,
        Json(SignupResponse {
            username: username.to_string(),
            email: email.to_string(),
        }),
    ))
}

/// Axum-specific request body for signup
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    /// Claimed account handle
    pub username: String,

    /// Claimed email address
    pub email: String,
}

/// Echoed payload returned on successful signup
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub username: String,
    pub email: String,
}

/// Errors that can occur during signup
#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("{0}")]
    IdentityConflict(String),

    #[error("Signup failed: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for SignupError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            SignupError::InvalidUsername(msg) => (StatusCode::BAD_REQUEST, msg),
            SignupError::InvalidEmail(msg) => (StatusCode::BAD_REQUEST, msg),
            SignupError::IdentityConflict(msg) => (StatusCode::BAD_REQUEST, msg),
            SignupError::UnexpectedError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
