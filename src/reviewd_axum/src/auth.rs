//! Bearer-token actor extraction and the permission guard.

use axum::{Json, http::StatusCode, response::IntoResponse};
use http::{HeaderMap, Method, header};
use reviewd_core::{Actor, Policy, TokenIssuer, Username, evaluate};
use thiserror::Error;

/// Pull the raw token out of an `Authorization: Bearer ...` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Recover the caller's identity from the request headers.
///
/// A missing header or a token that fails verification both yield
/// [`Actor::Anonymous`]; the permission evaluator then decides what an
/// anonymous caller may do.
pub fn actor_from_headers<T>(headers: &HeaderMap, token_issuer: &T) -> Actor
where
    T: TokenIssuer,
{
    match bearer_token(headers) {
        None => Actor::Anonymous,
        Some(token) => match token_issuer.verify_token(token) {
            Ok(claims) => Actor::Authenticated {
                username: claims.username,
                role: claims.role,
            },
            Err(_) => Actor::Anonymous,
        },
    }
}

/// Deny response for the permission evaluator.
///
/// Deliberately generic: the caller learns nothing about why the check
/// failed.
#[derive(Debug, Error)]
#[error("You do not have permission to perform this action")]
pub struct PermissionRejection;

impl IntoResponse for PermissionRejection {
    fn into_response(self) -> axum::response::Response {
        (
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({ "error": self.to_string() })),
        )
            .into_response()
    }
}

/// Run the permission evaluator; must be called before any mutation.
pub fn authorize(
    policy: Policy,
    method: &Method,
    actor: &Actor,
    target_author: Option<&Username>,
) -> Result<(), PermissionRejection> {
    if evaluate(policy, method, actor, target_author) {
        Ok(())
    } else {
        Err(PermissionRejection)
    }
}
