use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, role::Role, username::Username};

/// Notification collaborator. Best-effort: callers log failures and move on,
/// they never surface them to the end user.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}

/// Identity and role recovered from a verified bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub username: Username,
    pub role: Role,
}

#[derive(Debug, Error)]
pub enum TokenIssuerError {
    #[error("Invalid token")]
    InvalidToken,
    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

/// Token-issuance collaborator.
///
/// The token is an opaque signed string with an implementation-defined
/// expiry; this port only guarantees it can later be verified to recover the
/// identity and role it was bound to.
pub trait TokenIssuer: Send + Sync {
    fn issue_token(&self, claims: &TokenClaims) -> Result<String, TokenIssuerError>;
    fn verify_token(&self, token: &str) -> Result<TokenClaims, TokenIssuerError>;
}
