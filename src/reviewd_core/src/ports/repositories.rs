use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    confirmation_code::ConfirmationCode, email::Email, user::User, username::Username,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Username is already taken")]
    UsernameTaken,
    #[error("Email is already registered")]
    EmailTaken,
    #[error("User not found")]
    UserNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UsernameTaken, Self::UsernameTaken) => true,
            (Self::EmailTaken, Self::EmailTaken) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

/// Persistence collaborator for accounts.
///
/// Implementations must enforce unique(username) and unique(email); the
/// signup handshake relies on the store to detect identity conflicts, and
/// blames the username before the email when both collide.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError>;
    async fn get_user(&self, username: &Username) -> Result<User, UserStoreError>;
    /// Look up the account matching the exact (username, email) pair.
    async fn find_by_identity(
        &self,
        username: &Username,
        email: &Email,
    ) -> Result<Option<User>, UserStoreError>;
    async fn store_confirmation_code(
        &self,
        username: &Username,
        code: ConfirmationCode,
    ) -> Result<(), UserStoreError>;
    async fn clear_confirmation_code(&self, username: &Username) -> Result<(), UserStoreError>;
}

// RateLimitStore port trait and errors
#[derive(Debug, Error)]
pub enum RateLimitStoreError {
    #[error("Store error: {0}")]
    StoreError(String),
}

/// Keyed failure counter with expiry.
///
/// Cache semantics: losing the counters on restart only resets throttling.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<u32>, RateLimitStoreError>;
    async fn set(&self, key: &str, count: u32, ttl: Duration) -> Result<(), RateLimitStoreError>;
    async fn delete(&self, key: &str) -> Result<(), RateLimitStoreError>;
}
