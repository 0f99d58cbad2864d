use std::time::Duration;

use reviewd_core::{
    ConfirmationCode, RateLimitStore, RateLimitStoreError, TokenClaims, TokenIssuer,
    TokenIssuerError, UserStore, UserStoreError, Username,
};

/// How many failed exchanges a username may accumulate before attempts are
/// rejected outright, and for how long a failure stays on the books.
#[derive(Debug, Clone, Copy)]
pub struct AttemptPolicy {
    pub max_attempts: u32,
    pub window: Duration,
}

impl Default for AttemptPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(600),
        }
    }
}

/// Error types for the token exchange use case
#[derive(Debug, thiserror::Error)]
pub enum ObtainTokenError {
    #[error("User not found")]
    UserNotFound,
    #[error("Invalid confirmation code")]
    InvalidCode,
    #[error("Too many failed attempts, try again later")]
    RateLimited,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("Rate limit store error: {0}")]
    RateLimitStoreError(#[from] RateLimitStoreError),
    #[error("Token error: {0}")]
    TokenError(#[from] TokenIssuerError),
}

/// Token exchange use case - redeems a confirmation code for a bearer token
///
/// Codes are single use: a successful redemption clears the stored code, so
/// replaying it fails. A wrong code never invalidates the stored one; it
/// only feeds the failure counter.
pub struct ObtainTokenUseCase<'a, U, R, T>
where
    U: UserStore,
    R: RateLimitStore,
    T: TokenIssuer,
{
    user_store: &'a U,
    rate_limit_store: &'a R,
    token_issuer: &'a T,
    policy: AttemptPolicy,
}

impl<'a, U, R, T> ObtainTokenUseCase<'a, U, R, T>
where
    U: UserStore,
    R: RateLimitStore,
    T: TokenIssuer,
{
    pub fn new(
        user_store: &'a U,
        rate_limit_store: &'a R,
        token_issuer: &'a T,
        policy: AttemptPolicy,
    ) -> Self {
        Self {
            user_store,
            rate_limit_store,
            token_issuer,
            policy,
        }
    }

    /// Execute the token exchange
    ///
    /// # Arguments
    /// * `username` - Account handle the code was issued to
    /// * `code` - The confirmation code received via email
    ///
    /// # Returns
    /// Ok(token) on success; the stored code and failure counter are cleared.
    #[tracing::instrument(name = "ObtainTokenUseCase::execute", skip(self, code))]
    pub async fn execute(
        &self,
        username: Username,
        code: ConfirmationCode,
    ) -> Result<String, ObtainTokenError> {
        let attempts = self
            .rate_limit_store
            .get(username.as_str())
            .await?
            .unwrap_or(0);

        // Fail fast once the threshold is reached, before touching the code.
        if attempts >= self.policy.max_attempts {
            tracing::warn!(%username, attempts, "Token exchange rate limited");
            return Err(ObtainTokenError::RateLimited);
        }

        let user = self
            .user_store
            .get_user(&username)
            .await
            .map_err(|e| match e {
                UserStoreError::UserNotFound => ObtainTokenError::UserNotFound,
                other => ObtainTokenError::UserStoreError(other),
            })?;

        // A missing stored code counts as a mismatch.
        let matches = user.confirmation_code().is_some_and(|stored| stored == &code);
        if !matches {
            self.rate_limit_store
                .set(username.as_str(), attempts + 1, self.policy.window)
                .await?;
            return Err(ObtainTokenError::InvalidCode);
        }

        self.user_store
            .clear_confirmation_code(&username)
            .await
            .map_err(ObtainTokenError::UserStoreError)?;
        self.rate_limit_store.delete(username.as_str()).await?;

        let claims = TokenClaims {
            username: user.username().clone(),
            role: user.role(),
        };
        let token = self.token_issuer.issue_token(&claims)?;

        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reviewd_core::{Email, User};
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    #[derive(Clone, Default)]
    struct MockUserStore {
        users: Arc<RwLock<HashMap<Username, User>>>,
    }

    impl MockUserStore {
        async fn insert_with_code(&self, name: &str, code: &ConfirmationCode) {
            let mut user = User::new(
                username(name),
                Email::try_from(format!("{name}@x.com")).unwrap(),
            );
            user.set_confirmation_code(code.clone());
            self.users.write().await.insert(username(name), user);
        }
    }

    #[async_trait::async_trait]
    impl UserStore for MockUserStore {
        async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
            self.users.write().await.insert(user.username().clone(), user);
            Ok(())
        }

        async fn get_user(&self, username: &Username) -> Result<User, UserStoreError> {
            self.users
                .read()
                .await
                .get(username)
                .cloned()
                .ok_or(UserStoreError::UserNotFound)
        }

        async fn find_by_identity(
            &self,
            username: &Username,
            email: &Email,
        ) -> Result<Option<User>, UserStoreError> {
            Ok(self
                .users
                .read()
                .await
                .get(username)
                .filter(|u| u.email() == email)
                .cloned())
        }

        async fn store_confirmation_code(
            &self,
            username: &Username,
            code: ConfirmationCode,
        ) -> Result<(), UserStoreError> {
            let mut users = self.users.write().await;
            let user = users
                .get_mut(username)
                .ok_or(UserStoreError::UserNotFound)?;
            user.set_confirmation_code(code);
            Ok(())
        }

        async fn clear_confirmation_code(&self, username: &Username) -> Result<(), UserStoreError> {
            let mut users = self.users.write().await;
            let user = users
                .get_mut(username)
                .ok_or(UserStoreError::UserNotFound)?;
            user.clear_confirmation_code();
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct MockRateLimitStore {
        counts: Arc<RwLock<HashMap<String, u32>>>,
    }

    #[async_trait::async_trait]
    impl RateLimitStore for MockRateLimitStore {
        async fn get(&self, key: &str) -> Result<Option<u32>, RateLimitStoreError> {
            Ok(self.counts.read().await.get(key).copied())
        }

        async fn set(
            &self,
            key: &str,
            count: u32,
            _ttl: Duration,
        ) -> Result<(), RateLimitStoreError> {
            self.counts.write().await.insert(key.to_string(), count);
            Ok(())
        }

        async fn delete(&self, key: &str) -> Result<(), RateLimitStoreError> {
            self.counts.write().await.remove(key);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockTokenIssuer {
        issued: AtomicUsize,
    }

    impl TokenIssuer for MockTokenIssuer {
        fn issue_token(&self, claims: &TokenClaims) -> Result<String, TokenIssuerError> {
            self.issued.fetch_add(1, Ordering::SeqCst);
            Ok(format!("token-for-{}", claims.username))
        }

        fn verify_token(&self, _token: &str) -> Result<TokenClaims, TokenIssuerError> {
            unimplemented!()
        }
    }

    fn username(name: &str) -> Username {
        Username::try_from(name.to_string()).unwrap()
    }

    fn wrong_code() -> ConfirmationCode {
        ConfirmationCode::parse("WRONG".to_string()).unwrap()
    }

    fn fixture() -> (MockUserStore, MockRateLimitStore, MockTokenIssuer) {
        (
            MockUserStore::default(),
            MockRateLimitStore::default(),
            MockTokenIssuer::default(),
        )
    }

    #[tokio::test]
    async fn correct_code_yields_token_exactly_once() {
        let (users, limits, issuer) = fixture();
        let code = ConfirmationCode::generate();
        users.insert_with_code("alice", &code).await;

        let use_case = ObtainTokenUseCase::new(&users, &limits, &issuer, AttemptPolicy::default());

        let token = use_case
            .execute(username("alice"), code.clone())
            .await
            .unwrap();
        assert_eq!(token, "token-for-alice");

        // Replaying the consumed code fails.
        let result = use_case.execute(username("alice"), code).await;
        assert!(matches!(result, Err(ObtainTokenError::InvalidCode)));
        assert_eq!(issuer.issued.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn unknown_username_is_not_found() {
        let (users, limits, issuer) = fixture();
        let use_case = ObtainTokenUseCase::new(&users, &limits, &issuer, AttemptPolicy::default());

        let result = use_case.execute(username("ghost"), wrong_code()).await;
        assert!(matches!(result, Err(ObtainTokenError::UserNotFound)));
    }

    #[tokio::test]
    async fn wrong_code_increments_counter_and_keeps_stored_code() {
        let (users, limits, issuer) = fixture();
        let code = ConfirmationCode::generate();
        users.insert_with_code("alice", &code).await;

        let use_case = ObtainTokenUseCase::new(&users, &limits, &issuer, AttemptPolicy::default());

        let result = use_case.execute(username("alice"), wrong_code()).await;
        assert!(matches!(result, Err(ObtainTokenError::InvalidCode)));
        assert_eq!(limits.get("alice").await.unwrap(), Some(1));

        // The stored code is still redeemable afterwards.
        let token = use_case.execute(username("alice"), code).await;
        assert!(token.is_ok());
        assert_eq!(limits.get("alice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn threshold_fails_fast_even_with_correct_code() {
        let (users, limits, issuer) = fixture();
        let code = ConfirmationCode::generate();
        users.insert_with_code("alice", &code).await;

        let policy = AttemptPolicy {
            max_attempts: 5,
            window: Duration::from_secs(600),
        };
        let use_case = ObtainTokenUseCase::new(&users, &limits, &issuer, policy);

        for _ in 0..5 {
            let result = use_case.execute(username("alice"), wrong_code()).await;
            assert!(matches!(result, Err(ObtainTokenError::InvalidCode)));
        }

        let result = use_case.execute(username("alice"), code).await;
        assert!(matches!(result, Err(ObtainTokenError::RateLimited)));
        assert_eq!(issuer.issued.load(Ordering::SeqCst), 0);
    }
}
