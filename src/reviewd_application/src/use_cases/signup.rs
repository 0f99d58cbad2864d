use reviewd_core::{
    ConfirmationCode, Email, EmailClient, User, UserStore, UserStoreError, Username,
};

const CONFIRMATION_SUBJECT: &str = "Your confirmation code";

/// Error types for the signup use case
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("Username is already bound to a different email")]
    UsernameTaken,
    #[error("Email is already bound to a different username")]
    EmailTaken,
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
}

/// Signup use case - registers an account and issues a confirmation code
///
/// Re-signup with a known (username, email) pair is idempotent-safe: no
/// duplicate account is created, a fresh code simply replaces the old one.
pub struct SignupUseCase<'a, U, E>
where
    U: UserStore,
    E: EmailClient,
{
    user_store: &'a U,
    email_client: &'a E,
}

impl<'a, U, E> SignupUseCase<'a, U, E>
where
    U: UserStore,
    E: EmailClient,
{
    pub fn new(user_store: &'a U, email_client: &'a E) -> Self {
        Self {
            user_store,
            email_client,
        }
    }

    /// Execute the signup use case
    ///
    /// # Arguments
    /// * `username` - Validated account handle
    /// * `email` - Validated email address
    ///
    /// # Returns
    /// Ok(()) once a confirmation code has been stored; mail dispatch is
    /// best-effort and never fails the signup.
    #[tracing::instrument(name = "SignupUseCase::execute", skip(self))]
    pub async fn execute(&self, username: Username, email: Email) -> Result<(), SignupError> {
        let existing = self
            .user_store
            .find_by_identity(&username, &email)
            .await
            .map_err(SignupError::UserStoreError)?;

        if existing.is_none() {
            let user = User::new(username.clone(), email.clone());
            self.user_store.add_user(user).await.map_err(|e| match e {
                UserStoreError::UsernameTaken => SignupError::UsernameTaken,
                UserStoreError::EmailTaken => SignupError::EmailTaken,
                other => SignupError::UserStoreError(other),
            })?;
        }

        let code = ConfirmationCode::generate();
        self.user_store
            .store_confirmation_code(&username, code.clone())
            .await
            .map_err(SignupError::UserStoreError)?;

        let content = format!("Confirmation code: {}", code.as_str());
        if let Err(error) = self
            .email_client
            .send_email(&email, CONFIRMATION_SUBJECT, &content)
            .await
        {
            tracing::warn!(%username, %error, "Failed to send confirmation email");
        }

        Ok(())
    }
}
