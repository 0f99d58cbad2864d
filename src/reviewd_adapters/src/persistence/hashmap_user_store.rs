use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use reviewd_core::{ConfirmationCode, Email, User, UserStore, UserStoreError, Username};

#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Username, User>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: User) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        // Username conflicts are reported before email conflicts.
        if users.contains_key(user.username()) {
            return Err(UserStoreError::UsernameTaken);
        }
        if users.values().any(|u| u.email() == user.email()) {
            return Err(UserStoreError::EmailTaken);
        }
        users.insert(user.username().clone(), user);
        Ok(())
    }

    async fn get_user(&self, username: &Username) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        users
            .get(username)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_identity(
        &self,
        username: &Username,
        email: &Email,
    ) -> Result<Option<User>, UserStoreError> {
        let users = self.users.read().await;
        Ok(users
            .get(username)
            .filter(|user| user.email() == email)
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
