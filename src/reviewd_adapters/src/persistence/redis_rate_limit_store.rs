use std::sync::Arc;
use std::time::Duration;

use redis::{Commands, Connection};
use reviewd_core::{RateLimitStore, RateLimitStoreError};
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct RedisRateLimitStore {
    conn: Arc<RwLock<Connection>>,
}

impl RedisRateLimitStore {
    pub fn new(conn: Arc<RwLock<Connection>>) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl RateLimitStore for RedisRateLimitStore {
    async fn get(&self, key: &str) -> Result<Option<u32>, RateLimitStoreError> {
        let key = get_key(key);
        let mut conn = self.conn.write().await;
        conn.get(&key)
            .map_err(|e| RateLimitStoreError::StoreError(e.to_string()))
    }

    async fn set(&self, key: &str, count: u32, ttl: Duration) -> Result<(), RateLimitStoreError> {
        let key = get_key(key);
        let mut conn = self.conn.write().await;
        conn.set_ex(key, count, ttl.as_secs().max(1))
            .map_err(|e| RateLimitStoreError::StoreError(e.to_string()))
    }

    async fn delete(&self, key: &str) -> Result<(), RateLimitStoreError> {
        let key = get_key(key);
        let mut conn = self.conn.write().await;
        conn.del(&key)
            .map_err(|e| RateLimitStoreError::StoreError(e.to_string()))
    }
}

// We are using a key prefix to prevent collisions and organize data!
const SIGNIN_ATTEMPT_KEY_PREFIX: &str = "signin_attempts:";

fn get_key(username: &str) -> String {
    format!("{}{}", SIGNIN_ATTEMPT_KEY_PREFIX, username)
}
