use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use reviewd_core::{RateLimitStore, RateLimitStoreError};

/// In-process failure counters with expiry.
///
/// Entries past their deadline are treated as absent and dropped lazily on
/// the next read.
#[derive(Default, Clone)]
pub struct HashMapRateLimitStore {
    counters: Arc<RwLock<HashMap<String, (u32, Instant)>>>,
}

impl HashMapRateLimitStore {
    pub fn new() -> Self {
        Self {
            counters: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl RateLimitStore for HashMapRateLimitStore {
    async fn get(&self, key: &str) -> Result<Option<u32>, RateLimitStoreError> {
        let mut counters = self.counters.write().await;
        match counters.get(key) {
            Some((count, deadline)) if *deadline > Instant::now() => Ok(Some(*count)),
            Some(_) => {
                counters.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, count: u32, ttl: Duration) -> Result<(), RateLimitStoreError> {
        let mut counters = self.counters.write().await;
        counters.insert(key.to_string(), (count, Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RateLimitStoreError> {
        let mut counters = self.counters.write().await;
        counters.remove(key);
        Ok(())
    }
}
