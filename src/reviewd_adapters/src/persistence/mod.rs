pub mod hashmap_rate_limit_store;
pub mod hashmap_user_store;
pub mod redis_rate_limit_store;

pub use hashmap_rate_limit_store::HashMapRateLimitStore;
pub use hashmap_user_store::HashMapUserStore;
pub use redis_rate_limit_store::RedisRateLimitStore;
