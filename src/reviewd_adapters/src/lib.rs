pub mod config;
pub mod email;
pub mod persistence;
pub mod tokens;

pub use config::Settings;
pub use email::{MockEmailClient, PostmarkEmailClient, SentEmail};
pub use persistence::{HashMapRateLimitStore, HashMapUserStore, RedisRateLimitStore};
pub use tokens::{JwtConfig, JwtTokenIssuer};
