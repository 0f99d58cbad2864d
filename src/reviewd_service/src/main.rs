use std::sync::Arc;
use std::time::Duration;

use redis::Client;
use reqwest::Client as HttpClient;
use reviewd_adapters::{
    HashMapUserStore, JwtConfig, JwtTokenIssuer, PostmarkEmailClient, RedisRateLimitStore,
    config::Settings,
};
use reviewd_application::AttemptPolicy;
use reviewd_core::Email;
use reviewd_service::{ReviewdService, init_tracing};
use tokio::sync::RwLock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");
    dotenvy::dotenv().ok();

    // Load configuration
    let settings = Settings::load()?;

    // Setup Redis connection for the failure counters
    let redis_client = Client::open(format!("redis://{}/", settings.redis.host_name))?;
    let redis_conn = Arc::new(RwLock::new(redis_client.get_connection()?));

    // Create stores
    let user_store = HashMapUserStore::new();
    let rate_limit_store = RedisRateLimitStore::new(redis_conn);

    // Create email client
    let http_client = HttpClient::builder()
        .timeout(Duration::from_millis(settings.email_client.timeout_in_millis))
        .build()?;

    let email_client = PostmarkEmailClient::new(
        settings.email_client.base_url.clone(),
        Email::try_from(settings.email_client.sender.clone())?,
        settings.email_client.auth_token.clone(),
        http_client,
    );

    // Create token issuer
    let token_issuer = JwtTokenIssuer::new(JwtConfig::new(
        settings.auth.jwt_secret.clone(),
        settings.auth.token_ttl_in_seconds,
    ));

    let attempt_policy = AttemptPolicy {
        max_attempts: settings.auth.max_token_attempts,
        window: Duration::from_secs(settings.auth.attempt_window_in_seconds),
    };

    let service = ReviewdService::new(
        user_store,
        rate_limit_store,
        email_client,
        token_issuer,
        attempt_policy,
    );

    let listener = tokio::net::TcpListener::bind(&settings.app.address).await?;
    tracing::info!("Starting reviewd auth service...");

    service.run_standalone(listener, None).await?;

    Ok(())
}
