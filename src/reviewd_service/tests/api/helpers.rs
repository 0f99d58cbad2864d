use std::time::Duration;

use reviewd_adapters::{
    HashMapRateLimitStore, HashMapUserStore, JwtConfig, JwtTokenIssuer, MockEmailClient,
};
use reviewd_application::AttemptPolicy;
use reviewd_service::ReviewdService;
use secrecy::Secret;

pub struct TestApp {
    pub address: String,
    pub http_client: reqwest::Client,
    pub email_client: MockEmailClient,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_policy(AttemptPolicy::default()).await
    }

    pub async fn spawn_with_policy(policy: AttemptPolicy) -> Self {
        let user_store = HashMapUserStore::new();
        let rate_limit_store = HashMapRateLimitStore::new();
        let email_client = MockEmailClient::new();
        let token_issuer = JwtTokenIssuer::new(JwtConfig::new(
            Secret::new("api-test-secret".to_string()),
            3600,
        ));

        let service = ReviewdService::new(
            user_store,
            rate_limit_store,
            email_client.clone(),
            token_issuer,
            policy,
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let address = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(service.run_standalone(listener, None));

        Self {
            address,
            http_client: reqwest::Client::new(),
            email_client,
        }
    }

    pub async fn post_signup(&self, body: &serde_json::Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/auth/signup", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute signup request")
    }

    pub async fn post_token(&self, body: &serde_json::Value) -> reqwest::Response {
        self.http_client
            .post(format!("{}/auth/token", self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute token request")
    }

    pub async fn post_verify(&self, bearer: Option<&str>) -> reqwest::Response {
        let mut request = self
            .http_client
            .post(format!("{}/auth/verify", self.address));
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        request
            .send()
            .await
            .expect("Failed to execute verify request")
    }

    /// The code from the most recent confirmation mail.
    pub async fn last_issued_code(&self) -> String {
        let sent = self.email_client.sent().await;
        let last = sent.last().expect("No confirmation mail was sent");
        last.content
            .rsplit(' ')
            .next()
            .expect("Mail content is empty")
            .to_string()
    }
}

pub fn short_window_policy(max_attempts: u32) -> AttemptPolicy {
    AttemptPolicy {
        max_attempts,
        window: Duration::from_secs(600),
    }
}
