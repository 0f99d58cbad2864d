use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::post,
};
use reviewd_application::AttemptPolicy;
use reviewd_axum::routes::{obtain_token, signup, verify};
use reviewd_core::{EmailClient, RateLimitStore, TokenIssuer, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::request_tracing::{make_span_with_request_id, on_request, on_response};

/// The auth surface of the review platform, assembled as an Axum router.
pub struct ReviewdService {
    router: Router,
}

impl ReviewdService {
    /// Wire the handshake routes to their collaborators.
    ///
    /// # Note on Architecture
    /// Stores implement Clone via internal Arc<RwLock> for thread-safe
    /// sharing. Each route is given only the state it needs.
    pub fn new<U, R, E, T>(
        user_store: U,
        rate_limit_store: R,
        email_client: E,
        token_issuer: T,
        attempt_policy: AttemptPolicy,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        R: RateLimitStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
        T: TokenIssuer + Clone + 'static,
    {
        let router = Router::new()
            // Signup needs the user store and the mail client
            .route("/auth/signup", post(signup::<U, E>))
            .with_state((user_store.clone(), email_client))
            // Token exchange needs the user store, the failure counters and
            // the issuer
            .route("/auth/token", post(obtain_token::<U, R, T>))
            .with_state((
                user_store,
                rate_limit_store,
                token_issuer.clone(),
                attempt_policy,
            ))
            // Verification only needs the issuer
            .route("/auth/verify", post(verify::<T>))
            .with_state(token_issuer);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert into a router that can be mounted on another application.
    pub fn as_nested_router(mut self, allowed_origins: Option<Vec<HeaderValue>>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_origin(AllowOrigin::list(allowed_origins));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the auth service as a standalone server.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<Vec<HeaderValue>>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("reviewd listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
