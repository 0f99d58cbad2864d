//! Axum integration for the reviewd access-control library.
//!
//! Route handlers for the auth handshake surface plus the bearer guard that
//! feeds the permission evaluator. Handlers are generic over the port traits
//! defined in `reviewd_core`; state is supplied per route at assembly time.

pub mod auth;
pub mod routes;

// Re-export for convenience
pub use auth::{PermissionRejection, actor_from_headers, authorize, bearer_token};
