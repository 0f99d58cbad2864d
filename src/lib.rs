//! # reviewd - Review Platform Auth & Access Control Library
//!
//! This is a facade crate that re-exports all public APIs from the reviewd
//! components. Use this crate to get access to the handshake and permission
//! functionality in one place.
//!
//! ## Structure
//!
//! - **Core domain types**: `Username`, `Email`, `Role`, `ConfirmationCode`, `User`
//! - **Permission evaluator**: `Policy`, `Actor`, `evaluate`
//! - **Repository traits**: `UserStore`, `RateLimitStore`
//! - **Use cases**: `SignupUseCase`, `ObtainTokenUseCase`
//! - **Adapters**: `HashMapUserStore`, `RedisRateLimitStore`, `JwtTokenIssuer`,
//!   `PostmarkEmailClient`, etc.

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types, the permission evaluator and port definitions
pub mod core {
    pub use reviewd_core::*;
}

// Re-export most commonly used core types at the root level
pub use reviewd_core::{
    Actor, Authored, ConfirmationCode, Email, Policy, Role, User, UserError, Username, evaluate,
};

// ============================================================================
// Repository Traits (Ports)
// ============================================================================

/// Repository trait definitions
pub mod repositories {
    pub use reviewd_core::{RateLimitStore, RateLimitStoreError, UserStore, UserStoreError};
}

// Re-export ports at root level
pub use reviewd_core::{
    EmailClient, RateLimitStore, RateLimitStoreError, TokenClaims, TokenIssuer, TokenIssuerError,
    UserStore, UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use reviewd_application::*;
}

// Re-export use cases at root level
pub use reviewd_application::{AttemptPolicy, ObtainTokenUseCase, SignupUseCase};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// Persistence implementations
    pub mod persistence {
        pub use reviewd_adapters::persistence::*;
    }

    /// Email client implementations
    pub mod email {
        pub use reviewd_adapters::email::*;
    }

    /// Token issuance
    pub mod tokens {
        pub use reviewd_adapters::tokens::*;
    }

    /// Configuration
    pub mod config {
        pub use reviewd_adapters::config::*;
    }
}

// Re-export commonly used adapters at root level
pub use reviewd_adapters::{
    email::{MockEmailClient, PostmarkEmailClient},
    persistence::{HashMapRateLimitStore, HashMapUserStore, RedisRateLimitStore},
    tokens::{JwtConfig, JwtTokenIssuer},
};

// ============================================================================
// Axum Bindings
// ============================================================================

/// Axum route handlers and the bearer guard
pub mod axum_bindings {
    pub use reviewd_axum::*;
}

pub use reviewd_axum::{actor_from_headers, authorize};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing repository traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};

pub use http;
