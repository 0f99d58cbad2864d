pub mod domain;
pub mod permissions;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    confirmation_code::ConfirmationCode,
    email::{Email, EmailError},
    role::Role,
    user::{User, UserError},
    username::{Username, UsernameError},
};

pub use permissions::{Actor, Authored, Policy, evaluate, evaluate_object, is_safe_method};

pub use ports::{
    repositories::{RateLimitStore, RateLimitStoreError, UserStore, UserStoreError},
    services::{EmailClient, TokenClaims, TokenIssuer, TokenIssuerError},
};
