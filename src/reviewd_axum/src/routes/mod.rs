//! Axum-specific route handlers.
//!
//! These routes use Axum's extractors to get data from requests, parse
//! domain entities at the edge, call the framework-agnostic use cases, and
//! convert results to Axum responses.

pub mod signup;
pub mod token;
pub mod verify;

pub use signup::signup;
pub use token::obtain_token;
pub use verify::verify;
