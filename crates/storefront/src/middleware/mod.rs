//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! Identity is resolved per handler through the extractors in [`auth`].

pub mod auth;
pub mod request_id;

pub use auth::{Identity, RequireAdmin, RequireProfile};
pub use request_id::request_id_middleware;
