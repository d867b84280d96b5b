//! HTTP gateway over a downstream user service.
//!
//! The gateway exposes a small client-facing API and forwards each call to
//! the downstream service through a resilient HTTP client: fixed transport
//! deadlines, request/response logging interceptors, status classification
//! into domain error kinds, and bounded retry with exponential backoff.

pub mod client;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use client::types::User;
pub use client::{ClientError, DownstreamClient};
pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
