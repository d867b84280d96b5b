//! Client-facing HTTP surface.
//!
//! # Data Flow
//! ```text
//! caller request
//!     → server.rs (router, middleware, handlers)
//!     → DownstreamClient operation
//!     → response.rs (success body | ClientError → status + ErrorResponse)
//! ```

pub mod response;
pub mod server;

pub use response::{ApiError, ErrorResponse};
pub use server::{AppState, HttpServer};
