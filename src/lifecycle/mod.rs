//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Init logging/metrics → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     SIGTERM/SIGINT → broadcast → server drains in-flight requests → Exit
//! ```

pub mod shutdown;

pub use shutdown::{wait_for_signal, Shutdown};
