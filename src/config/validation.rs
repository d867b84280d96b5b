//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Validation is a pure
//! function over the config and returns every violation found, not just the
//! first.

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic violation found in a configuration.
#[derive(Debug)]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Validate a configuration before it is accepted into the system.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError {
            field: "listener.bind_address",
            reason: format!(
                "not a valid socket address: {}",
                config.listener.bind_address
            ),
        });
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "listener.request_timeout_secs",
            reason: "must be greater than zero".to_string(),
        });
    }

    match Url::parse(&config.downstream.base_url) {
        Err(e) => errors.push(ValidationError {
            field: "downstream.base_url",
            reason: format!("not a valid url: {e}"),
        }),
        Ok(url) if url.scheme() != "http" && url.scheme() != "https" => {
            errors.push(ValidationError {
                field: "downstream.base_url",
                reason: format!("unsupported scheme: {}", url.scheme()),
            });
        }
        Ok(_) => {}
    }
    if config.downstream.user_agent.is_empty() {
        errors.push(ValidationError {
            field: "downstream.user_agent",
            reason: "must not be empty".to_string(),
        });
    }

    let timeouts = &config.downstream.timeouts;
    for (field, value) in [
        ("downstream.timeouts.connect_ms", timeouts.connect_ms),
        ("downstream.timeouts.response_ms", timeouts.response_ms),
        ("downstream.timeouts.read_idle_ms", timeouts.read_idle_ms),
        (
            "retries.list_base_delay_ms",
            config.retries.list_base_delay_ms,
        ),
        (
            "retries.error_base_delay_ms",
            config.retries.error_base_delay_ms,
        ),
        ("retries.max_delay_ms", config.retries.max_delay_ms),
    ] {
        if value == 0 {
            errors.push(ValidationError {
                field,
                reason: "must be greater than zero".to_string(),
            });
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError {
            field: "observability.metrics_address",
            reason: format!(
                "not a valid socket address: {}",
                config.observability.metrics_address
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
