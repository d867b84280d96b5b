//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so a minimal (or empty) config is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, request deadline).
    pub listener: ListenerConfig,

    /// Downstream user-service endpoint and transport deadlines.
    pub downstream: DownstreamConfig,

    /// Retry configuration for the downstream client.
    pub retries: RetryConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Deadline for one client-facing request, in seconds. Must leave room
    /// for a full downstream retry sequence.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 120,
        }
    }
}

/// Downstream user-service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Base URL of the downstream service.
    pub base_url: String,

    /// User-Agent header identifying this client on every call.
    pub user_agent: String,

    /// Transport deadlines.
    pub timeouts: DownstreamTimeouts,

    /// Maximum idle connections kept per downstream host.
    pub max_idle_per_host: usize,
}

impl Default for DownstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000".to_string(),
            user_agent: "user-gateway/0.1".to_string(),
            timeouts: DownstreamTimeouts::default(),
            max_idle_per_host: 8,
        }
    }
}

/// Deadlines enforced by the outbound transport.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DownstreamTimeouts {
    /// Connection establishment timeout in milliseconds.
    pub connect_ms: u64,

    /// End-to-end response timeout in milliseconds. Also bounds slow
    /// writes, which have no dedicated knob.
    pub response_ms: u64,

    /// Read idle timeout in milliseconds.
    pub read_idle_ms: u64,
}

impl Default for DownstreamTimeouts {
    fn default() -> Self {
        Self {
            connect_ms: 5000,
            response_ms: 5000,
            read_idle_ms: 5000,
        }
    }
}

/// Retry configuration for the downstream client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Maximum retries after the first failure (total attempts = 1 + this).
    pub max_retries: u32,

    /// Base backoff delay for the list operation, in milliseconds.
    pub list_base_delay_ms: u64,

    /// Base backoff delay for the trigger-error operation, in milliseconds.
    pub error_base_delay_ms: u64,

    /// Cap on any single backoff delay, in milliseconds.
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            list_base_delay_ms: 5000,
            error_base_delay_ms: 2000,
            max_delay_ms: 60_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_downstream_contract() {
        let config = GatewayConfig::default();
        assert_eq!(config.downstream.base_url, "http://localhost:9000");
        assert_eq!(config.downstream.timeouts.connect_ms, 5000);
        assert_eq!(config.downstream.timeouts.response_ms, 5000);
        assert_eq!(config.downstream.timeouts.read_idle_ms, 5000);
        assert_eq!(config.retries.max_retries, 3);
        assert_eq!(config.retries.list_base_delay_ms, 5000);
        assert_eq!(config.retries.error_base_delay_ms, 2000);
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config: GatewayConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.downstream.user_agent, "user-gateway/0.1");
    }

    #[test]
    fn partial_toml_overrides_single_fields() {
        let config: GatewayConfig =
            toml::from_str("[downstream]\nbase_url = \"http://10.0.0.1:9000\"\n").unwrap();
        assert_eq!(config.downstream.base_url, "http://10.0.0.1:9000");
        assert_eq!(config.downstream.timeouts.response_ms, 5000);
    }
}
