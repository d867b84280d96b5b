//! Outbound transport construction.
//!
//! The transport enforces the fixed call deadlines: connect, end-to-end
//! response, and read idle. reqwest exposes no separate write-idle knob, so
//! slow writes are bounded by the end-to-end response timeout.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};

use crate::client::error::ClientError;
use crate::config::DownstreamConfig;

/// Build the shared HTTP transport with the configured deadlines and a basic
/// idle-per-host pool cap.
///
/// Deadline violations surface as [`ClientError::Timeout`], a different path
/// from classified application errors.
pub fn build_transport(config: &DownstreamConfig) -> Result<reqwest::Client, ClientError> {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_millis(config.timeouts.connect_ms))
        .timeout(Duration::from_millis(config.timeouts.response_ms))
        .read_timeout(Duration::from_millis(config.timeouts.read_idle_ms))
        .pool_max_idle_per_host(config.max_idle_per_host)
        .build()
        .map_err(ClientError::from)
}

/// Header set sent on every outbound call.
///
/// Applied per request rather than via builder defaults so interceptors
/// observe the exact header pairs that go on the wire.
pub fn default_headers(config: &DownstreamConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if let Ok(agent) = HeaderValue::from_str(&config.user_agent) {
        headers.insert(USER_AGENT, agent);
    }
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_builds_with_default_config() {
        assert!(build_transport(&DownstreamConfig::default()).is_ok());
    }

    #[test]
    fn default_header_set_identifies_the_client() {
        let config = DownstreamConfig::default();
        let headers = default_headers(&config);

        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert_eq!(headers.get(USER_AGENT).unwrap(), config.user_agent.as_str());
    }
}
