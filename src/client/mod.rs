//! Resilient client for the downstream user service.
//!
//! # Data Flow
//! ```text
//! operation (create / list / trigger-error)
//!     → retry wrapper (list and trigger-error only)
//!         → interceptors observe the outgoing request
//!         → transport executes it under fixed deadlines
//!         → interceptors observe the response status
//!         → classifier maps the status to a domain error kind
//!         → body decodes into the record shape
//! ```
//!
//! # Design Decisions
//! - Classification runs strictly before body decoding
//! - Only classified server errors re-enter the retry loop
//! - One transport and connection pool is shared by all operations;
//!   backoff sleeps suspend a single call, never the pool

pub mod classify;
pub mod error;
pub mod interceptor;
pub mod retry;
pub mod transport;
pub mod types;

pub use error::ClientError;

use reqwest::header::HeaderMap;
use reqwest::{Method, Url};

use crate::config::GatewayConfig;

use classify::StatusPolicy;
use interceptor::InterceptorChain;
use retry::{with_retry, RetryPolicy};
use types::User;

/// Client for the downstream user service, composing the transport,
/// interceptor chain, status classifier and retry policies.
pub struct DownstreamClient {
    http: reqwest::Client,
    base_url: Url,
    default_headers: HeaderMap,
    interceptors: InterceptorChain,
    list_retry: RetryPolicy,
    error_retry: RetryPolicy,
}

impl DownstreamClient {
    /// Build a client from the gateway configuration. Constructed once at
    /// startup and shared by reference; operations take `&self`.
    pub fn new(config: &GatewayConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.downstream.base_url)?;
        let http = transport::build_transport(&config.downstream)?;
        let default_headers = transport::default_headers(&config.downstream);

        Ok(Self {
            http,
            base_url,
            default_headers,
            interceptors: InterceptorChain::with_default_loggers(),
            list_retry: RetryPolicy::new(
                config.retries.max_retries,
                config.retries.list_base_delay_ms,
                config.retries.max_delay_ms,
            ),
            error_retry: RetryPolicy::new(
                config.retries.max_retries,
                config.retries.error_base_delay_ms,
                config.retries.max_delay_ms,
            ),
        })
    }

    /// POST the record to `/user` and decode the created record back.
    ///
    /// Never retried; a non-success status propagates immediately with the
    /// raw status attached.
    pub async fn create_user(&self, user: &User) -> Result<User, ClientError> {
        let response = self
            .execute(Method::POST, "/user", Some(user), StatusPolicy::Passthrough)
            .await?;
        Ok(response.json::<User>().await?)
    }

    /// GET `/user` and decode the record sequence. 5xx responses are
    /// classified as server errors and retried with the list backoff.
    pub async fn list_users(&self) -> Result<Vec<User>, ClientError> {
        with_retry(&self.list_retry, "list_users", || async {
            let response = self
                .execute(Method::GET, "/user", None, StatusPolicy::ServerOnly)
                .await?;
            Ok(response.json::<Vec<User>>().await?)
        })
        .await
    }

    /// GET `/error`, an endpoint designed to fail. Both 4xx and 5xx are
    /// classified; only the 5xx classification is retried, with the shorter
    /// error backoff.
    pub async fn trigger_error(&self) -> Result<User, ClientError> {
        with_retry(&self.error_retry, "trigger_error", || async {
            let response = self
                .execute(Method::GET, "/error", None, StatusPolicy::ServerAndClient)
                .await?;
            Ok(response.json::<User>().await?)
        })
        .await
    }

    /// One attempt: build the request with the fixed header set, run the
    /// interceptor chain around the transport call, then classify the
    /// status before handing the body back for decoding.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<&User>,
        policy: StatusPolicy,
    ) -> Result<reqwest::Response, ClientError> {
        let url = self.base_url.join(path)?;

        let mut builder = self
            .http
            .request(method, url)
            .headers(self.default_headers.clone());
        if let Some(payload) = body {
            builder = builder.json(payload);
        }
        let request = builder.build()?;

        self.interceptors.notify_request(&request);
        let response = self.http.execute(request).await?;
        self.interceptors.notify_response(response.status());

        classify::classify_status(response.status(), policy)?;
        Ok(response)
    }
}
