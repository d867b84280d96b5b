//! Request/response observation around every outbound call.
//!
//! Interceptors are side-effect only: the hooks are infallible and receive
//! read-only views, so a misbehaving observer can never change the outcome
//! of the call it watches.

use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};

/// Observer invoked around every outbound call.
pub trait Interceptor: Send + Sync {
    /// Called after the request is built, before it is sent.
    fn on_request(&self, _method: &Method, _url: &Url, _headers: &HeaderMap) {}

    /// Called with the response status before classification and decoding.
    fn on_response(&self, _status: StatusCode) {}
}

/// Logs method, target URL and every header pair of an outgoing request.
pub struct RequestLogger;

impl Interceptor for RequestLogger {
    fn on_request(&self, method: &Method, url: &Url, headers: &HeaderMap) {
        tracing::info!(method = %method, url = %url, "Request");
        for (name, value) in headers {
            tracing::info!(header = %name, value = ?value, "Request header");
        }
    }
}

/// Logs the status code of a completed response.
pub struct ResponseLogger;

impl Interceptor for ResponseLogger {
    fn on_response(&self, status: StatusCode) {
        tracing::info!(status = %status, "Response status");
    }
}

/// Ordered list of interceptors; hooks run in insertion order on both the
/// request and the response side.
pub struct InterceptorChain {
    interceptors: Vec<Box<dyn Interceptor>>,
}

impl InterceptorChain {
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// The fixed chain order: request logger before response logger.
    pub fn with_default_loggers() -> Self {
        let mut chain = Self::new();
        chain.push(Box::new(RequestLogger));
        chain.push(Box::new(ResponseLogger));
        chain
    }

    pub fn push(&mut self, interceptor: Box<dyn Interceptor>) {
        self.interceptors.push(interceptor);
    }

    pub fn notify_request(&self, request: &reqwest::Request) {
        for interceptor in &self.interceptors {
            interceptor.on_request(request.method(), request.url(), request.headers());
        }
    }

    pub fn notify_response(&self, status: StatusCode) {
        for interceptor in &self.interceptors {
            interceptor.on_response(status);
        }
    }
}

impl Default for InterceptorChain {
    fn default() -> Self {
        Self::with_default_loggers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder {
        label: &'static str,
        events: Arc<Mutex<Vec<String>>>,
    }

    impl Interceptor for Recorder {
        fn on_request(&self, method: &Method, _url: &Url, _headers: &HeaderMap) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}:request:{}", self.label, method));
        }

        fn on_response(&self, status: StatusCode) {
            self.events
                .lock()
                .unwrap()
                .push(format!("{}:response:{}", self.label, status.as_u16()));
        }
    }

    #[test]
    fn interceptors_run_in_insertion_order() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let mut chain = InterceptorChain::new();
        chain.push(Box::new(Recorder {
            label: "first",
            events: events.clone(),
        }));
        chain.push(Box::new(Recorder {
            label: "second",
            events: events.clone(),
        }));

        let request = reqwest::Client::new()
            .get("http://localhost:9000/user")
            .build()
            .unwrap();
        chain.notify_request(&request);
        chain.notify_response(StatusCode::OK);

        let events = events.lock().unwrap();
        assert_eq!(
            events.join(","),
            "first:request:GET,second:request:GET,first:response:200,second:response:200"
        );
    }
}
