//! Domain errors produced by the downstream client.

use thiserror::Error;

/// Failure of a downstream call, classified for the retry policy.
///
/// Classified variants carry the numeric status so logs and callers can see
/// what the downstream actually returned; only [`ClientError::UpstreamServer`]
/// is ever retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Downstream answered with a 5xx status on an operation that
    /// classifies server errors.
    #[error("downstream responded with server error status {status}")]
    UpstreamServer { status: u16 },

    /// Downstream answered with a 4xx status on an operation that
    /// classifies client errors.
    #[error("downstream responded with client error status {status}")]
    UpstreamClient { status: u16 },

    /// The retry budget was consumed without a successful attempt. Replaces
    /// the last server error once the policy gives up.
    #[error("External Service failed to process after max retries")]
    RetryExhausted,

    /// A connect, read or end-to-end deadline elapsed. Surfaces straight
    /// from the transport, never through the classifier.
    #[error("downstream request timed out")]
    Timeout(#[source] reqwest::Error),

    /// The response body did not match the expected record shape.
    #[error("failed to decode downstream response")]
    Decode(#[source] reqwest::Error),

    /// Non-success status outside the ranges the operation classifies. The
    /// HTTP layer passes the status through verbatim.
    #[error("downstream responded with unexpected status {status}")]
    UnexpectedStatus { status: u16 },

    /// The configured downstream base URL could not be parsed.
    #[error("invalid downstream base url")]
    BaseUrl(#[from] url::ParseError),

    /// Any other transport-level failure.
    #[error("downstream request failed")]
    Transport(#[source] reqwest::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err)
        } else if err.is_decode() {
            Self::Decode(err)
        } else {
            Self::Transport(err)
        }
    }
}
