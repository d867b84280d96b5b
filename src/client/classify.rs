//! Status classification, evaluated strictly before body decoding.

use reqwest::StatusCode;

use crate::client::error::ClientError;

/// Which status ranges an operation converts into domain error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusPolicy {
    /// No range classification; any non-success status surfaces verbatim.
    Passthrough,
    /// 5xx becomes a server error; 4xx surfaces verbatim.
    ServerOnly,
    /// 5xx becomes a server error, 4xx becomes a client error.
    ServerAndClient,
}

/// Inspect a completed response status and raise the matching domain error.
///
/// Runs before any attempt to decode the body, since an error body may not
/// match the declared record shape.
pub fn classify_status(status: StatusCode, policy: StatusPolicy) -> Result<(), ClientError> {
    if status.is_server_error() {
        return Err(match policy {
            StatusPolicy::Passthrough => ClientError::UnexpectedStatus {
                status: status.as_u16(),
            },
            StatusPolicy::ServerOnly | StatusPolicy::ServerAndClient => {
                ClientError::UpstreamServer {
                    status: status.as_u16(),
                }
            }
        });
    }
    if status.is_client_error() {
        return Err(match policy {
            StatusPolicy::ServerAndClient => ClientError::UpstreamClient {
                status: status.as_u16(),
            },
            StatusPolicy::Passthrough | StatusPolicy::ServerOnly => {
                ClientError::UnexpectedStatus {
                    status: status.as_u16(),
                }
            }
        });
    }
    Ok(())
}
