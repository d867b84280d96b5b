//! Shared helpers for integration tests: a scripted downstream service and
//! canned gateway configuration.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use user_gateway::{GatewayConfig, User};

/// Start a scripted downstream service on an ephemeral port.
///
/// The handler sees the request method and path and returns the status code
/// and JSON body to answer with. Handlers may sleep to simulate a slow
/// downstream.
pub async fn start_downstream<F, Fut>(handler: F) -> SocketAddr
where
    F: Fn(String, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let handler = handler.clone();
            tokio::spawn(async move {
                let Some((method, path)) = read_request_head(&mut socket).await else {
                    return;
                };
                let (status, body) = handler(method, path).await;
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason_phrase(status),
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

/// Read one full request (head plus any Content-Length body) and return its
/// method and path. Draining the body before responding keeps clients from
/// seeing a reset mid-write.
async fn read_request_head(socket: &mut tokio::net::TcpStream) -> Option<(String, String)> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];

    loop {
        let n = socket.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(header_end) = find_subslice(&buf, b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
            let content_length = head
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    if name.eq_ignore_ascii_case("content-length") {
                        value.trim().parse::<usize>().ok()
                    } else {
                        None
                    }
                })
                .unwrap_or(0);

            if buf.len() >= header_end + 4 + content_length {
                let mut parts = head.split_whitespace();
                let method = parts.next()?.to_string();
                let path = parts.next()?.to_string();
                return Some((method, path));
            }
        }
    }
    None
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "OK",
    }
}

/// Gateway configuration pointed at the scripted downstream, with retry
/// delays shortened so exhaustion scenarios stay fast.
#[allow(dead_code)]
pub fn gateway_config(addr: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.downstream.base_url = format!("http://{}", addr);
    config.retries.list_base_delay_ms = 10;
    config.retries.error_base_delay_ms = 10;
    config.retries.max_delay_ms = 100;
    config
}

/// The record exchanged with the downstream service in tests.
#[allow(dead_code)]
pub fn alice(id: Option<i64>) -> User {
    User {
        id,
        name: "Alice".to_string(),
        age: 30,
        salary: 50000.0,
        department: "Eng".to_string(),
    }
}
