//! Shared utilities for gateway integration tests.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use agrivision_gateway::config::GatewayConfig;
use agrivision_gateway::http::HttpServer;
use agrivision_gateway::lifecycle::Shutdown;

/// Start a programmable mock inference upstream on an ephemeral port.
///
/// The full inbound request (headers + body) is read before answering so
/// multipart uploads are never cut off mid-write. The closure decides the
/// status and JSON body per request.
pub async fn start_mock_upstream<F, Fut>(f: F) -> SocketAddr
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        read_request(&mut socket).await;
                        let (status, body) = f().await;
                        let status_text = match status {
                            200 => "200 OK",
                            400 => "400 Bad Request",
                            404 => "404 Not Found",
                            429 => "429 Too Many Requests",
                            500 => "500 Internal Server Error",
                            502 => "502 Bad Gateway",
                            503 => "503 Service Unavailable",
                            _ => "200 OK",
                        };

                        let response_str = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status_text,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start an upstream that accepts connections, counts them, and never
/// answers. Used to exercise per-attempt deadlines.
#[allow(dead_code)]
pub async fn start_black_hole_upstream(connections: Arc<AtomicU32>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    connections.fetch_add(1, Ordering::SeqCst);
                    tokio::spawn(async move {
                        // Keep draining so the client can finish its upload,
                        // but never respond.
                        let mut tmp = [0u8; 4096];
                        loop {
                            match socket.read(&mut tmp).await {
                                Ok(0) | Err(_) => break,
                                Ok(_) => {}
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Drain one HTTP request: headers, then `Content-Length` bytes of body.
async fn read_request(socket: &mut TcpStream) {
    let mut buf = Vec::new();
    let mut tmp = [0u8; 4096];

    let header_end = loop {
        match socket.read(&mut tmp).await {
            Ok(0) | Err(_) => return,
            Ok(n) => {
                buf.extend_from_slice(&tmp[..n]);
                if let Some(pos) = find_subsequence(&buf, b"\r\n\r\n") {
                    break pos + 4;
                }
                if buf.len() > 1024 * 1024 {
                    return;
                }
            }
        }
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_lowercase();
    let content_length = headers
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|value| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut remaining = content_length.saturating_sub(buf.len() - header_end);
    while remaining > 0 {
        match socket.read(&mut tmp).await {
            Ok(0) | Err(_) => return,
            Ok(n) => remaining = remaining.saturating_sub(n),
        }
    }
}

fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Spin up a gateway on an ephemeral port.
///
/// The returned `Shutdown` must stay alive for the duration of the test;
/// dropping it closes the channel and drains the server.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config);

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    // Wait for the server to start accepting.
    tokio::time::sleep(Duration::from_millis(100)).await;

    (addr, shutdown)
}

/// Build a multipart form carrying one image-ish payload.
pub fn image_form(payload: &'static [u8]) -> reqwest::multipart::Form {
    let part = reqwest::multipart::Part::bytes(payload)
        .file_name("leaf.jpg")
        .mime_str("image/jpeg")
        .unwrap();
    reqwest::multipart::Form::new().part("file", part)
}
