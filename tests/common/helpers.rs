//! Shared helpers for the integration tests.
//!
//! Tests run against a small local fixture server built on a raw
//! `TcpListener`, so they are deterministic and need no network access. The
//! server understands just enough HTTP/1.1 to satisfy reqwest, including
//! connection reuse.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;

use fetchpool::{PoolBuilder, TransferRequest};
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

pub const HELLO_BODY: &[u8] = b"hello";
pub const SLOW_BODY: &[u8] = b"0123456789abcdef";

static TRACING: Once = Once::new();

/// Installs the test tracing subscriber once per binary. Honors `RUST_LOG`,
/// so failing tests can be rerun with the pool's traces visible.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Creates a temporary directory for testing purposes.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Builds a request against the fixture server.
pub fn fixture_request(addr: SocketAddr, route: &str, output: impl Into<PathBuf>) -> TransferRequest {
    TransferRequest::try_from(format!("http://{addr}{route}").as_str())
        .expect("Failed to build fixture request")
        .with_output_path(output)
}

/// A pool builder with progress bars hidden, as every test wants.
pub fn test_pool_builder(capacity: usize) -> PoolBuilder {
    init_tracing();
    PoolBuilder::hidden().capacity(capacity)
}

/// Asserts that a file exists at the given path.
pub fn assert_file_exists(path: &Path) {
    assert!(path.exists(), "File should exist at path: {:?}", path);
}

/// Asserts that a file holds exactly the expected bytes.
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = std::fs::read(path).expect("Failed to read file");
    assert_eq!(content, expected, "File content mismatch at {:?}", path);
}

/// Spawns the local fixture server and returns its address.
///
/// Routes:
/// - `/hello`: 200 with body `hello`
/// - `/missing`: 404 with a small body
/// - `/slow`: 200, body delivered in pieces with pauses in between
/// - `/empty`: 200 with an empty body
pub async fn spawn_fixture_server() -> SocketAddr {
    init_tracing();
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fixture server");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(serve_connection(stream));
        }
    });

    addr
}

/// Returns an address nothing listens on, for connection-refused scenarios.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind throwaway listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    addr
}

async fn serve_connection(mut stream: TcpStream) {
    // reqwest reuses connections, so keep answering until the peer hangs up.
    while let Some(path) = read_request(&mut stream).await {
        let served = match path.as_str() {
            "/hello" => write_response(&mut stream, "200 OK", HELLO_BODY).await,
            "/empty" => write_response(&mut stream, "200 OK", b"").await,
            "/slow" => write_slow_response(&mut stream).await,
            _ => write_response(&mut stream, "404 Not Found", b"no such fixture").await,
        };
        if served.is_err() {
            break;
        }
    }
}

async fn read_request(stream: &mut TcpStream) -> Option<String> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
        if buf.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    let request = String::from_utf8_lossy(&buf);
    request.split_whitespace().nth(1).map(String::from)
}

async fn write_response(
    stream: &mut TcpStream,
    status: &str,
    body: &[u8],
) -> std::io::Result<()> {
    let head = format!(
        "HTTP/1.1 {status}\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\n\r\n",
        body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.write_all(body).await?;
    stream.flush().await
}

/// Sends the headers immediately, then the body in two halves with pauses,
/// leaving a window for cancellation and for concurrency assertions.
async fn write_slow_response(stream: &mut TcpStream) -> std::io::Result<()> {
    let head = format!(
        "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nContent-Type: application/octet-stream\r\n\r\n",
        SLOW_BODY.len()
    );
    stream.write_all(head.as_bytes()).await?;
    stream.flush().await?;

    let half = SLOW_BODY.len() / 2;
    tokio::time::sleep(Duration::from_millis(200)).await;
    stream.write_all(&SLOW_BODY[..half]).await?;
    stream.flush().await?;
    tokio::time::sleep(Duration::from_millis(200)).await;
    stream.write_all(&SLOW_BODY[half..]).await?;
    stream.flush().await
}
