//! Session HTTP client setup and middleware configuration.
//!
//! Builds the per-session `reqwest` client with tracing middleware. The
//! reuse policy mirrors what a long-lived transfer handle needs: at most one
//! pooled connection, TCP keep-alive probes to hold that connection open
//! between transfers, and a generous idle timeout so the connection (and the
//! DNS resolution behind it) survives quiet periods.

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use std::time::Duration;

/// Configuration for a session's HTTP client.
#[derive(Debug, Clone)]
pub struct SessionClientConfig {
    /// TCP keep-alive idle time before the first probe.
    pub keepalive_idle: Duration,
    /// Interval between TCP keep-alive probes.
    pub keepalive_interval: Duration,
    /// How long an idle connection is kept for reuse.
    pub idle_timeout: Duration,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
}

impl Default for SessionClientConfig {
    fn default() -> Self {
        Self {
            keepalive_idle: Duration::from_secs(30),
            keepalive_interval: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(300),
            proxy: None,
            headers: None,
        }
    }
}

/// Creates one session's HTTP client.
///
/// The client holds at most one idle connection per host
/// (`pool_max_idle_per_host(1)`): a session drives a single transfer at a
/// time, so a second connection could never be used. Requests are traced via
/// [`TracingMiddleware`]; see the tracing crate to make use of these traces.
pub fn create_session_client(
    config: &SessionClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut inner_client_builder = reqwest::Client::builder()
        .pool_max_idle_per_host(1)
        .pool_idle_timeout(Some(config.idle_timeout))
        .tcp_keepalive(Some(config.keepalive_idle))
        .tcp_keepalive_interval(Some(config.keepalive_interval));

    if let Some(proxy) = config.proxy.clone() {
        inner_client_builder = inner_client_builder.proxy(proxy);
    }

    if let Some(headers) = config.headers.clone() {
        inner_client_builder = inner_client_builder.default_headers(headers);
    }

    let inner_client = inner_client_builder.build()?;

    let client = ClientBuilder::new(inner_client)
        .with(TracingMiddleware::default())
        .build();

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

    #[test]
    fn test_default_config() {
        let config = SessionClientConfig::default();
        assert_eq!(config.keepalive_idle, Duration::from_secs(30));
        assert_eq!(config.keepalive_interval, Duration::from_secs(5));
        assert_eq!(config.idle_timeout, Duration::from_secs(300));
        assert!(config.proxy.is_none());
        assert!(config.headers.is_none());
    }

    #[test]
    fn test_create_session_client_default() {
        let client = create_session_client(&SessionClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_create_session_client_with_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("test-agent"));

        let config = SessionClientConfig {
            headers: Some(headers),
            ..SessionClientConfig::default()
        };

        let client = create_session_client(&config);
        assert!(client.is_ok());
    }
}
