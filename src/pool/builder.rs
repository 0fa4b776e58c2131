//! Builder pattern implementation for creating [`Pool`] instances.
//!
//! # Examples
//!
//! ## Basic builder usage
//!
//! ```rust,no_run
//! use fetchpool::pool::PoolBuilder;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fetchpool::Error> {
//! let pool = PoolBuilder::new().capacity(8).build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom session reuse policy
//!
//! ```rust,no_run
//! use fetchpool::pool::PoolBuilder;
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fetchpool::Error> {
//! let pool = PoolBuilder::new()
//!     .capacity(2)
//!     .keepalive_idle(Duration::from_secs(60))
//!     .keepalive_interval(Duration::from_secs(10))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Hidden progress bars
//!
//! ```rust,no_run
//! use fetchpool::pool::PoolBuilder;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fetchpool::Error> {
//! let pool = PoolBuilder::hidden().build()?;
//! # Ok(())
//! # }
//! ```

use super::{config::PoolConfig, pool::Pool};
use crate::error::Result;
use crate::progress::{ProgressBarOpts, StyleOptions};

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use reqwest::Proxy;
use std::time::Duration;

/// A builder used to create a [`Pool`].
///
/// ```rust,no_run
/// use fetchpool::pool::PoolBuilder;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), fetchpool::Error> {
/// let pool = PoolBuilder::new().capacity(4).build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct PoolBuilder {
    config: PoolConfig,
}

impl PoolBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        PoolBuilder::default()
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden() -> Self {
        let mut builder = PoolBuilder::default();
        builder.config.style_options =
            StyleOptions::new(ProgressBarOpts::hidden(), ProgressBarOpts::hidden());
        builder
    }

    /// Set the number of sessions, i.e. the maximum concurrent transfers.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Set the TCP keep-alive idle time for every session's connection.
    pub fn keepalive_idle(mut self, idle: Duration) -> Self {
        self.config.client.keepalive_idle = idle;
        self
    }

    /// Set the interval between TCP keep-alive probes.
    pub fn keepalive_interval(mut self, interval: Duration) -> Self {
        self.config.client.keepalive_interval = interval;
        self
    }

    /// Set how long an idle connection is kept alive for reuse.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.client.idle_timeout = timeout;
        self
    }

    /// Route every session through the given proxy.
    pub fn proxy(mut self, proxy: Proxy) -> Self {
        self.config.client.proxy = Some(proxy);
        self
    }

    /// Set the pool style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Helper method to get or create a new HeaderMap.
    fn new_header(&self) -> HeaderMap {
        match self.config.client.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// You need to pass in a `HeaderMap`, not a `HeaderName`.
    /// `HeaderMap` is a set of http headers.
    ///
    /// You can call `.headers()` multiple times and all `HeaderMap` will be
    /// merged into a single one.
    ///
    /// # Example
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue, HeaderMap};
    /// use fetchpool::pool::PoolBuilder;
    ///
    /// let ua = HeaderValue::from_str("curl/7.87").expect("Invalid UA");
    ///
    /// let builder = PoolBuilder::new()
    ///     .headers(HeaderMap::from_iter([(header::USER_AGENT, ua)]));
    /// ```
    ///
    /// See also [`header()`].
    ///
    /// [`header()`]: PoolBuilder::header
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.client.headers = Some(new);
        self
    }

    /// Add the http header
    ///
    /// # Example
    ///
    /// You can use the `.header()` chain to add multiple headers
    ///
    /// ```
    /// use reqwest::header::{self, HeaderValue};
    /// use fetchpool::pool::PoolBuilder;
    ///
    /// let ua = HeaderValue::from_str("fetchpool/0.1").expect("Invalid UA");
    /// let auth = HeaderValue::from_str("Basic aGk6MTIzNDU2Cg==").expect("Invalid auth");
    ///
    /// let builder = PoolBuilder::new()
    ///     .header(header::USER_AGENT, ua)
    ///     .header(header::AUTHORIZATION, auth);
    /// ```
    ///
    /// If you need to pass in a `HeaderMap`, instead of calling `.header()`
    /// multiple times. See also [`headers()`].
    ///
    /// [`headers()`]: PoolBuilder::headers
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.client.headers = Some(new);
        self
    }

    /// Create the [`Pool`] with the specified options.
    ///
    /// Allocates every session's HTTP client up front and spawns the
    /// background multiplexer, so this must be called within a Tokio
    /// runtime. Any client-construction failure is fatal to pool startup.
    pub fn build(self) -> Result<Pool> {
        Pool::new(self.config)
    }
}
