//! Configuration structures and defaults for the pool.
//!
//! This module provides the configuration consumed by [`PoolBuilder`] and
//! the completion callback type bound to every transfer.
//!
//! # Examples
//!
//! ## Using completion callbacks
//!
//! ```rust
//! use fetchpool::pool::CompletionFn;
//! use fetchpool::transfer::TransferOutcome;
//!
//! let callback: CompletionFn = Box::new(|outcome: TransferOutcome| {
//!     match outcome.error_message() {
//!         None => println!("✓ Downloaded {:?}", outcome.request().output_path),
//!         Some(msg) => println!("✗ {msg}"),
//!     }
//! });
//! ```
//!
//! [`PoolBuilder`]: super::PoolBuilder

use crate::http::SessionClientConfig;
use crate::progress::StyleOptions;
use crate::transfer::TransferOutcome;

/// Callback type invoked exactly once when a transfer completes.
///
/// `FnOnce` makes the exactly-once contract a property of the type rather
/// than a convention: a consumed callback cannot fire again.
pub type CompletionFn = Box<dyn FnOnce(TransferOutcome) + Send + 'static>;

/// Default number of sessions in a pool.
pub const DEFAULT_CAPACITY: usize = 4;

/// Configuration structure for the pool.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Number of sessions, i.e. the maximum concurrent transfers.
    pub capacity: usize,
    /// Reuse policy applied identically to every session's HTTP client.
    pub client: SessionClientConfig,
    /// Pool style options.
    pub style_options: StyleOptions,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            client: SessionClientConfig::default(),
            style_options: StyleOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PoolConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert!(config.client.headers.is_none());
        assert!(config.style_options.is_enabled());
    }
}
