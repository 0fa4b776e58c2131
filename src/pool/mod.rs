//! Pool module containing the session pool, its builder, and the background
//! multiplexer.
//!
//! # Overview
//!
//! The pool module is organized into five components:
//!
//! - `pool` - The caller-facing [`Pool`] handle and [`TransferHandle`]
//! - `builder` - [`PoolBuilder`] for flexible configuration
//! - `config` - Configuration structures and the completion callback type
//! - `session` - The reusable per-transfer session and its state machine
//! - `multiplexer` - The background task driving all active transfers
//!
//! # Examples
//!
//! ## Fire-and-forget download
//!
//! ```rust,no_run
//! use fetchpool::pool::PoolBuilder;
//! use fetchpool::transfer::TransferRequest;
//! use std::convert::TryFrom;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fetchpool::Error> {
//! let pool = PoolBuilder::new().capacity(4).build()?;
//!
//! let request = TransferRequest::try_from("https://example.com/file.zip")?
//!     .with_output_path("/tmp/file.zip");
//! pool.download(request, |outcome| {
//!     match outcome.error_message() {
//!         None => println!("saved {:?}", outcome.request().output_path),
//!         Some(msg) => eprintln!("download failed: {msg}"),
//!     }
//! })?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Awaiting an outcome
//!
//! ```rust,no_run
//! use fetchpool::pool::PoolBuilder;
//! use fetchpool::transfer::TransferRequest;
//! use std::convert::TryFrom;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fetchpool::Error> {
//! let pool = PoolBuilder::hidden().build()?;
//! let request = TransferRequest::try_from("https://example.com/file.zip")?
//!     .into_dir("/tmp");
//! let outcome = pool.fetch(request).await?;
//! assert!(outcome.is_success());
//! pool.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub(crate) mod multiplexer;
pub mod pool;
pub(crate) mod session;

pub use builder::PoolBuilder;
pub use config::{CompletionFn, PoolConfig, DEFAULT_CAPACITY};
pub use pool::{Pool, PoolStats, TransferHandle};
