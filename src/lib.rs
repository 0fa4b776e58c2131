//! Fetchpool provides bounded, concurrent HTTP(S) downloads: no more than a
//! fixed number of transfers run at once, reusing a small pool of long-lived
//! sessions instead of creating one per request.
//!
//! Submission is fire-and-forget: [`Pool::download`] returns immediately and
//! the outcome is delivered later, exactly once, through a completion
//! callback, strictly after the destination file has been closed. A single
//! background task multiplexes all active transfers; callers never block on
//! network I/O.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use fetchpool::{PoolBuilder, TransferRequest};
//! use std::convert::TryFrom;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), fetchpool::Error> {
//! let pool = PoolBuilder::new().capacity(4).build()?;
//!
//! let request = TransferRequest::try_from(
//!     "https://github.com/seanmonstar/reqwest/archive/refs/tags/v0.11.9.zip",
//! )?
//! .into_dir("output");
//!
//! let outcome = pool.fetch(request).await?;
//! assert!(outcome.is_success());
//! pool.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`pool`] - The session pool, its builder, and the background multiplexer
//! - [`transfer`] - The `TransferRequest` and `TransferOutcome` types
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - Per-session HTTP client construction
//! - [`progress`] - Progress bar styling and display management

pub mod error;
pub mod http;
pub mod pool;
pub mod progress;
pub mod transfer;

pub use error::{Error, Result};
pub use http::{create_session_client, SessionClientConfig};
pub use pool::{CompletionFn, Pool, PoolBuilder, PoolConfig, PoolStats, TransferHandle};
pub use progress::{ProgressBarOpts, StyleOptions};
pub use transfer::{TransferError, TransferOutcome, TransferRequest};
