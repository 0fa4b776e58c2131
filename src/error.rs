//! Error handling for the fetchpool library.
//!
//! Structural errors (building a pool, submitting a request, shutting the
//! pool down) are reported through the [`Error`] enum. Failures of an
//! individual transfer are not errors at this level: they travel through the
//! completion channel as a [`crate::transfer::TransferError`] inside the
//! transfer's outcome, and the session involved is always recycled.

use thiserror::Error;

/// Errors that can happen when using fetchpool.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// This variant captures internal errors that don't fit into other
    /// categories, typically representing unexpected failures of the
    /// background multiplexer task.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A transfer request failed synchronous validation.
    ///
    /// Surfaced before any session is touched; nothing was queued.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The pool has been shut down and no longer accepts requests.
    #[error("Pool is closed")]
    PoolClosed,

    /// A session was driven through an illegal lifecycle transition.
    ///
    /// Session ownership moves by value between the pool and its in-flight
    /// transfers, so this is unreachable in correct usage; it exists to make
    /// the release contract checkable rather than silent.
    #[error("Invalid session state: {0}")]
    InvalidState(&'static str),

    /// Error from the Reqwest library.
    ///
    /// Only raised structurally when a session's HTTP client cannot be
    /// constructed during pool startup, which is fatal to the pool.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },
}

/// Result type alias for operations that can fail with a fetchpool error.
pub type Result<T> = std::result::Result<T, Error>;
