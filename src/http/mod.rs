//! HTTP module containing session client functionality.
//!
//! Each session in a pool owns a dedicated HTTP client configured for
//! long-lived reuse: a single pooled connection, TCP keep-alive, and a long
//! idle-connection lifetime. This module builds those clients.
//!
//! # Examples
//!
//! ```rust
//! use fetchpool::http::{create_session_client, SessionClientConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = create_session_client(&SessionClientConfig::default())?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{create_session_client, SessionClientConfig};
