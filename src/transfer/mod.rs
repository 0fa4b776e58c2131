//! Transfer module containing the request and outcome types.
//!
//! A [`TransferRequest`] describes one download: the URL to fetch and the
//! local path to write the response body to. It is consumed by
//! [`crate::pool::Pool::download`] and echoed back inside the
//! [`TransferOutcome`] delivered to the completion callback.
//!
//! # Examples
//!
//! ## Creating a request
//!
//! ```rust
//! use fetchpool::transfer::TransferRequest;
//! use std::convert::TryFrom;
//!
//! // Explicit output path.
//! let request = TransferRequest::try_from("https://example.com/file.zip")?
//!     .with_output_path("/tmp/file.zip");
//!
//! // Or derive the filename from the URL into a directory.
//! let request = TransferRequest::try_from("https://example.com/file.zip")?
//!     .into_dir("/tmp");
//! assert!(request.output_path.ends_with("file.zip"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Inspecting an outcome
//!
//! ```rust,no_run
//! use fetchpool::transfer::TransferOutcome;
//!
//! fn report(outcome: &TransferOutcome) {
//!     match outcome.error_message() {
//!         None => println!("done: {} bytes", outcome.bytes_written()),
//!         Some(msg) => println!("failed: {msg}"),
//!     }
//! }
//! ```

pub mod outcome;
pub mod request;

pub use outcome::{TransferError, TransferOutcome};
pub use request::TransferRequest;
