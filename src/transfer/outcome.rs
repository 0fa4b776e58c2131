//! Transfer outcome reporting.
//!
//! This module contains the [`TransferOutcome`] struct delivered to the
//! completion callback and the [`TransferError`] enum describing why a
//! transfer failed. The outcome is a per-transfer value, never shared
//! between sessions, so a recycled session carries nothing over from its
//! previous use.

use super::request::TransferRequest;
use reqwest::StatusCode;
use thiserror::Error;

/// The reason a transfer failed.
///
/// The `Display` form of each variant is the exact diagnostic handed to the
/// caller via [`TransferOutcome::error_message`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The destination file could not be opened for writing. No network
    /// request was issued.
    #[error("Failed to open file")]
    Open,
    /// DNS, connection, timeout, mid-transfer or short-write failure.
    #[error("Transfer failed ({0})")]
    Transport(String),
    /// The transport succeeded but the server did not answer 200.
    #[error("Non-200 response (received {0})")]
    HttpStatus(u16),
    /// The transfer was cancelled through its [`crate::pool::TransferHandle`].
    #[error("Transfer cancelled")]
    Cancelled,
}

/// Represents the result of one [`TransferRequest`].
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// The request this outcome answers.
    request: TransferRequest,
    /// HTTP status code, when a response was received at all.
    status_code: Option<StatusCode>,
    /// Number of body bytes written to the sink.
    bytes_written: u64,
    /// The failure, if any. `None` means the destination file holds the
    /// complete response body and has been closed.
    error: Option<TransferError>,
}

impl TransferOutcome {
    /// Creates a successful outcome.
    pub(crate) fn success(request: TransferRequest, status_code: StatusCode, bytes: u64) -> Self {
        Self {
            request,
            status_code: Some(status_code),
            bytes_written: bytes,
            error: None,
        }
    }

    /// Creates a failed outcome.
    pub(crate) fn failure(
        request: TransferRequest,
        error: TransferError,
        status_code: Option<StatusCode>,
        bytes: u64,
    ) -> Self {
        Self {
            request,
            status_code,
            bytes_written: bytes,
            error: Some(error),
        }
    }

    /// Get a reference to the outcome's request.
    pub fn request(&self) -> &TransferRequest {
        &self.request
    }

    /// Get the HTTP status code, if a response was received.
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    /// Get the number of body bytes written to the destination file.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Returns `true` if the transfer completed with an HTTP 200 response
    /// and the full body on disk.
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Get the transfer's failure, if any.
    pub fn error(&self) -> Option<&TransferError> {
        self.error.as_ref()
    }

    /// The caller-facing diagnostic: `None` on success, otherwise a
    /// human-readable message such as `"Failed to open file"` or
    /// `"Non-200 response (received 404)"`.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn request() -> TransferRequest {
        let url = Url::parse("http://example.com/test.zip").unwrap();
        TransferRequest::new(&url, "/tmp/test.zip")
    }

    #[test]
    fn error_messages_match_caller_contract() {
        assert_eq!(TransferError::Open.to_string(), "Failed to open file");
        assert_eq!(
            TransferError::Transport("connection refused".into()).to_string(),
            "Transfer failed (connection refused)"
        );
        assert_eq!(
            TransferError::HttpStatus(404).to_string(),
            "Non-200 response (received 404)"
        );
        assert_eq!(TransferError::Cancelled.to_string(), "Transfer cancelled");
    }

    #[test]
    fn success_outcome() {
        let outcome = TransferOutcome::success(request(), StatusCode::OK, 1024);
        assert!(outcome.is_success());
        assert_eq!(outcome.status_code(), Some(StatusCode::OK));
        assert_eq!(outcome.bytes_written(), 1024);
        assert_eq!(outcome.error_message(), None);
    }

    #[test]
    fn failure_outcome() {
        let outcome = TransferOutcome::failure(
            request(),
            TransferError::HttpStatus(404),
            Some(StatusCode::NOT_FOUND),
            0,
        );
        assert!(!outcome.is_success());
        assert_eq!(outcome.status_code(), Some(StatusCode::NOT_FOUND));
        assert_eq!(
            outcome.error_message().as_deref(),
            Some("Non-200 response (received 404)")
        );
    }

    #[test]
    fn open_failure_has_no_status() {
        let outcome = TransferOutcome::failure(request(), TransferError::Open, None, 0);
        assert_eq!(outcome.status_code(), None);
        assert_eq!(outcome.error(), Some(&TransferError::Open));
    }
}
