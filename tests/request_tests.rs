//! Tests for the transfer request type and the public error surface.

use fetchpool::{Error, TransferError, TransferRequest};

use std::path::PathBuf;

#[test]
fn try_from_str_extracts_filename() {
    let request = TransferRequest::try_from("https://example.com/dir/archive.tar.gz").unwrap();
    assert_eq!(request.filename(), Some("archive.tar.gz"));
}

#[test]
fn try_from_str_rejects_invalid_url() {
    let result = TransferRequest::try_from("definitely not a url");
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn try_from_str_rejects_url_without_filename() {
    let result = TransferRequest::try_from("https://example.com");
    assert!(matches!(result, Err(Error::InvalidUrl(_))));
}

#[test]
fn with_output_path_overrides_derived_filename() {
    let request = TransferRequest::try_from("https://example.com/file.zip")
        .unwrap()
        .with_output_path("/data/renamed.zip");
    assert_eq!(request.output_path, PathBuf::from("/data/renamed.zip"));
}

#[test]
fn into_dir_preserves_percent_decoded_filename() {
    let request = TransferRequest::try_from("https://example.com/some%20file.zip")
        .unwrap()
        .into_dir("/downloads");
    assert_eq!(request.output_path, PathBuf::from("/downloads/some file.zip"));
}

#[test]
fn transfer_error_messages_are_stable() {
    // These strings are the caller-facing diagnostics; changing them breaks
    // downstream matching.
    assert_eq!(TransferError::Open.to_string(), "Failed to open file");
    assert_eq!(
        TransferError::Transport("Connection refused".into()).to_string(),
        "Transfer failed (Connection refused)"
    );
    assert_eq!(
        TransferError::HttpStatus(503).to_string(),
        "Non-200 response (received 503)"
    );
    assert_eq!(TransferError::Cancelled.to_string(), "Transfer cancelled");
}

#[test]
fn structural_error_display() {
    assert_eq!(Error::PoolClosed.to_string(), "Pool is closed");
    assert!(Error::InvalidUrl("x".into()).to_string().contains("Invalid URL"));
    assert!(Error::InvalidRequest("y".into())
        .to_string()
        .contains("Invalid request"));
}
