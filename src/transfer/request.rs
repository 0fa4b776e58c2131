//! Core transfer request type.
//!
//! This module contains the [`TransferRequest`] struct describing a single
//! download. URL validation happens at construction time, so a request that
//! exists is always network-addressable; the output path is validated when
//! the request is submitted to a pool.

use crate::error::Error;

use reqwest::Url;
use std::convert::TryFrom;
use std::path::{Path, PathBuf};

/// Represents a file to be downloaded.
#[derive(Debug, Clone)]
pub struct TransferRequest {
    /// URL of the file to download.
    pub url: Url,
    /// Path where the response body is written. Created or truncated when
    /// the transfer begins, before any network byte is received.
    pub output_path: PathBuf,
}

impl TransferRequest {
    /// Creates a new [`TransferRequest`].
    ///
    /// ## Example
    ///
    /// ```rust
    /// use fetchpool::transfer::TransferRequest;
    /// use reqwest::Url;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let url = Url::parse("https://example.com/file-0.1.2.zip")?;
    /// let request = TransferRequest::new(&url, "/tmp/file-0.1.2.zip");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(url: &Url, output_path: impl Into<PathBuf>) -> Self {
        Self {
            url: url.clone(),
            output_path: output_path.into(),
        }
    }

    /// Replaces the output path.
    pub fn with_output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.output_path = output_path.into();
        self
    }

    /// Points the output at `dir`, keeping the filename derived from the URL.
    ///
    /// The filename is the last path segment of the URL, percent-decoded.
    pub fn into_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let filename = self
            .output_path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_default();
        self.output_path = dir.as_ref().join(filename);
        self
    }

    /// Returns the filename portion of the output path, if any.
    pub fn filename(&self) -> Option<&str> {
        self.output_path.file_name().and_then(|n| n.to_str())
    }

    /// Checks the parts of the request that cannot be validated by
    /// construction. Called by the pool before any session is touched.
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.output_path.as_os_str().is_empty() {
            return Err(Error::InvalidRequest(
                "the output path must not be empty".into(),
            ));
        }
        Ok(())
    }
}

impl TryFrom<&Url> for TransferRequest {
    type Error = crate::error::Error;

    /// Builds a request whose output path is the URL's filename, relative to
    /// the current directory. Combine with [`TransferRequest::into_dir`] or
    /// [`TransferRequest::with_output_path`] to place it elsewhere.
    fn try_from(value: &Url) -> Result<Self, Self::Error> {
        value
            .path_segments()
            .ok_or_else(|| {
                Error::InvalidUrl(format!(
                    "The url \"{}\" does not contain a valid path",
                    value
                ))
            })?
            .next_back()
            .map(String::from)
            .filter(|filename| !filename.is_empty())
            .map(|filename| TransferRequest {
                url: value.clone(),
                output_path: form_urlencoded::parse(filename.as_bytes())
                    .map(|(key, val)| [key, val].concat())
                    .collect::<String>()
                    .into(),
            })
            .ok_or_else(|| {
                Error::InvalidUrl(format!("The url \"{}\" does not contain a filename", value))
            })
    }
}

impl TryFrom<&str> for TransferRequest {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value)
            .map_err(|e| {
                Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
            })
            .and_then(|u| TransferRequest::try_from(&u))
    }
}
