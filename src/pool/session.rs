//! Reusable transfer session.
//!
//! A [`Session`] is one long-lived network-transfer handle plus its per-use
//! state. The pool creates `capacity` of them at startup and they cycle
//! between `Idle` and `Active` until the pool shuts down; a session is never
//! destroyed individually.
//!
//! Lifecycle per use: `Idle -> Configured` ([`Session::begin`] opens the
//! sink) `-> Active` ([`Session::activate`], when handed to the multiplexer)
//! `-> Completed` ([`Session::finish`]) `-> Idle` ([`Session::recycle`]).
//! Ownership moves by value between the multiplexer's idle queue and the
//! in-flight transfer future, so two transfers can never share a session.

use crate::error::Error;
use crate::progress::ProgressDisplay;
use crate::transfer::{TransferError, TransferRequest};

use futures::StreamExt;
use reqwest::{StatusCode, Url};
use reqwest_middleware::ClientWithMiddleware;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Lifecycle state of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SessionState {
    /// In the pool, carrying no per-use state.
    Idle,
    /// Sink opened and URL bound, not yet handed to the multiplexer.
    Configured,
    /// Owned by an in-flight transfer future.
    Active,
    /// Transfer finished, per-use state cleared, awaiting recycle.
    Completed,
}

/// One reusable transfer session.
pub(crate) struct Session {
    id: usize,
    client: ClientWithMiddleware,
    state: SessionState,
    target_url: Option<Url>,
    sink: Option<File>,
}

impl Session {
    pub(crate) fn new(id: usize, client: ClientWithMiddleware) -> Self {
        Self {
            id,
            client,
            state: SessionState::Idle,
            target_url: None,
            sink: None,
        }
    }

    pub(crate) fn id(&self) -> usize {
        self.id
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    /// Configures the session for one transfer.
    ///
    /// Opens the destination file (create + truncate), so the file exists on
    /// disk before any network byte is received. On open failure the session
    /// is left untouched and still `Idle`; nothing was sent over the network.
    pub(crate) async fn begin(&mut self, request: &TransferRequest) -> Result<(), TransferError> {
        debug_assert_eq!(self.state, SessionState::Idle);

        debug!(
            "session {}: creating destination file {:?}",
            self.id, request.output_path
        );
        let sink = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&request.output_path)
            .await
            .map_err(|e| {
                warn!(
                    "session {}: could not open {:?}: {}",
                    self.id, request.output_path, e
                );
                TransferError::Open
            })?;

        self.target_url = Some(request.url.clone());
        self.sink = Some(sink);
        self.state = SessionState::Configured;
        Ok(())
    }

    /// Marks the session as owned by the multiplexer's in-flight set.
    pub(crate) fn activate(&mut self) {
        debug_assert_eq!(self.state, SessionState::Configured);
        self.state = SessionState::Active;
    }

    /// Drives the transfer to a terminal state.
    ///
    /// Returns `(bytes_written, status_code, error)`. The sink is closed and
    /// flushed on every terminal path before this returns, so the completion
    /// notification that follows always sees a finished file.
    ///
    /// Only HTTP 200 counts as success; any other status is an
    /// application-level failure and the body is not written. Cancellation
    /// is honored between suspension points and reported as
    /// [`TransferError::Cancelled`].
    pub(crate) async fn perform(
        &mut self,
        request: &TransferRequest,
        cancel: oneshot::Receiver<()>,
        progress: &ProgressDisplay,
    ) -> (u64, Option<StatusCode>, Option<TransferError>) {
        debug_assert_eq!(self.state, SessionState::Active);

        let Some(mut sink) = self.sink.take() else {
            return (
                0,
                None,
                Some(TransferError::Transport("no sink bound to session".into())),
            );
        };

        // A dropped cancel handle means "never cancel", not "cancel now".
        let cancelled = async move {
            if cancel.await.is_err() {
                futures::future::pending::<()>().await;
            }
        };
        tokio::pin!(cancelled);

        debug!("session {}: fetching {}", self.id, request.url);
        let client = self.client.clone();
        let send = client.get(request.url.clone()).send();
        tokio::pin!(send);

        let response = tokio::select! {
            _ = &mut cancelled => {
                let _ = close_sink(sink).await;
                return (0, None, Some(TransferError::Cancelled));
            }
            res = &mut send => match res {
                Ok(response) => response,
                Err(e) => {
                    let _ = close_sink(sink).await;
                    return (0, None, Some(TransferError::Transport(root_cause(&e))));
                }
            },
        };

        let status = response.status();
        if status != StatusCode::OK {
            debug!("session {}: received {}", self.id, status);
            let _ = close_sink(sink).await;
            return (
                0,
                Some(status),
                Some(TransferError::HttpStatus(status.as_u16())),
            );
        }

        let size = response.content_length().unwrap_or(0);
        let pb = progress.create_child_progress(size);

        debug!("session {}: retrieving chunks...", self.id);
        let mut bytes_written: u64 = 0;
        let mut stream = response.bytes_stream();
        loop {
            let item = tokio::select! {
                _ = &mut cancelled => {
                    progress.finish_child(pb);
                    let _ = close_sink(sink).await;
                    return (bytes_written, Some(status), Some(TransferError::Cancelled));
                }
                item = stream.next() => item,
            };
            let Some(item) = item else { break };

            let mut chunk = match item {
                Ok(chunk) => chunk,
                Err(e) => {
                    progress.finish_child(pb);
                    let _ = close_sink(sink).await;
                    return (
                        bytes_written,
                        Some(status),
                        Some(TransferError::Transport(root_cause(&e))),
                    );
                }
            };
            let chunk_size = chunk.len() as u64;

            // write_all_buf either writes the whole chunk or fails; a short
            // write surfaces here as an error and aborts the transfer.
            if let Err(e) = sink.write_all_buf(&mut chunk).await {
                progress.finish_child(pb);
                let _ = close_sink(sink).await;
                return (
                    bytes_written,
                    Some(status),
                    Some(TransferError::Transport(root_cause(&e))),
                );
            }
            bytes_written += chunk_size;
            pb.inc(chunk_size);
        }

        if let Err(e) = close_sink(sink).await {
            progress.finish_child(pb);
            return (bytes_written, Some(status), Some(e));
        }

        progress.finish_child(pb);
        progress.increment_main();
        (bytes_written, Some(status), None)
    }

    /// Clears per-use state once the transfer reached a terminal state.
    pub(crate) fn finish(&mut self) {
        debug_assert!(self.sink.is_none());
        self.target_url = None;
        self.state = SessionState::Completed;
    }

    /// Returns the session to `Idle` so it can be handed out again.
    ///
    /// Only valid on a `Completed` session; anything else is a release
    /// contract violation.
    pub(crate) fn recycle(&mut self) -> Result<(), Error> {
        if self.state != SessionState::Completed {
            return Err(Error::InvalidState(
                "only a completed session can be recycled",
            ));
        }
        debug_assert!(self.sink.is_none());
        debug_assert!(self.target_url.is_none());
        self.state = SessionState::Idle;
        Ok(())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("target_url", &self.target_url)
            .finish()
    }
}

/// Flushes and closes the sink. Runs on every terminal path, before the
/// completion notification.
async fn close_sink(mut sink: File) -> Result<(), TransferError> {
    sink.shutdown()
        .await
        .map_err(|e| TransferError::Transport(root_cause(&e)))
}

/// Walks an error's source chain down to the root cause, which carries the
/// most useful transport diagnostic (e.g. "Connection refused").
fn root_cause(err: &dyn std::error::Error) -> String {
    let mut current = err;
    while let Some(source) = current.source() {
        current = source;
    }
    current.to_string()
}
