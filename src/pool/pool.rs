//! Caller-facing pool handle.
//!
//! The [`Pool`] owns the command channel to the background multiplexer and
//! the multiplexer's join handle. Submission never blocks: `download`
//! validates, hands the job over the channel, and returns; the outcome
//! arrives later through the completion callback.

use super::config::{CompletionFn, PoolConfig};
use super::multiplexer::{Command, Job, Multiplexer};
use super::session::Session;
use crate::error::{Error, Result};
use crate::http::create_session_client;
use crate::progress::ProgressDisplay;
use crate::transfer::{TransferOutcome, TransferRequest};

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

/// Observability counters shared between the pool handle and the multiplexer.
///
/// The multiplexer is the only writer; the pool handle only reads. The three
/// values are packed into one atomic so a reader always sees a consistent
/// snapshot where `idle + active == capacity`.
#[derive(Debug, Default)]
pub(crate) struct PoolCounters(AtomicU64);

impl PoolCounters {
    pub(crate) fn record(&self, idle: usize, active: usize, queued: usize) {
        let packed = ((queued.min(u32::MAX as usize) as u64) << 32)
            | ((active as u64 & 0xffff) << 16)
            | (idle as u64 & 0xffff);
        self.0.store(packed, Ordering::SeqCst);
    }

    fn snapshot(&self) -> (usize, usize, usize) {
        let packed = self.0.load(Ordering::SeqCst);
        (
            (packed & 0xffff) as usize,
            ((packed >> 16) & 0xffff) as usize,
            (packed >> 32) as usize,
        )
    }
}

/// A point-in-time view of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Fixed number of sessions.
    pub capacity: usize,
    /// Sessions currently available.
    pub idle: usize,
    /// Sessions currently driving a transfer.
    pub active: usize,
    /// Accepted requests waiting for a session.
    pub queued: usize,
}

/// Cancels one in-flight (or queued) transfer.
///
/// Dropping the handle without calling [`TransferHandle::cancel`] leaves the
/// transfer running to completion.
pub struct TransferHandle {
    cancel: oneshot::Sender<()>,
}

impl TransferHandle {
    /// Aborts the transfer at its next suspension point. The completion
    /// callback still fires exactly once, with a cancelled outcome, after
    /// the destination file has been closed.
    pub fn cancel(self) {
        let _ = self.cancel.send(());
    }
}

impl fmt::Debug for TransferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferHandle").finish()
    }
}

/// Represents the session pool.
///
/// A pool can be created via its builder:
///
/// ```rust,no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), fetchpool::Error> {
/// use fetchpool::pool::PoolBuilder;
///
/// let pool = PoolBuilder::new().capacity(4).build()?;
/// # Ok(())
/// # }
/// ```
pub struct Pool {
    commands: mpsc::UnboundedSender<Command>,
    multiplexer: JoinHandle<()>,
    capacity: usize,
    counters: Arc<PoolCounters>,
}

impl fmt::Debug for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pool")
            .field("capacity", &self.capacity)
            .field("stats", &self.stats())
            .finish()
    }
}

impl Pool {
    /// Creates the pool: allocates every session up front and spawns the
    /// multiplexer task.
    pub(crate) fn new(config: PoolConfig) -> Result<Self> {
        if config.capacity == 0 {
            return Err(Error::InvalidRequest(
                "pool capacity must be at least 1".into(),
            ));
        }
        if config.capacity > u16::MAX as usize {
            return Err(Error::InvalidRequest(
                "pool capacity must be at most 65535".into(),
            ));
        }

        let mut sessions = VecDeque::with_capacity(config.capacity);
        for id in 0..config.capacity {
            let client = create_session_client(&config.client)?;
            sessions.push_back(Session::new(id, client));
        }
        debug!("created {} sessions", config.capacity);

        let counters = Arc::new(PoolCounters::default());
        counters.record(config.capacity, 0, 0);

        let progress = ProgressDisplay::new(config.style_options.clone());
        let (commands, receiver) = mpsc::unbounded_channel();
        let multiplexer =
            tokio::spawn(Multiplexer::new(sessions, receiver, progress, counters.clone()).run());

        Ok(Self {
            commands,
            multiplexer,
            capacity: config.capacity,
            counters,
        })
    }

    /// Gets the number of sessions, i.e. the maximum concurrent transfers.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Gets a point-in-time view of the pool's occupancy.
    pub fn stats(&self) -> PoolStats {
        let (idle, active, queued) = self.counters.snapshot();
        PoolStats {
            capacity: self.capacity,
            idle,
            active,
            queued,
        }
    }

    /// Submits a transfer and returns immediately.
    ///
    /// `on_complete` is invoked exactly once, from the background task, with
    /// the transfer's outcome, after the destination file has been closed,
    /// so the callback may read or move it right away. Requests beyond the
    /// pool's capacity are queued FIFO and started as sessions free up.
    ///
    /// Validation failures (`Error::InvalidRequest`) and submission after
    /// shutdown (`Error::PoolClosed`) are reported synchronously, before any
    /// session is touched.
    pub fn download<F>(&self, request: TransferRequest, on_complete: F) -> Result<TransferHandle>
    where
        F: FnOnce(TransferOutcome) + Send + 'static,
    {
        request.validate()?;

        let (cancel_tx, cancel_rx) = oneshot::channel();
        let job = Job {
            request,
            notify: Box::new(on_complete) as CompletionFn,
            cancel: cancel_rx,
        };
        self.commands
            .send(Command::Submit(job))
            .map_err(|_| Error::PoolClosed)?;

        Ok(TransferHandle { cancel: cancel_tx })
    }

    /// Submits a transfer and awaits its outcome.
    ///
    /// Convenience wrapper over [`Pool::download`]; the transfer itself is
    /// still driven by the background multiplexer.
    pub async fn fetch(&self, request: TransferRequest) -> Result<TransferOutcome> {
        let (tx, rx) = oneshot::channel();
        let _handle = self.download(request, move |outcome| {
            let _ = tx.send(outcome);
        })?;
        rx.await.map_err(|_| Error::PoolClosed)
    }

    /// Shuts the pool down, draining queued and in-flight transfers first.
    ///
    /// Every accepted transfer still receives its completion notification.
    /// Dropping the pool without calling this detaches the multiplexer,
    /// which drains in the background and then exits.
    pub async fn shutdown(self) -> Result<()> {
        let Pool {
            commands,
            multiplexer,
            ..
        } = self;
        drop(commands);
        multiplexer
            .await
            .map_err(|e| Error::Internal(format!("multiplexer task failed: {e}")))
    }
}
