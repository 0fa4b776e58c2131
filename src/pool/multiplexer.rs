//! Background transfer multiplexer.
//!
//! One spawned task drives every active transfer: a single `select!` loop
//! over the caller-facing command channel and the set of in-flight transfer
//! futures. The loop is the only owner of the pool's sessions: a session is
//! either in the idle queue or moved into exactly one in-flight future, so
//! no other component can touch handle state concurrently.
//!
//! The completion-dispatch path lives here too: when a transfer future
//! resolves, its sink is already closed, the caller is notified exactly once,
//! and the session is recycled to the back of the idle queue before the next
//! queued job is started.

use super::config::CompletionFn;
use super::pool::PoolCounters;
use super::session::Session;
use crate::progress::ProgressDisplay;
use crate::transfer::{TransferError, TransferOutcome, TransferRequest};

use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, StreamExt};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, warn};

/// One accepted transfer waiting for (or holding) a session.
pub(crate) struct Job {
    pub(crate) request: TransferRequest,
    pub(crate) notify: CompletionFn,
    pub(crate) cancel: oneshot::Receiver<()>,
}

/// Messages from the caller-facing path to the multiplexer.
pub(crate) enum Command {
    Submit(Job),
}

/// A resolved transfer future: the session comes back with the outcome.
struct FinishedTransfer {
    session: Session,
    outcome: TransferOutcome,
    notify: CompletionFn,
}

pub(crate) struct Multiplexer {
    commands: mpsc::UnboundedReceiver<Command>,
    /// Idle sessions, FIFO: taken from the front, returned to the back.
    idle: VecDeque<Session>,
    /// Accepted jobs waiting for a session, FIFO.
    queued: VecDeque<Job>,
    in_flight: FuturesUnordered<BoxFuture<'static, FinishedTransfer>>,
    progress: ProgressDisplay,
    counters: Arc<PoolCounters>,
}

impl Multiplexer {
    pub(crate) fn new(
        sessions: VecDeque<Session>,
        commands: mpsc::UnboundedReceiver<Command>,
        progress: ProgressDisplay,
        counters: Arc<PoolCounters>,
    ) -> Self {
        Self {
            commands,
            idle: sessions,
            queued: VecDeque::new(),
            in_flight: FuturesUnordered::new(),
            progress,
            counters,
        }
    }

    /// The multiplexer loop. Runs until the command channel closes and every
    /// accepted transfer has been driven to completion.
    pub(crate) async fn run(mut self) {
        let mut accepting = true;
        loop {
            tokio::select! {
                cmd = self.commands.recv(), if accepting => match cmd {
                    Some(Command::Submit(job)) => {
                        self.queued.push_back(job);
                        self.start_ready().await;
                    }
                    None => {
                        debug!(
                            "command channel closed, draining {} active and {} queued transfers",
                            self.in_flight.len(),
                            self.queued.len()
                        );
                        accepting = false;
                    }
                },
                Some(finished) = self.in_flight.next() => {
                    self.dispatch(finished);
                    self.start_ready().await;
                }
                else => break,
            }
            if !accepting && self.in_flight.is_empty() && self.queued.is_empty() {
                break;
            }
        }

        // Unreachable with a nonzero capacity; a dropped notifier would
        // break the exactly-once contract, so leftover jobs are failed here.
        while let Some(job) = self.queued.pop_front() {
            warn!("job for {} never started", job.request.url);
            (job.notify)(TransferOutcome::failure(
                job.request,
                TransferError::Cancelled,
                None,
                0,
            ));
        }

        self.progress.finish();
        debug!("multiplexer stopped, all sessions idle");
    }

    /// Starts queued jobs for as long as there are idle sessions.
    async fn start_ready(&mut self) {
        while !self.queued.is_empty() {
            let Some(mut session) = self.idle.pop_front() else {
                break;
            };
            let Some(mut job) = self.queued.pop_front() else {
                self.idle.push_front(session);
                break;
            };

            // A caller may cancel while the job is still queued; honored
            // here, before the destination file is opened and truncated.
            if matches!(job.cancel.try_recv(), Ok(())) {
                self.idle.push_front(session);
                let Job {
                    request, notify, ..
                } = job;
                notify(TransferOutcome::failure(
                    request,
                    TransferError::Cancelled,
                    None,
                    0,
                ));
                self.update_counters();
                continue;
            }

            match session.begin(&job.request).await {
                Ok(()) => {
                    session.activate();
                    let Job {
                        request,
                        notify,
                        cancel,
                    } = job;
                    self.in_flight
                        .push(drive(session, request, notify, cancel, self.progress.clone()));
                }
                Err(err) => {
                    // Nothing was configured on the session; it goes straight
                    // back to the front of the idle queue and the caller hears
                    // about the failure immediately.
                    self.idle.push_front(session);
                    let Job {
                        request, notify, ..
                    } = job;
                    notify(TransferOutcome::failure(request, err, None, 0));
                }
            }
            self.update_counters();
        }
        self.update_counters();
    }

    /// Completion dispatch: notify exactly once, then release the session.
    ///
    /// The transfer future closed the sink before resolving, so the caller
    /// may read or move the destination file from inside the callback.
    fn dispatch(&mut self, finished: FinishedTransfer) {
        let FinishedTransfer {
            mut session,
            outcome,
            notify,
        } = finished;

        debug!(
            "session {}: transfer of {} finished ({})",
            session.id(),
            outcome.request().url,
            outcome
                .error_message()
                .unwrap_or_else(|| "success".to_string())
        );
        notify(outcome);

        if let Err(err) = session.recycle() {
            error!("session {} could not be recycled: {}", session.id(), err);
        }
        self.idle.push_back(session);
        self.update_counters();
    }

    fn update_counters(&self) {
        self.counters
            .record(self.idle.len(), self.in_flight.len(), self.queued.len());
    }
}

/// Builds the in-flight future for one transfer. The future owns the session
/// for the transfer's whole lifetime and hands it back with the outcome.
fn drive(
    mut session: Session,
    request: TransferRequest,
    notify: CompletionFn,
    cancel: oneshot::Receiver<()>,
    progress: ProgressDisplay,
) -> BoxFuture<'static, FinishedTransfer> {
    async move {
        let (bytes, status, error) = session.perform(&request, cancel, &progress).await;
        session.finish();
        let outcome = match error {
            None => TransferOutcome::success(request, status.unwrap_or(StatusCode::OK), bytes),
            Some(err) => TransferOutcome::failure(request, err, status, bytes),
        };
        FinishedTransfer {
            session,
            outcome,
            notify,
        }
    }
    .boxed()
}
