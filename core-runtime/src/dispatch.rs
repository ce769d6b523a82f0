//! # Owner-Loop Dispatcher
//!
//! Explicit run-on-owner-thread primitive for non-reentrant host resources.
//!
//! ## Overview
//!
//! The embedded native playback control must only ever be touched from one
//! logical thread, while commands originate from several contexts: timer
//! event handlers, the drift-correction task, and the UI update tick. The
//! [`OwnerDispatcher`] is the message-passing boundary between them: callers
//! queue async jobs, and a single owner task executes them strictly in
//! arrival order.
//!
//! Two calling conventions are offered, mirroring fire-and-forget
//! `BeginInvoke`-style marshaling and blocking `Invoke`-style marshaling:
//!
//! - [`OwnerDispatcher::invoke`] queues a job and returns immediately.
//! - [`OwnerDispatcher::invoke_wait`] queues a job and waits for its result.
//!
//! Queued jobs are not preemptible; cancellation elsewhere (the drift timer's
//! token) only prevents new jobs from being queued. Jobs already in the
//! channel run to completion.

use crate::error::{Error, Result};
use futures::future::BoxFuture;
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::trace;

type Job = BoxFuture<'static, ()>;

/// Handle for queueing work onto a single owner loop.
///
/// Clones share the same loop. The loop exits once every handle has been
/// dropped and the queue has drained.
#[derive(Clone)]
pub struct OwnerDispatcher {
    tx: mpsc::UnboundedSender<Job>,
}

impl OwnerDispatcher {
    /// Spawn an owner loop and return the dispatcher plus its task handle.
    pub fn spawn() -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::unbounded_channel::<Job>();
        let task = tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                job.await;
            }
            trace!("owner loop drained and stopped");
        });
        (Self { tx }, task)
    }

    /// Queue a job without waiting for it.
    ///
    /// Returns `false` when the owner loop has already terminated, in which
    /// case the job is dropped.
    pub fn invoke<F>(&self, job: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.tx.send(job.boxed()).is_ok()
    }

    /// Queue a job and wait until the owner loop has executed it.
    pub async fn invoke_wait<F, R>(&self, job: F) -> Result<R>
    where
        F: Future<Output = R> + Send + 'static,
        R: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        let wrapped = async move {
            // Receiver may have been dropped by a caller that gave up waiting.
            let _ = done_tx.send(job.await);
        };
        self.tx
            .send(wrapped.boxed())
            .map_err(|_| Error::Dispatch("owner loop terminated".to_string()))?;
        done_rx
            .await
            .map_err(|_| Error::Dispatch("owner loop dropped job".to_string()))
    }
}

impl fmt::Debug for OwnerDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OwnerDispatcher")
            .field("closed", &self.tx.is_closed())
            .finish()
    }
}
