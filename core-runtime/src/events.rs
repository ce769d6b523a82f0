//! # Timer Event Bus
//!
//! Fan-out of run-timer lifecycle events using `tokio::sync::broadcast`.
//!
//! ## Overview
//!
//! The host application emits one [`TimerEvent`] per timer transition (start,
//! pause, resume, reset). The bus broadcasts each event to every subscriber;
//! the video component attaches a handler through [`TimerEventBus::attach`]
//! and receives a [`TimerSubscription`], a single-owner handle that is
//! revoked exactly once during component disposal. Nothing here uses implicit
//! global wiring: whoever holds the handle owns the subscription.
//!
//! ```text
//! ┌────────────┐    emit     ┌──────────────┐   attach    ┌───────────────┐
//! │ Host timer ├────────────>│ TimerEventBus├────────────>│ VideoComponent│
//! └────────────┘             │  (broadcast) │             └───────────────┘
//!                            └──────────────┘
//! ```
//!
//! ## Lagging
//!
//! Timer transitions are rare (a handful per run), so the default buffer is
//! small. A subscriber that still lags simply misses the skipped transitions;
//! the drift-correction loop re-aligns playback on its next firing, so a lost
//! event degrades smoothness, not correctness.

use host_traits::timer::TimerEvent;
use std::fmt;
use std::future::Future;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};
use uuid::Uuid;

// Re-export commonly used types
pub use tokio::sync::broadcast::error::{RecvError, SendError};
pub use tokio::sync::broadcast::Receiver;

/// Default buffer size for the timer event channel.
///
/// Timer transitions arrive at human speed; a small buffer is plenty and a
/// lagged subscriber only loses transitions the next drift correction absorbs.
pub const DEFAULT_EVENT_BUFFER_SIZE: usize = 16;

/// Broadcast bus for run-timer lifecycle events.
///
/// Cloning the bus clones the producer side; each [`TimerEventBus::subscribe`]
/// or [`TimerEventBus::attach`] creates an independent consumer.
#[derive(Clone)]
pub struct TimerEventBus {
    sender: broadcast::Sender<TimerEvent>,
}

impl TimerEventBus {
    /// Create a bus with the given per-subscriber buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    ///
    /// Returns the number of subscribers that received the event, or an error
    /// when there are none.
    pub fn emit(&self, event: TimerEvent) -> Result<usize, SendError<TimerEvent>> {
        self.sender.send(event)
    }

    /// Create a raw receiver for this bus.
    ///
    /// Past events are not replayed. Most consumers want
    /// [`TimerEventBus::attach`] instead, which owns the receive loop and
    /// hands back a revocable handle.
    pub fn subscribe(&self) -> Receiver<TimerEvent> {
        self.sender.subscribe()
    }

    /// Register an event handler and return its subscription handle.
    ///
    /// The handler runs on a dedicated task, one event at a time, until the
    /// handle is revoked or the bus is dropped. Lagged subscriptions log a
    /// warning and keep receiving.
    pub fn attach<F, Fut>(&self, mut handler: F) -> TimerSubscription
    where
        F: FnMut(TimerEvent) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let id = Uuid::new_v4();
        let token = CancellationToken::new();
        let mut receiver = self.sender.subscribe();

        let pump_token = token.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = pump_token.cancelled() => {
                        debug!(subscription = %id, "timer subscription revoked");
                        break;
                    }
                    received = receiver.recv() => match received {
                        Ok(event) => handler(event).await,
                        Err(RecvError::Lagged(missed)) => {
                            warn!(subscription = %id, missed, "timer subscriber lagged");
                        }
                        Err(RecvError::Closed) => {
                            debug!(subscription = %id, "timer event bus closed");
                            break;
                        }
                    },
                }
            }
        });

        TimerSubscription { id, token, task }
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for TimerEventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_BUFFER_SIZE)
    }
}

impl fmt::Debug for TimerEventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerEventBus")
            .field("subscriber_count", &self.subscriber_count())
            .finish()
    }
}

/// Single-owner handle to an attached timer-event handler.
///
/// Revoking consumes the handle, so a subscription can only be torn down
/// once; dropping it without revoking leaves the handler running for the
/// lifetime of the bus.
pub struct TimerSubscription {
    id: Uuid,
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl TimerSubscription {
    /// Identifier of this subscription, for logging.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Stop the handler task and wait for it to finish.
    pub async fn revoke(self) {
        self.token.cancel();
        // The pump only awaits the handler and the channel, both of which
        // resolve promptly after cancellation.
        let _ = self.task.await;
    }
}

impl fmt::Debug for TimerSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerSubscription")
            .field("id", &self.id)
            .finish()
    }
}
