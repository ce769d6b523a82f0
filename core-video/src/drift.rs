//! # Drift Correction Timer
//!
//! Periodically fires a callback that re-synchronizes playback with the
//! run timer. Re-arming always cancels the previous cycle before
//! starting a new one, so at most one cycle is outstanding and a firing
//! never races a manual re-synchronization.

use std::sync::Mutex;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Periodic re-synchronization trigger.
///
/// Each armed cycle is a spawned task that sleeps for the configured
/// period and invokes the callback. The callback must not block; it is
/// expected to enqueue work elsewhere and return.
#[derive(Debug)]
pub struct DriftTimer {
    cycle: Mutex<Option<CancellationToken>>,
}

impl DriftTimer {
    pub fn new() -> Self {
        DriftTimer {
            cycle: Mutex::new(None),
        }
    }

    /// Cancels the outstanding cycle, if any.
    pub fn disarm(&self) {
        let previous = {
            let mut guard = self.lock_cycle();
            guard.take()
        };
        if let Some(token) = previous {
            token.cancel();
            trace!("drift cycle cancelled");
        }
    }

    /// Cancels the outstanding cycle and starts a new one. `on_fire` is
    /// called once per elapsed period until the cycle is cancelled.
    pub fn arm<F>(&self, period: Duration, on_fire: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let previous = {
            let mut guard = self.lock_cycle();
            guard.replace(token)
        };
        if let Some(old) = previous {
            old.cancel();
        }

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = task_token.cancelled() => break,
                    _ = tokio::time::sleep(period) => {
                        trace!(period_ms = period.as_millis() as u64, "drift cycle fired");
                        on_fire();
                    }
                }
            }
        });
    }

    pub fn is_armed(&self) -> bool {
        let guard = self.lock_cycle();
        guard.as_ref().is_some_and(|token| !token.is_cancelled())
    }

    fn lock_cycle(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        // The lock is only held to swap the token; recover from a
        // poisoned guard rather than propagate the panic.
        self.cycle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for DriftTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DriftTimer {
    fn drop(&mut self) {
        self.disarm();
    }
}
