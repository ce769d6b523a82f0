//! Run-timer boundary types.
//!
//! The host application owns the authoritative run timer. The core consumes
//! it two ways: as a stream of lifecycle events ([`TimerEvent`]) and as a
//! read-only accessor for the current elapsed real time ([`TimerSource`]).

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Phase the run timer is in when an event fires.
///
/// Reset events carry the terminal phase as context. The synchronization core
/// deliberately does not branch on it; the value exists so hosts and log
/// consumers can distinguish a reset after a finished run from an abandoned
/// one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerPhase {
    /// No run is in progress.
    NotRunning,
    /// A run is being timed.
    Running,
    /// The run timer is paused.
    Paused,
    /// The run reached its final split.
    Ended,
}

/// Lifecycle event emitted by the host's run timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum TimerEvent {
    /// A new run started.
    Started,
    /// The running timer was paused.
    Paused,
    /// The paused timer was resumed.
    Resumed,
    /// The timer was reset, leaving the given phase behind.
    Reset {
        /// Phase the run was in when the reset happened.
        phase: TimerPhase,
    },
}

impl TimerEvent {
    /// Returns a human-readable description of the event.
    pub fn description(&self) -> &'static str {
        match self {
            TimerEvent::Started => "Run timer started",
            TimerEvent::Paused => "Run timer paused",
            TimerEvent::Resumed => "Run timer resumed",
            TimerEvent::Reset { .. } => "Run timer reset",
        }
    }
}

/// Read-only view of the host timer's current elapsed real time.
///
/// The core only ever reads this value; the host owns and mutates it. The
/// returned duration is the real-time clock of the active run, starting at
/// zero when the run starts.
pub trait TimerSource: Send + Sync {
    /// Current elapsed real time of the run.
    fn current_time(&self) -> Duration;
}
