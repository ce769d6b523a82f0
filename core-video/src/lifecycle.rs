//! # Component Lifecycle
//!
//! Tracks the video component's lifecycle as a small atomic state
//! machine. The component starts `Uninitialized`, becomes `Attached`
//! once the native surface exists, and ends `Disposed`. `Disposed` is
//! terminal; no transition leaves it.

use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, native surface not yet available.
    Uninitialized,
    /// Surface created; the component renders and reacts to events.
    Attached,
    /// Resources released. Terminal.
    Disposed,
}

const UNINITIALIZED: u8 = 0;
const ATTACHED: u8 = 1;
const DISPOSED: u8 = 2;

/// Lock-free lifecycle cell shared across tasks.
#[derive(Debug)]
pub struct LifecycleCell(AtomicU8);

impl LifecycleCell {
    pub fn new() -> Self {
        LifecycleCell(AtomicU8::new(UNINITIALIZED))
    }

    pub fn get(&self) -> Lifecycle {
        match self.0.load(Ordering::Acquire) {
            UNINITIALIZED => Lifecycle::Uninitialized,
            ATTACHED => Lifecycle::Attached,
            _ => Lifecycle::Disposed,
        }
    }

    /// Moves `Uninitialized` to `Attached`. Returns `false` if the cell
    /// was already attached or disposed.
    pub fn attach(&self) -> bool {
        self.0
            .compare_exchange(UNINITIALIZED, ATTACHED, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Moves any live state to `Disposed`. Returns `true` exactly once;
    /// later calls observe the terminal state and return `false`.
    pub fn dispose(&self) -> bool {
        self.0.swap(DISPOSED, Ordering::AcqRel) != DISPOSED
    }

    pub fn is_attached(&self) -> bool {
        self.get() == Lifecycle::Attached
    }

    pub fn is_disposed(&self) -> bool {
        self.get() == Lifecycle::Disposed
    }
}

impl Default for LifecycleCell {
    fn default() -> Self {
        Self::new()
    }
}
