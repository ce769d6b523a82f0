//! # Host Boundary Traits
//!
//! Contracts between the video synchronization core and the host timing
//! application.
//!
//! ## Overview
//!
//! This crate defines every capability the core requires but cannot own:
//! the embedded native playback control, the authoritative run timer, the
//! visual surface the control renders into, settings persistence, and user
//! notifications. Each trait represents something the host must implement;
//! the core never talks to the host any other way.
//!
//! ## Traits
//!
//! - [`PlaybackControl`](playback::PlaybackControl) - command surface of the
//!   embedded native video control
//! - [`TimerSource`](timer::TimerSource) - read-only elapsed-time accessor of
//!   the host run timer
//! - [`VideoSurface`](surface::VideoSurface) - visibility and realization of
//!   the widget the control renders into
//! - [`SettingsStore`](settings::SettingsStore) - generic document-tree
//!   settings persistence
//! - [`UserNotifier`](notify::UserNotifier) - one-shot construction-failure
//!   notification
//!
//! ## Error Handling
//!
//! All boundary traits use [`HostError`](error::HostError). Host
//! implementations should convert platform errors into it and provide
//! actionable messages; the core distinguishes only between "operation
//! failed" (logged, skipped) and "control faulted" (component teardown).
//!
//! ## Thread Safety
//!
//! Every trait except [`PlaybackControl`](playback::PlaybackControl) requires
//! `Send + Sync`. The playback control is explicitly not reentrant-safe: the
//! core wraps the single handle in a mutex and marshals all calls onto one
//! owner loop, so implementations only need `Send`.

pub mod error;
pub mod notify;
pub mod playback;
pub mod settings;
pub mod surface;
pub mod timer;

pub use error::{HostError, Result};

// Re-export commonly used types
pub use notify::{LogNotifier, UserNotifier};
pub use playback::{FaultedControl, MediaLocator, PlaybackControl};
pub use settings::{MemorySettingsStore, SettingsStore};
pub use surface::{LayoutMode, VideoSurface};
pub use timer::{TimerEvent, TimerPhase, TimerSource};
