//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the video sync core:
//! - Timer event bus with revocable subscriptions
//! - Owner-loop dispatcher for marshaling onto a single logical thread
//! - Logging and tracing setup
//!
//! ## Overview
//!
//! This crate contains the runtime utilities the synchronization core depends
//! on. It establishes the async patterns, logging conventions, and event
//! broadcasting used throughout the workspace; the domain logic itself lives
//! in `core-video`.

pub mod dispatch;
pub mod error;
pub mod events;
pub mod logging;

pub use dispatch::OwnerDispatcher;
pub use error::{Error, Result};
pub use events::{TimerEventBus, TimerSubscription};
pub use logging::{init_logging, LogFormat, LoggingConfig};
