//! Workspace placeholder crate.
//!
//! This crate exists to expose shared feature flags that map to the individual
//! workspace crates (e.g., `host-traits`, `core-runtime`, `core-video`). Host
//! applications can depend on `video-sync-workspace` and enable the documented
//! features without needing to wire each crate individually.
//!
//! - `video` (default): the full synchronization core plus runtime support.
//! - `traits-only`: just the host boundary traits, for hosts that implement
//!   their own control surface and only need the contracts.

#[cfg(all(feature = "traits-only", not(feature = "video")))]
pub use host_traits;

#[cfg(feature = "video")]
pub use {core_runtime, core_video, host_traits};
