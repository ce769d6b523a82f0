//! Visual surface boundary trait.
//!
//! The native playback control renders into a visual surface managed by the
//! host's layout system. The core only toggles visibility (the video region
//! is shown while a run is active and hidden after a reset) and observes the
//! one-time "created" signal that gates the attached lifecycle transition.

use serde::{Deserialize, Serialize};

/// Orientation the host layout is rendering in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    Vertical,
    Horizontal,
}

/// Host-side visual surface backing the embedded video control.
///
/// `is_created` reports whether the underlying widget has been realized by the
/// host UI toolkit; the core attaches itself on the first update tick where
/// this returns `true`. Visibility changes are commands and may be applied
/// asynchronously by the host.
pub trait VideoSurface: Send + Sync {
    /// Whether the host toolkit has realized the underlying widget.
    fn is_created(&self) -> bool;

    /// Show or hide the video region.
    fn set_visible(&self, visible: bool);
}
