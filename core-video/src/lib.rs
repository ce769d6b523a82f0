//! # Core Video
//!
//! Video synchronization component: plays a video alongside a timed run
//! and keeps the playback position aligned with the host's run timer.
//!
//! ## Overview
//!
//! The [`VideoComponent`] reacts to timer events delivered over a
//! [`core_runtime::TimerEventBus`], marshals every playback command
//! onto a single owner loop, and periodically corrects playback drift
//! through a [`drift::DriftTimer`]. Host-specific concerns (the native
//! playback control, render surface, run timer and settings storage)
//! enter through the traits in `host-traits`.
//!
//! ## Usage
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use core_video::VideoComponent;
//! # use host_traits::{LogNotifier, MemorySettingsStore};
//! # async fn example(
//! #     control: host_traits::Result<Box<dyn host_traits::PlaybackControl>>,
//! #     timer: Arc<dyn host_traits::TimerSource>,
//! #     surface: Arc<dyn host_traits::VideoSurface>,
//! #     bus: core_runtime::TimerEventBus,
//! # ) {
//! let store = Arc::new(MemorySettingsStore::new());
//! let component = VideoComponent::new(control, timer, surface, store, &LogNotifier);
//! component.attach_to(&bus).await;
//! # }
//! ```

pub mod component;
pub mod drift;
pub mod error;
pub mod lifecycle;
pub mod settings;

pub use component::{VideoComponent, COMPONENT_NAME, MINIMUM_HEIGHT, MINIMUM_WIDTH};
pub use drift::DriftTimer;
pub use error::{Result, VideoError};
pub use lifecycle::{Lifecycle, LifecycleCell};
pub use settings::{SyncOffset, VideoSettings, DEFAULT_DRIFT_INTERVAL_MS};
