//! # Video Settings
//!
//! Persisted configuration for the video component: playback surface
//! dimensions, the media locator, the manual synchronization offset and
//! the drift correction interval.
//!
//! Settings live in a host-owned document store and are re-read on
//! every update tick, so edits made through the host's settings dialog
//! take effect without restarting the component.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ops::Add;
use std::time::Duration;

use host_traits::{MediaLocator, SettingsStore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, VideoError};

// ============================================================================
// Sync Offset
// ============================================================================

/// A signed synchronization offset in milliseconds.
///
/// Positive values push the commanded playback position forward relative
/// to the run timer, negative values pull it back.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SyncOffset(i64);

impl SyncOffset {
    pub const ZERO: SyncOffset = SyncOffset(0);

    pub fn from_millis(millis: i64) -> Self {
        SyncOffset(millis)
    }

    pub fn from_secs_f64(seconds: f64) -> Self {
        SyncOffset((seconds * 1000.0).round() as i64)
    }

    pub fn as_millis(self) -> i64 {
        self.0
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1000.0
    }
}

impl Add for SyncOffset {
    type Output = SyncOffset;

    fn add(self, rhs: SyncOffset) -> SyncOffset {
        SyncOffset(self.0 + rhs.0)
    }
}

// ============================================================================
// Video Settings
// ============================================================================

/// Default drift correction interval in milliseconds.
pub const DEFAULT_DRIFT_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoSettings {
    /// Rendered width when the layout is vertical.
    pub width: f32,
    /// Rendered height when the layout is horizontal.
    pub height: f32,
    /// Media resource locator for the video to play. Empty means no
    /// media selected.
    pub mrl: MediaLocator,
    /// Manual synchronization offset applied to every position command.
    #[serde(rename = "offset_ms")]
    pub offset: SyncOffset,
    /// Period of the drift correction timer.
    #[serde(rename = "drift_interval_ms")]
    pub drift_interval_ms: u64,
}

impl Default for VideoSettings {
    fn default() -> Self {
        VideoSettings {
            width: 300.0,
            height: 200.0,
            mrl: MediaLocator::new(),
            offset: SyncOffset::ZERO,
            drift_interval_ms: DEFAULT_DRIFT_INTERVAL_MS,
        }
    }
}

impl VideoSettings {
    /// Parses a settings document. Unknown fields are ignored and
    /// missing fields fall back to defaults, so documents written by
    /// older or newer versions stay readable.
    pub fn from_document(document: &Value) -> Result<Self> {
        serde_json::from_value(document.clone()).map_err(|e| VideoError::Settings(e.to_string()))
    }

    pub fn to_document(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| VideoError::Settings(e.to_string()))
    }

    /// Reads settings from the host store. A store with no document yet
    /// yields defaults.
    pub async fn load(store: &dyn SettingsStore) -> Result<Self> {
        match store.read().await? {
            Some(document) => Self::from_document(&document),
            None => Ok(VideoSettings::default()),
        }
    }

    pub async fn save(&self, store: &dyn SettingsStore) -> Result<()> {
        store.write(self.to_document()?).await?;
        Ok(())
    }

    pub fn drift_interval(&self) -> Duration {
        Duration::from_millis(self.drift_interval_ms)
    }

    /// Fingerprint over the canonical settings document, stable within
    /// a process. The host compares fingerprints between ticks to
    /// decide whether settings changed; the value is never persisted.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        match serde_json::to_string(self) {
            Ok(canonical) => canonical.hash(&mut hasher),
            Err(_) => 0u64.hash(&mut hasher),
        }
        hasher.finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
