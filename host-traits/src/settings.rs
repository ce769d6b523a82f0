//! Settings persistence boundary trait.
//!
//! The host persists component settings inside its layout files. The contract
//! here is a generic document-tree read/write: the core serializes its
//! settings into an opaque JSON document and the host stores it wherever and
//! however it likes (the reference host keeps an XML node per component).
//!
//! The core re-reads the document on every update tick, so edits made through
//! the host's settings dialog take effect without a restart.

use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

/// Generic document-tree settings store implemented by the host.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Read the current settings document, or `None` when nothing has been
    /// persisted yet.
    async fn read(&self) -> Result<Option<Value>>;

    /// Replace the persisted settings document.
    async fn write(&self, document: Value) -> Result<()>;
}

/// In-memory settings store for tests and headless hosts.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    document: Mutex<Option<Value>>,
}

impl MemorySettingsStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a document.
    pub fn with_document(document: Value) -> Self {
        Self {
            document: Mutex::new(Some(document)),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn read(&self) -> Result<Option<Value>> {
        Ok(self.document.lock().await.clone())
    }

    async fn write(&self, document: Value) -> Result<()> {
        *self.document.lock().await = Some(document);
        Ok(())
    }
}
