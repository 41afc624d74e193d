//! Storage abstraction for saved layouts.

mod library;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

#[cfg(target_arch = "wasm32")]
mod local;

pub use library::{LayoutLibrary, PlatformLibrary, PlatformStorage, create_default_storage};
pub use memory::MemoryStorage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorage;

use crate::shapes::PlacedShape;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Layout not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A named, persisted layout.
///
/// Groups are not persisted; only the shapes and when they were saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedLayout {
    pub name: String,
    pub shapes: Vec<PlacedShape>,
    pub timestamp: DateTime<Utc>,
}

impl SavedLayout {
    /// Create a layout stamped with the current time.
    pub fn new(name: impl Into<String>, shapes: Vec<PlacedShape>) -> Self {
        Self {
            name: name.into(),
            shapes,
            timestamp: Utc::now(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Trait for layout storage backends.
///
/// Note: On native platforms, implementations must be Send + Sync.
/// On WASM, these bounds are relaxed since it's single-threaded.
#[cfg(not(target_arch = "wasm32"))]
pub trait Storage: Send + Sync {
    /// Save a layout under `name`, replacing any previous one.
    fn save(&self, name: &str, layout: &SavedLayout) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a layout.
    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<SavedLayout>>;

    /// Delete a layout. Deleting a missing layout is not an error.
    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all layout names.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a layout exists.
    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Trait for layout storage backends (WASM version without Send + Sync).
#[cfg(target_arch = "wasm32")]
pub trait Storage {
    /// Save a layout under `name`, replacing any previous one.
    fn save(&self, name: &str, layout: &SavedLayout) -> BoxFuture<'_, StorageResult<()>>;

    /// Load a layout.
    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<SavedLayout>>;

    /// Delete a layout. Deleting a missing layout is not an error.
    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>>;

    /// List all layout names.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>>;

    /// Check if a layout exists.
    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
