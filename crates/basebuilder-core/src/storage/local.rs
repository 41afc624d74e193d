//! Browser localStorage backend for WASM.
//!
//! All layouts live under a single key as one JSON object mapping layout
//! name to layout, the format the browser builder has always written.

use super::{BoxFuture, SavedLayout, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use wasm_bindgen::JsValue;

/// localStorage key holding every saved layout.
pub const STORAGE_KEY: &str = "muadibCanvases";

/// localStorage-backed layout storage.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backend() -> StorageResult<web_sys::Storage> {
        web_sys::window()
            .ok_or_else(|| StorageError::Other("No window".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Other("localStorage unavailable".to_string()))
    }

    /// Read the whole map; a missing key is an empty map.
    fn read_all() -> StorageResult<HashMap<String, SavedLayout>> {
        let raw = Self::backend()?.get_item(STORAGE_KEY).map_err(js_error)?;
        match raw {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(HashMap::new()),
        }
    }

    fn write_all(layouts: &HashMap<String, SavedLayout>) -> StorageResult<()> {
        let json = serde_json::to_string(layouts)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        Self::backend()?
            .set_item(STORAGE_KEY, &json)
            .map_err(js_error)
    }
}

fn js_error(value: JsValue) -> StorageError {
    StorageError::Other(format!("{:?}", value))
}

impl Storage for LocalStorage {
    fn save(&self, name: &str, layout: &SavedLayout) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        let layout = layout.clone();
        Box::pin(async move {
            let mut layouts = Self::read_all()?;
            layouts.insert(name, layout);
            Self::write_all(&layouts)
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<SavedLayout>> {
        let name = name.to_string();
        Box::pin(async move {
            Self::read_all()?
                .remove(&name)
                .ok_or(StorageError::NotFound(name))
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        Box::pin(async move {
            let mut layouts = Self::read_all()?;
            if layouts.remove(&name).is_some() {
                Self::write_all(&layouts)?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move { Ok(Self::read_all()?.into_keys().collect()) })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move { Ok(Self::read_all()?.contains_key(&name)) })
    }
}
