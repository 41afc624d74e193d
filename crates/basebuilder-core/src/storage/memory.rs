//! In-memory storage implementation.

use super::{BoxFuture, SavedLayout, Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStorage {
    layouts: RwLock<HashMap<String, SavedLayout>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl Storage for MemoryStorage {
    fn save(&self, name: &str, layout: &SavedLayout) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        let layout = layout.clone();
        Box::pin(async move {
            let mut layouts = self.layouts.write().map_err(lock_error)?;
            layouts.insert(name, layout);
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<SavedLayout>> {
        let name = name.to_string();
        Box::pin(async move {
            let layouts = self.layouts.read().map_err(lock_error)?;
            layouts
                .get(&name)
                .cloned()
                .ok_or(StorageError::NotFound(name))
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let name = name.to_string();
        Box::pin(async move {
            let mut layouts = self.layouts.write().map_err(lock_error)?;
            layouts.remove(&name);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let layouts = self.layouts.read().map_err(lock_error)?;
            Ok(layouts.keys().cloned().collect())
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let name = name.to_string();
        Box::pin(async move {
            let layouts = self.layouts.read().map_err(lock_error)?;
            Ok(layouts.contains_key(&name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{PlacedShape, ShapeType};
    use chrono::{Duration, Utc};
    use kurbo::Point;
    use pollster::block_on;

    fn square_at(x: f64) -> PlacedShape {
        PlacedShape::new(ShapeType::Square, Point::new(x, 15.0), 30.0)
    }

    #[test]
    fn test_resave_replaces_layout() {
        let storage = MemoryStorage::new();
        let mut first = SavedLayout::new("Keep", vec![square_at(15.0)]);
        first.timestamp = Utc::now() - Duration::days(1);
        block_on(storage.save("Keep", &first)).unwrap();

        let second = SavedLayout::new("Keep", vec![square_at(45.0), square_at(75.0)]);
        block_on(storage.save("Keep", &second)).unwrap();

        let loaded = block_on(storage.load("Keep")).unwrap();
        assert_eq!(loaded.shapes, second.shapes);
        assert_eq!(loaded.timestamp, second.timestamp);
        assert!(loaded.timestamp > first.timestamp);
        assert_eq!(block_on(storage.list()).unwrap(), vec!["Keep".to_string()]);
    }

    #[test]
    fn test_names_are_exact() {
        let storage = MemoryStorage::new();
        block_on(storage.save("Keep 1", &SavedLayout::new("Keep 1", vec![square_at(15.0)])))
            .unwrap();
        block_on(storage.save("keep 1", &SavedLayout::new("keep 1", Vec::new()))).unwrap();

        assert_eq!(block_on(storage.load("Keep 1")).unwrap().shapes.len(), 1);
        assert!(block_on(storage.load("keep 1")).unwrap().shapes.is_empty());
        assert!(matches!(
            block_on(storage.load("Keep_1")),
            Err(StorageError::NotFound(name)) if name == "Keep_1"
        ));
    }

    #[test]
    fn test_delete_is_idempotent() {
        let storage = MemoryStorage::new();
        block_on(storage.save("a", &SavedLayout::new("a", Vec::new()))).unwrap();
        assert!(block_on(storage.exists("a")).unwrap());

        block_on(storage.delete("a")).unwrap();
        block_on(storage.delete("a")).unwrap();
        assert!(!block_on(storage.exists("a")).unwrap());
        assert!(block_on(storage.list()).unwrap().is_empty());
    }
}
