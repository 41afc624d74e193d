//! Named layout management on top of a storage backend.

use crate::canvas::Canvas;
use crate::storage::{SavedLayout, Storage, StorageResult};
use std::sync::Arc;

/// Saves, loads and lists layouts for one editor.
///
/// Tracks which layout is open. Unsaved edits are reported by
/// [`Canvas::is_modified`].
pub struct LayoutLibrary<S: Storage> {
    storage: Arc<S>,
    current: Option<String>,
}

impl<S: Storage> LayoutLibrary<S> {
    pub fn new(storage: Arc<S>) -> Self {
        Self {
            storage,
            current: None,
        }
    }

    /// Name of the layout currently open.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Save the canvas shapes under `name`; it becomes the current layout.
    pub async fn save(&mut self, canvas: &mut Canvas, name: &str) -> StorageResult<()> {
        let layout = canvas.to_saved_layout(name);
        self.storage.save(name, &layout).await?;
        log::info!("Saved layout '{}' ({} shapes)", name, layout.shapes.len());

        self.current = Some(name.to_string());
        canvas.mark_saved(name);
        Ok(())
    }

    /// Load a layout by name.
    pub async fn load(&mut self, name: &str) -> StorageResult<SavedLayout> {
        let layout = self.storage.load(name).await?;
        self.current = Some(name.to_string());
        Ok(layout)
    }

    /// Load a layout, logging and returning `None` when it is missing or
    /// unreadable.
    pub async fn load_or_none(&mut self, name: &str) -> Option<SavedLayout> {
        match self.load(name).await {
            Ok(layout) => Some(layout),
            Err(e) => {
                log::warn!("Could not load layout '{}': {}", name, e);
                None
            }
        }
    }

    /// Load a layout into the canvas. Returns false if nothing was loaded.
    pub async fn open(&mut self, canvas: &mut Canvas, name: &str) -> bool {
        match self.load_or_none(name).await {
            Some(layout) => {
                canvas.apply_saved_layout(layout);
                true
            }
            None => false,
        }
    }

    /// Delete a layout. Deleting the open layout forgets its name.
    pub async fn delete(&mut self, canvas: &mut Canvas, name: &str) -> StorageResult<()> {
        self.storage.delete(name).await?;
        if self.current.as_deref() == Some(name) {
            self.current = None;
            canvas.set_layout_name(None);
        }
        Ok(())
    }

    /// All readable layouts, newest first.
    pub async fn list_all(&self) -> StorageResult<Vec<SavedLayout>> {
        let names = self.storage.list().await?;
        let mut layouts = Vec::with_capacity(names.len());
        for name in names {
            match self.storage.load(&name).await {
                Ok(layout) => layouts.push(layout),
                Err(e) => log::warn!("Skipping layout '{}': {}", name, e),
            }
        }
        layouts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(layouts)
    }

    pub async fn exists(&self, name: &str) -> StorageResult<bool> {
        self.storage.exists(name).await
    }

    pub fn storage(&self) -> &Arc<S> {
        &self.storage
    }
}

/// Create a platform-appropriate storage backend.
#[cfg(not(target_arch = "wasm32"))]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::FileStorage>> {
    Ok(Arc::new(crate::storage::FileStorage::default_location()?))
}

#[cfg(target_arch = "wasm32")]
pub fn create_default_storage() -> StorageResult<Arc<crate::storage::LocalStorage>> {
    Ok(Arc::new(crate::storage::LocalStorage::new()))
}

/// Convenience type alias for platform-specific storage.
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStorage = crate::storage::FileStorage;

#[cfg(target_arch = "wasm32")]
pub type PlatformStorage = crate::storage::LocalStorage;

/// Layout library over the platform storage.
pub type PlatformLibrary = LayoutLibrary<PlatformStorage>;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::shapes::ShapeType;
    use crate::storage::MemoryStorage;
    use chrono::{Duration, Utc};
    use kurbo::Point;
    use pollster::block_on;

    fn library() -> LayoutLibrary<MemoryStorage> {
        LayoutLibrary::new(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_save_sets_current_and_clears_modified() {
        let mut lib = library();
        let mut canvas = Canvas::new();
        canvas.place_shape(ShapeType::Square, Point::ZERO);
        assert!(canvas.is_modified());

        block_on(lib.save(&mut canvas, "Keep")).unwrap();
        assert_eq!(lib.current(), Some("Keep"));
        assert_eq!(canvas.layout_name(), Some("Keep"));
        assert!(!canvas.is_modified());
        assert!(block_on(lib.exists("Keep")).unwrap());

        canvas.rotate_selection(1.0);
        assert!(canvas.is_modified());
    }

    #[test]
    fn test_open_missing_is_noop() {
        let mut lib = library();
        let mut canvas = Canvas::new();
        canvas.place_shape(ShapeType::Square, Point::ZERO);

        assert!(!block_on(lib.open(&mut canvas, "missing")));
        assert_eq!(canvas.document.len(), 1);
        assert_eq!(lib.current(), None);
    }

    #[test]
    fn test_open_replaces_shapes() {
        let mut lib = library();
        let mut source = Canvas::new();
        source.place_shape(ShapeType::Triangle, Point::ZERO);
        source.place_shape(ShapeType::Square, Point::new(90.0, 0.0));
        block_on(lib.save(&mut source, "Outpost")).unwrap();

        let mut canvas = Canvas::new();
        assert!(block_on(lib.open(&mut canvas, "Outpost")));
        assert_eq!(canvas.document.shapes, source.document.shapes);
        assert_eq!(canvas.layout_name(), Some("Outpost"));
    }

    #[test]
    fn test_delete_current_forgets_name() {
        let mut lib = library();
        let mut canvas = Canvas::new();
        block_on(lib.save(&mut canvas, "Keep")).unwrap();

        block_on(lib.delete(&mut canvas, "Other")).unwrap();
        assert_eq!(lib.current(), Some("Keep"));

        block_on(lib.delete(&mut canvas, "Keep")).unwrap();
        assert_eq!(lib.current(), None);
        assert_eq!(canvas.layout_name(), None);
    }

    #[test]
    fn test_list_all_newest_first() {
        let storage = Arc::new(MemoryStorage::new());
        let now = Utc::now();
        for (name, age) in [("old", 3), ("new", 1), ("mid", 2)] {
            let mut layout = SavedLayout::new(name, Vec::new());
            layout.timestamp = now - Duration::hours(age);
            block_on(storage.save(name, &layout)).unwrap();
        }

        let lib = LayoutLibrary::new(storage);
        let names: Vec<String> = block_on(lib.list_all())
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }
}
