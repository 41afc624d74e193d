//! File-based storage implementation for native platforms.

use super::{BoxFuture, SavedLayout, Storage, StorageError, StorageResult};
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage for native platforms.
///
/// Stores each layout as a JSON file in a directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a new file storage with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the default location.
    ///
    /// On Unix: `~/.local/share/basebuilder/layouts/`
    /// On Windows: `%LOCALAPPDATA%\basebuilder\layouts\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("basebuilder").join("layouts"))
    }

    /// File path for a layout name.
    ///
    /// Bytes outside `[A-Za-z0-9_-]` are written as `%XX`, so distinct names
    /// never share a file.
    fn layout_path(&self, name: &str) -> PathBuf {
        let mut encoded = String::with_capacity(name.len());
        for byte in name.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                encoded.push(char::from(byte));
            } else {
                encoded.push_str(&format!("%{:02X}", byte));
            }
        }
        self.base_path.join(format!("{}.json", encoded))
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

/// Layout name recorded in an existing file, if it can be read.
fn stored_name(path: &Path) -> Option<String> {
    let json = fs::read_to_string(path).ok()?;
    SavedLayout::from_json(&json).ok().map(|layout| layout.name)
}

impl Storage for FileStorage {
    fn save(&self, name: &str, layout: &SavedLayout) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.layout_path(name);
        let json = layout.to_json();
        let name = name.to_string();

        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            if let Some(existing) = stored_name(&path) {
                if existing != name {
                    return Err(StorageError::Other(format!(
                        "'{}' would overwrite layout '{}' at {}",
                        name,
                        existing,
                        path.display()
                    )));
                }
            }
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", path.display(), e))
            })?;
            log::info!("Saved layout to {}", path.display());
            Ok(())
        })
    }

    fn load(&self, name: &str) -> BoxFuture<'_, StorageResult<SavedLayout>> {
        let path = self.layout_path(name);
        let name = name.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(name));
            }

            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;

            let layout = SavedLayout::from_json(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })?;
            if layout.name != name {
                log::warn!(
                    "{} holds layout '{}', not '{}'",
                    path.display(),
                    layout.name,
                    name
                );
                return Err(StorageError::NotFound(name));
            }
            Ok(layout)
        })
    }

    fn delete(&self, name: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.layout_path(name);

        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {}", path.display(), e))
                })?;
            }
            Ok(())
        })
    }

    /// Names come from the stored records rather than the encoded file names.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();

        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }

            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {}", e)))?;

            let mut names = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }
                match stored_name(&path) {
                    Some(name) => names.push(name),
                    None => log::warn!("Skipping unreadable layout {}", path.display()),
                }
            }
            Ok(names)
        })
    }

    fn exists(&self, name: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.layout_path(name);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{PlacedShape, ShapeType};
    use kurbo::Point;
    use pollster::block_on;
    use tempfile::tempdir;

    fn layout(name: &str) -> SavedLayout {
        SavedLayout::new(
            name,
            vec![PlacedShape::new(ShapeType::Square, Point::new(15.0, 15.0), 30.0)],
        )
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("keep", &layout("keep"))).unwrap();
        let loaded = block_on(storage.load("keep")).unwrap();

        assert_eq!(loaded.name, "keep");
        assert_eq!(loaded.shapes.len(), 1);
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_list_uses_layout_names() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("North Keep", &layout("North Keep"))).unwrap();
        block_on(storage.save("south", &layout("south"))).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let mut list = block_on(storage.list()).unwrap();
        list.sort();
        assert_eq!(list, vec!["North Keep".to_string(), "south".to_string()]);
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();

        let result = block_on(storage.load("broken"));
        assert!(matches!(result, Err(StorageError::Serialization(_))));
        assert!(block_on(storage.list()).unwrap().is_empty());
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("test", &layout("test"))).unwrap();
        assert!(block_on(storage.exists("test")).unwrap());

        block_on(storage.delete("test")).unwrap();
        assert!(!block_on(storage.exists("test")).unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_name() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("test/doc:with*special", &layout("test/doc:with*special"))).unwrap();
        let loaded = block_on(storage.load("test/doc:with*special")).unwrap();
        assert_eq!(loaded.name, "test/doc:with*special");
    }

    #[test]
    fn test_file_storage_similar_names_stay_separate() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("Keep 1", &layout("Keep 1"))).unwrap();
        block_on(storage.save("Keep_1", &SavedLayout::new("Keep_1", Vec::new()))).unwrap();
        block_on(storage.save("a/b", &layout("a/b"))).unwrap();
        block_on(storage.save("a:b", &layout("a:b"))).unwrap();

        let kept = block_on(storage.load("Keep 1")).unwrap();
        assert_eq!(kept.name, "Keep 1");
        assert_eq!(kept.shapes.len(), 1);
        assert!(block_on(storage.load("Keep_1")).unwrap().shapes.is_empty());

        let mut list = block_on(storage.list()).unwrap();
        list.sort();
        assert_eq!(list, vec!["Keep 1", "Keep_1", "a/b", "a:b"]);

        block_on(storage.delete("Keep_1")).unwrap();
        assert!(block_on(storage.exists("Keep 1")).unwrap());
    }

    #[test]
    fn test_file_storage_rejects_foreign_record() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let path = storage.layout_path("west");
        fs::write(&path, layout("east").to_json().unwrap()).unwrap();

        assert!(matches!(
            block_on(storage.load("west")),
            Err(StorageError::NotFound(_))
        ));
        assert!(matches!(
            block_on(storage.save("west", &layout("west"))),
            Err(StorageError::Other(_))
        ));
        assert_eq!(stored_name(&path).as_deref(), Some("east"));
    }
}
