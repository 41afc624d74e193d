//! Base Builder Core Library
//!
//! Platform-agnostic geometry, snapping and editing logic for the base
//! builder canvas.

pub mod camera;
pub mod canvas;
pub mod config;
pub mod events;
pub mod fief;
pub mod groups;
pub mod history;
pub mod input;
pub mod selection;
pub mod shapes;
pub mod shortcuts;
pub mod snap;
pub mod storage;
pub mod tools;

pub use camera::Camera;
pub use canvas::{Canvas, CanvasDocument};
pub use config::{ConfigError, EditorConfig, SnapSettings};
pub use events::EventHandler;
pub use fief::FiefOverlay;
pub use groups::{Group, GroupChange, GroupSet};
pub use history::{DocumentSnapshot, History};
pub use selection::Selection;
pub use shapes::{Edge, PlacedShape, ShapeType, normalize_angle};
pub use snap::{Alignment, EdgeSnap, snap_shape, snap_to_cell};
pub use storage::{LayoutLibrary, SavedLayout, Storage, StorageError, StorageResult};
pub use tools::ToolKind;
