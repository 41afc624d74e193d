//! Canvas document and editor state.

use crate::camera::Camera;
use crate::config::EditorConfig;
use crate::fief::FiefOverlay;
use crate::groups::{Group, GroupChange, GroupSet};
use crate::history::{DocumentSnapshot, History};
use crate::selection::Selection;
use crate::shapes::{PlacedShape, ShapeType, centroid, normalize_angle, shape_at};
use crate::snap::{EdgeSnap, snap_shape, snap_to_cell};
use crate::storage::SavedLayout;
use crate::tools::ToolKind;
use kurbo::{Point, Size, Vec2};
use std::collections::BTreeSet;

/// Default viewport used until the host reports its size.
pub const DEFAULT_VIEWPORT: Size = Size::new(800.0, 600.0);

/// The editable layout: placed shapes and their groups.
///
/// All operations validate indices; out-of-range entries are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasDocument {
    pub shapes: Vec<PlacedShape>,
    pub groups: GroupSet,
}

impl CanvasDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PlacedShape> {
        self.shapes.get(index)
    }

    /// Deep copy for the history stack.
    pub fn snapshot(&self) -> DocumentSnapshot {
        DocumentSnapshot {
            shapes: self.shapes.clone(),
            groups: self.groups.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: DocumentSnapshot) {
        self.shapes = snapshot.shapes;
        self.groups = snapshot.groups;
    }

    /// Topmost shape under a canvas point.
    pub fn shape_at(&self, point: Point) -> Option<usize> {
        shape_at(point, &self.shapes)
    }

    /// Append a shape centred in the grid cell containing `point`.
    pub fn place(&mut self, kind: ShapeType, point: Point, grid_size: f64) -> usize {
        let center = snap_to_cell(point, grid_size);
        self.shapes.push(PlacedShape::new(kind, center, grid_size));
        self.shapes.len() - 1
    }

    pub fn translate<'a>(&mut self, indices: impl IntoIterator<Item = &'a usize>, delta: Vec2) {
        for &index in indices {
            if let Some(shape) = self.shapes.get_mut(index) {
                shape.translate(delta);
            }
        }
    }

    /// Rotate one shape about its own centre.
    pub fn rotate_one(&mut self, index: usize, step: f64) -> bool {
        match self.shapes.get_mut(index) {
            Some(shape) => {
                shape.rotate_by(step);
                true
            }
            None => false,
        }
    }

    /// Rotate several shapes as a rigid body about the mean of their centres.
    pub fn rotate_around_centroid(&mut self, indices: &BTreeSet<usize>, step: f64) {
        let valid: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.shapes.len())
            .collect();
        let Some(pivot) = centroid(valid.iter().map(|&i| &self.shapes[i])) else {
            return;
        };

        let (sin, cos) = step.sin_cos();
        for index in valid {
            let shape = &mut self.shapes[index];
            let rel = shape.center() - pivot;
            let rotated = Vec2::new(rel.x * cos - rel.y * sin, rel.x * sin + rel.y * cos);
            shape.set_center(pivot + rotated);
            shape.rotation = normalize_angle(shape.rotation + step);
        }
    }

    /// Remove shapes and renumber groups. Returns how many were removed.
    pub fn delete(&mut self, indices: &BTreeSet<usize>) -> usize {
        let valid: BTreeSet<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.shapes.len())
            .collect();
        for &index in valid.iter().rev() {
            self.shapes.remove(index);
        }
        self.groups.remove_indices(&valid);
        valid.len()
    }

    /// Detached copies of the given shapes, in index order.
    pub fn copy(&self, indices: &BTreeSet<usize>) -> Vec<PlacedShape> {
        indices
            .iter()
            .filter_map(|&i| self.shapes.get(i).copied())
            .collect()
    }

    /// Append copies centred on `at`. Multiple shapes become a new group.
    pub fn paste(&mut self, shapes: &[PlacedShape], at: Point) -> Vec<usize> {
        let Some(center) = centroid(shapes) else {
            return Vec::new();
        };
        let offset = at - center;
        let start = self.shapes.len();
        self.shapes.extend(shapes.iter().map(|shape| {
            let mut pasted = *shape;
            pasted.translate(offset);
            pasted
        }));
        let added: Vec<usize> = (start..self.shapes.len()).collect();
        if added.len() > 1 {
            self.groups.push(Group::new(added.iter().copied()));
        }
        added
    }

    pub fn group_or_ungroup(&mut self, indices: &BTreeSet<usize>) -> GroupChange {
        self.groups.group_or_ungroup(indices)
    }

    /// Run edge snapping for one shape.
    pub fn snap(&mut self, index: usize, grid_size: f64, config: &EditorConfig) -> Option<EdgeSnap> {
        snap_shape(&mut self.shapes, index, grid_size, &config.snap)
    }
}

/// Editor state: the document plus everything needed to edit it.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub document: CanvasDocument,
    pub camera: Camera,
    pub selection: Selection,
    history: History,
    tool: ToolKind,
    fief: FiefOverlay,
    clipboard: Option<Vec<PlacedShape>>,
    config: EditorConfig,
    viewport_size: Size,
    grid_size: f64,
    layout_name: Option<String>,
    /// Edited since the last save, load or new layout.
    modified: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas {
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    /// Build a canvas from `config`, falling back to defaults if it is invalid.
    pub fn with_config(config: EditorConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("Using default editor config: {}", e);
                EditorConfig::default()
            }
        };
        let mut canvas = Self {
            document: CanvasDocument::new(),
            camera: Camera::with_zoom_range(config.min_zoom, config.max_zoom),
            selection: Selection::new(),
            history: History::new(config.history_limit),
            tool: ToolKind::default(),
            fief: FiefOverlay::default(),
            clipboard: None,
            viewport_size: DEFAULT_VIEWPORT,
            grid_size: 0.0,
            layout_name: None,
            modified: false,
            config,
        };
        canvas.set_viewport_size(DEFAULT_VIEWPORT.width, DEFAULT_VIEWPORT.height);
        canvas
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn viewport_size(&self) -> Size {
        self.viewport_size
    }

    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Update the viewport and recompute the grid cell size.
    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
        self.grid_size = (height / self.config.grid_divisions).floor().max(1.0);
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    /// Switch tools; picking a shape tool drops the selection.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
        if tool.shape_type().is_some() {
            self.selection.clear();
        }
    }

    pub fn fief(&self) -> FiefOverlay {
        self.fief
    }

    pub fn set_fief(&mut self, overlay: FiefOverlay) {
        self.fief = overlay;
    }

    pub fn clipboard(&self) -> Option<&[PlacedShape]> {
        self.clipboard.as_deref()
    }

    pub fn layout_name(&self) -> Option<&str> {
        self.layout_name.as_deref()
    }

    /// Whether the document changed since it was last saved or loaded.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Convert a screen point to canvas coordinates.
    pub fn screen_to_canvas(&self, point: Point) -> Point {
        self.camera.screen_to_canvas(point)
    }

    /// Additive zoom about the viewport centre.
    pub fn zoom_by(&mut self, delta: f64) -> bool {
        self.camera.zoom_by(delta, self.viewport_size)
    }

    pub fn zoom_in(&mut self) -> bool {
        self.zoom_by(self.config.zoom_step)
    }

    pub fn zoom_out(&mut self) -> bool {
        self.zoom_by(-self.config.zoom_step)
    }

    /// Save the current document for undo. Call before a mutation.
    pub fn push_undo(&mut self) {
        self.history.record(self.document.snapshot());
        self.modified = true;
        log::debug!("Recorded undo snapshot ({} entries)", self.history.undo_len());
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(self.document.snapshot()) {
            Some(previous) => {
                self.document.restore(previous);
                self.selection.clear();
                self.modified = true;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(self.document.snapshot()) {
            Some(next) => {
                self.document.restore(next);
                self.selection.clear();
                self.modified = true;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Place a shape at a canvas point and select it.
    pub fn place_shape(&mut self, kind: ShapeType, point: Point) -> usize {
        self.push_undo();
        let index = self.document.place(kind, point, self.grid_size);
        self.selection.select_only(index);
        index
    }

    /// Move the selection. A lone shape is snapped afterwards when `snap` is set.
    ///
    /// History is left to the caller so a drag records once per gesture.
    pub fn translate_selection(&mut self, delta: Vec2, snap: bool) -> Option<EdgeSnap> {
        self.document.translate(self.selection.indices(), delta);
        if snap && self.selection.len() == 1 {
            let index = *self.selection.indices().first()?;
            return self.document.snap(index, self.grid_size, &self.config);
        }
        None
    }

    /// Rotate the selection by `steps` rotation steps (negative reverses).
    ///
    /// A single shape turns about its centre and is then snapped; several
    /// shapes turn about their centroid without snapping.
    pub fn rotate_selection(&mut self, steps: f64) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.push_undo();
        let step = steps * self.config.rotation_step;

        if self.selection.len() == 1 {
            if let Some(&index) = self.selection.indices().first() {
                self.document.rotate_one(index, step);
                self.document.snap(index, self.grid_size, &self.config);
            }
        } else {
            let indices = self.selection.indices().clone();
            self.document.rotate_around_centroid(&indices, step);
        }
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        if self.selection.is_empty() {
            return false;
        }
        self.push_undo();
        let removed = self.document.delete(self.selection.indices());
        self.selection.clear();
        log::debug!("Deleted {} shapes", removed);
        true
    }

    pub fn copy_selection(&mut self) -> bool {
        let copied = self.document.copy(self.selection.indices());
        if copied.is_empty() {
            return false;
        }
        self.clipboard = Some(copied);
        true
    }

    /// Paste the clipboard centred on a canvas point and select the copies.
    pub fn paste_at(&mut self, point: Point) -> bool {
        let Some(clipboard) = self.clipboard.as_ref().filter(|c| !c.is_empty()) else {
            return false;
        };
        let shapes = clipboard.clone();
        self.push_undo();
        let added = self.document.paste(&shapes, point);
        self.selection.select_many(added);
        true
    }

    pub fn group_or_ungroup_selection(&mut self) -> GroupChange {
        if self.selection.len() <= 1 {
            return GroupChange::Unchanged;
        }
        self.push_undo();
        let indices = self.selection.indices().clone();
        self.document.group_or_ungroup(&indices)
    }

    /// Start a fresh, named layout with empty history.
    pub fn new_layout(&mut self, name: impl Into<String>) {
        self.document = CanvasDocument::new();
        self.selection.clear();
        self.history.clear();
        self.layout_name = Some(name.into());
        self.modified = false;
    }

    /// Snapshot the shapes as a persistable layout.
    pub fn to_saved_layout(&self, name: impl Into<String>) -> SavedLayout {
        SavedLayout::new(name, self.document.shapes.clone())
    }

    /// Replace the shapes with a saved layout.
    ///
    /// Groups and selection are dropped; undo history is kept.
    pub fn apply_saved_layout(&mut self, layout: SavedLayout) {
        self.document.shapes = layout.shapes;
        self.document.groups.clear();
        self.selection.clear();
        self.layout_name = Some(layout.name);
        self.modified = false;
    }

    pub(crate) fn set_layout_name(&mut self, name: Option<String>) {
        self.layout_name = name;
    }

    /// Record that the document was written out under `name`.
    pub(crate) fn mark_saved(&mut self, name: &str) {
        self.layout_name = Some(name.to_string());
        self.modified = false;
    }
}
