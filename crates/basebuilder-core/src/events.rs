//! Gesture handling: turns pointer, wheel and key events into canvas edits.

use crate::canvas::Canvas;
use crate::input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::selection::SelectionRect;
use crate::shortcuts::{Action, ShortcutRegistry};
use crate::snap::EdgeSnap;
use kurbo::{Point, Rect, Vec2};

/// An in-progress shape drag.
#[derive(Debug, Clone, Copy)]
struct DragState {
    /// Last pointer position in canvas coordinates.
    last: Point,
    /// Whether this gesture already saved an undo snapshot.
    recorded: bool,
}

/// Tracks gesture state across pointer events and drives a [`Canvas`].
#[derive(Debug, Default)]
pub struct EventHandler {
    drag: Option<DragState>,
    /// Last screen position while panning.
    pan: Option<Point>,
    selection_rect: Option<SelectionRect>,
    /// Last known pointer position in screen coordinates.
    last_pointer: Option<Point>,
    /// Most recent snap, for highlighting the joined edges.
    pub last_snap: Option<EdgeSnap>,
}

impl EventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    pub fn is_selecting(&self) -> bool {
        self.selection_rect.is_some()
    }

    /// Rubber-band rectangle in canvas coordinates, if one is being dragged.
    pub fn selection_rect(&self) -> Option<Rect> {
        self.selection_rect.as_ref().map(SelectionRect::to_rect)
    }

    /// Dispatch any pointer event.
    pub fn handle_pointer(&mut self, canvas: &mut Canvas, event: PointerEvent) {
        match event {
            PointerEvent::Down {
                position,
                button,
                modifiers,
            } => self.pointer_down(canvas, position, button, modifiers),
            PointerEvent::Move {
                position,
                modifiers,
            } => self.pointer_move(canvas, position, modifiers),
            PointerEvent::Up {
                position, button, ..
            } => self.pointer_up(canvas, position, button),
            PointerEvent::Scroll { delta, .. } => self.wheel(canvas, delta.y),
        }
    }

    pub fn pointer_down(
        &mut self,
        canvas: &mut Canvas,
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    ) {
        self.last_pointer = Some(position);

        if button == MouseButton::Right {
            self.pan = Some(position);
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        let point = canvas.screen_to_canvas(position);
        let hit = canvas.document.shape_at(point);

        match (canvas.tool().shape_type(), hit) {
            (None, None) => {
                canvas.selection.begin_box(modifiers.ctrl);
                self.selection_rect = Some(SelectionRect::new(point));
            }
            (None, Some(index)) => {
                canvas
                    .selection
                    .toggle(index, modifiers.ctrl, &canvas.document.groups);
                if canvas.selection.contains(index) {
                    self.start_drag(point);
                }
            }
            (Some(kind), None) => {
                canvas.place_shape(kind, point);
            }
            (Some(_), Some(index)) => {
                if !canvas.selection.contains(index) && !modifiers.ctrl {
                    canvas.selection.select_only(index);
                }
                self.start_drag(point);
            }
        }
    }

    fn start_drag(&mut self, point: Point) {
        self.drag = Some(DragState {
            last: point,
            recorded: false,
        });
    }

    pub fn pointer_move(&mut self, canvas: &mut Canvas, position: Point, modifiers: Modifiers) {
        self.last_pointer = Some(position);

        if let Some(last) = self.pan {
            canvas.camera.pan(position - last);
            self.pan = Some(position);
            return;
        }

        let point = canvas.screen_to_canvas(position);
        if let Some(rect) = self.selection_rect.as_mut() {
            rect.update(point);
            return;
        }

        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if canvas.selection.is_empty() {
            return;
        }
        let delta: Vec2 = point - drag.last;
        if delta == Vec2::ZERO {
            return;
        }

        if !drag.recorded {
            canvas.push_undo();
            drag.recorded = true;
        }
        drag.last = point;
        if let Some(snap) = canvas.translate_selection(delta, !modifiers.ctrl) {
            self.last_snap = Some(snap);
        }
    }

    pub fn pointer_up(&mut self, canvas: &mut Canvas, position: Point, button: MouseButton) {
        self.last_pointer = Some(position);

        if button == MouseButton::Right {
            self.pan = None;
            return;
        }

        if let Some(mut rect) = self.selection_rect.take() {
            rect.update(canvas.screen_to_canvas(position));
            let shapes = &canvas.document.shapes;
            canvas.selection.finish_box(rect.to_rect(), shapes);
        }
        self.drag = None;
    }

    /// Wheel input: zoom with nothing selected, rotate otherwise.
    ///
    /// Positive `delta_y` (scrolling down) zooms out or rotates positively.
    pub fn wheel(&mut self, canvas: &mut Canvas, delta_y: f64) {
        if canvas.selection.is_empty() {
            if delta_y > 0.0 {
                canvas.zoom_out();
            } else {
                canvas.zoom_in();
            }
            return;
        }

        let steps = if delta_y > 0.0 { 1.0 } else { -1.0 };
        canvas.rotate_selection(steps);
    }

    /// Handle a key press. Returns the action performed, if any.
    pub fn key_down(&mut self, canvas: &mut Canvas, event: &KeyEvent) -> Option<Action> {
        let action = ShortcutRegistry::resolve(event)?;
        match action {
            Action::SelectTool(tool) => canvas.set_tool(tool),
            Action::Rotate { reverse } => {
                canvas.rotate_selection(if reverse { -1.0 } else { 1.0 });
            }
            Action::Delete => {
                canvas.delete_selected();
            }
            Action::Copy => {
                canvas.copy_selection();
            }
            Action::Paste => {
                let at = self.paste_target(canvas);
                canvas.paste_at(at);
            }
            Action::Undo => {
                canvas.undo();
            }
            Action::Redo => {
                canvas.redo();
            }
            Action::GroupOrUngroup => {
                canvas.group_or_ungroup_selection();
            }
        }
        Some(action)
    }

    /// Canvas point under the last pointer, or under the viewport centre.
    fn paste_target(&self, canvas: &Canvas) -> Point {
        let screen = self.last_pointer.unwrap_or_else(|| {
            let size = canvas.viewport_size();
            canvas.camera.viewport_origin + Vec2::new(size.width / 2.0, size.height / 2.0)
        });
        canvas.screen_to_canvas(screen)
    }
}
