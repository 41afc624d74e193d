//! Keyboard shortcut registry.

use crate::input::{KeyEvent, Modifiers};
use crate::tools::ToolKind;

/// Editor action a shortcut triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectTool(ToolKind),
    /// Rotate the selection by one step; `true` for the negative direction.
    Rotate { reverse: bool },
    Delete,
    Copy,
    Paste,
    Undo,
    Redo,
    GroupOrUngroup,
}

/// A keyboard shortcut definition.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub key: &'static str,
    /// Requires Ctrl (or Cmd).
    pub ctrl: bool,
    /// Required Shift state; `None` accepts either.
    pub shift: Option<bool>,
    pub action: Action,
    pub description: &'static str,
}

impl Shortcut {
    pub const fn new(
        key: &'static str,
        ctrl: bool,
        shift: Option<bool>,
        action: Action,
        description: &'static str,
    ) -> Self {
        Self {
            key,
            ctrl,
            shift,
            action,
            description,
        }
    }

    /// Format the shortcut for display (e.g., "Ctrl+Shift+Z").
    pub fn format(&self) -> String {
        let mut parts = Vec::new();
        if self.ctrl {
            parts.push("Ctrl");
        }
        if self.shift == Some(true) {
            parts.push("Shift");
        }
        parts.push(self.key);
        parts.join("+")
    }

    fn matches(&self, key: &str, modifiers: Modifiers) -> bool {
        if !self.key.eq_ignore_ascii_case(key) {
            return false;
        }
        if self.ctrl && !modifiers.command() {
            return false;
        }
        self.shift.is_none_or(|shift| shift == modifiers.shift)
    }
}

/// Registry of all keyboard shortcuts.
pub struct ShortcutRegistry;

impl ShortcutRegistry {
    /// All shortcuts in priority order.
    pub fn all() -> Vec<Shortcut> {
        vec![
            Shortcut::new("1", false, None, Action::SelectTool(ToolKind::Square), "Square tool"),
            Shortcut::new("2", false, None, Action::SelectTool(ToolKind::Triangle), "Triangle tool"),
            Shortcut::new(
                "3",
                false,
                None,
                Action::SelectTool(ToolKind::RightTriangle),
                "Right triangle tool",
            ),
            Shortcut::new("4", false, None, Action::SelectTool(ToolKind::Select), "Select tool"),
            Shortcut::new("R", false, Some(false), Action::Rotate { reverse: false }, "Rotate selection"),
            Shortcut::new(
                "R",
                false,
                Some(true),
                Action::Rotate { reverse: true },
                "Rotate selection backwards",
            ),
            Shortcut::new("Backspace", false, None, Action::Delete, "Delete selected shapes"),
            Shortcut::new("Delete", false, None, Action::Delete, "Delete selected shapes"),
            Shortcut::new("C", true, None, Action::Copy, "Copy shapes"),
            Shortcut::new("V", true, None, Action::Paste, "Paste shapes"),
            Shortcut::new("Z", true, Some(false), Action::Undo, "Undo"),
            Shortcut::new("Y", true, None, Action::Redo, "Redo"),
            Shortcut::new("Z", true, Some(true), Action::Redo, "Redo"),
            Shortcut::new("G", true, None, Action::GroupOrUngroup, "Group or ungroup selection"),
        ]
    }

    /// Resolve a key press to the first matching action.
    pub fn resolve(event: &KeyEvent) -> Option<Action> {
        Self::all()
            .into_iter()
            .find(|shortcut| shortcut.matches(&event.key, event.modifiers))
            .map(|shortcut| shortcut.action)
    }
}
