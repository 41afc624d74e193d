//! Input event types for pointer, wheel and keyboard handling.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };

    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        modifiers: Modifiers,
    },
    /// Wheel scroll; positive `delta.y` means scrolling down.
    Scroll {
        position: Point,
        delta: Vec2,
        modifiers: Modifiers,
    },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Scroll { position, .. } => position,
        }
    }

    pub fn modifiers(&self) -> Modifiers {
        match *self {
            PointerEvent::Down { modifiers, .. }
            | PointerEvent::Up { modifiers, .. }
            | PointerEvent::Move { modifiers, .. }
            | PointerEvent::Scroll { modifiers, .. } => modifiers,
        }
    }
}

/// A key press, named the way browsers report `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
        }
    }
}
