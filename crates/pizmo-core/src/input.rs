//! Pointer and modifier input delivered by the host.

use kurbo::Point;
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
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// Shift on press extends the bone selection instead of replacing it.
    pub fn additive(&self) -> bool {
        self.shift
    }

    /// Ctrl while dragging snaps the delta to fixed increments.
    pub fn snap(&self) -> bool {
        self.ctrl
    }

    /// Shift while dragging slows the delta down for fine control.
    pub fn precise(&self) -> bool {
        self.shift
    }

    /// Alt switches to the widget's secondary drag action.
    pub fn secondary(&self) -> bool {
        self.alt
    }
}

/// Pointer event in region pixels, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Move {
        position: Point,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    /// Focus lost or the host aborted the modal drag.
    Cancel,
}

impl PointerEvent {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Move { position, .. }
            | PointerEvent::Up { position, .. } => Some(*position),
            PointerEvent::Cancel => None,
        }
    }

    /// Modifier state carried by the event, if any.
    pub fn modifiers(&self) -> Modifiers {
        match self {
            PointerEvent::Down { modifiers, .. } | PointerEvent::Move { modifiers, .. } => *modifiers,
            PointerEvent::Up { .. } | PointerEvent::Cancel => Modifiers::NONE,
        }
    }
}
