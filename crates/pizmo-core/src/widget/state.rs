//! Widget state definitions.

use super::drag::DragSession;

/// Interaction state of a widget.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    /// No interaction.
    #[default]
    Idle,
    /// Pressed, pointer not moved yet.
    Armed(DragSession),
    /// Pointer moved while pressed; the bone is being posed.
    Dragging(DragSession),
}

impl DragState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if the widget is armed or dragging.
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging(_))
    }

    pub fn session(&self) -> Option<&DragSession> {
        match self {
            Self::Idle => None,
            Self::Armed(session) | Self::Dragging(session) => Some(session),
        }
    }
}

/// Color state of a widget. Selection wins over hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorState {
    #[default]
    Normal,
    /// Pointer is over the widget.
    Highlighted,
    /// The bound bone is selected.
    Selected,
}

impl ColorState {
    pub fn resolve(selected: bool, hovered: bool) -> Self {
        if selected {
            Self::Selected
        } else if hovered {
            Self::Highlighted
        } else {
            Self::Normal
        }
    }
}
