//! Input model: pointer buttons, modifier keys, event targets, and gesture state.
//!
//! `InputEvent` is the wire form the host forwards from the surface. `Target`
//! names what an event landed on; hosts that know the element under the
//! pointer pass it, others leave it out and let [`crate::hit`] decide.
//! `DraggedItem` is the transient record the drag controller keeps between
//! pointer-down and pointer-up. `TextState` is the per-note interaction state
//! derived from a note's two flags.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{TextElement, TextId};

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    /// Ctrl gates wheel zoom so ordinary scrolling is left alone.
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    #[default]
    Primary,
    Middle,
    Secondary,
}

/// A keyboard key, named as the browser reports it (e.g. `"Enter"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn is_enter(&self) -> bool {
        self.0 == "Enter"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelDelta {
    pub dx: f64,
    /// Positive is scrolling down.
    pub dy: f64,
}

/// Identity of a board element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ElementRef {
    Card { key: String },
    Text { id: TextId },
}

impl ElementRef {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Card { .. } => ElementKind::Card,
            Self::Text { .. } => ElementKind::Text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Card,
    Text,
}

/// What an event landed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Target {
    Card { key: String },
    Text { id: TextId },
    /// The surface itself, not any element on it.
    Background,
}

/// The element being moved by the active drag gesture.
///
/// Positions are written as `start_pos + (pointer - start_pointer) / zoom`,
/// always relative to the pick-up point, so rounding never accumulates.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggedItem {
    pub element: ElementRef,
    /// Screen-space pointer position at pick-up.
    pub start_pointer: Point,
    /// Scene-space element position at pick-up.
    pub start_pos: Point,
}

impl DraggedItem {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.element.kind()
    }
}

/// Interaction state of one text note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextState {
    Idle,
    Selected,
    Editing,
}

impl TextState {
    /// Derive the state from a note's flags. Editing wins over selection.
    #[must_use]
    pub fn of(text: &TextElement) -> Self {
        if text.is_editing {
            Self::Editing
        } else if text.is_selected {
            Self::Selected
        } else {
            Self::Idle
        }
    }

    /// Whether a note in this state may be picked up and dragged.
    #[must_use]
    pub fn is_draggable(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// A surface input event as forwarded by the host.
///
/// Pointer positions are screen pixels relative to the surface's top-left
/// corner. A missing `target` is resolved by hit-testing `at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    PointerDown {
        at: Point,
        #[serde(default)]
        button: Button,
        #[serde(default)]
        target: Option<Target>,
    },
    PointerMove {
        at: Point,
    },
    PointerUp,
    /// The pointer left the surface.
    PointerLeave,
    Click {
        #[serde(default)]
        at: Option<Point>,
        #[serde(default)]
        target: Option<Target>,
    },
    DoubleClick {
        #[serde(default)]
        at: Option<Point>,
        #[serde(default)]
        target: Option<Target>,
    },
    Wheel {
        delta: WheelDelta,
        #[serde(default)]
        modifiers: Modifiers,
    },
    KeyDown {
        key: Key,
    },
    /// The note's inline editor lost focus.
    Blur {
        id: TextId,
    },
}
