//! Generic input event types delivered by the host.

use serde::{Deserialize, Serialize};

/// Generic key representation used while the text overlay is open.
///
/// Hosts map their native key codes to these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// Printable character
    Char(char),
    /// Return/Enter key (confirm)
    Return,
    /// Backspace key
    Backspace,
    /// Escape key (cancel)
    Escape,
    /// Unmapped or unrecognized key
    Unknown,
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Primary button, draws
    #[default]
    Left,
    /// Secondary button, cancels an active gesture
    Right,
    /// Middle button (unused)
    Middle,
}

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    /// Pointer left the canvas; handled exactly like `Up`
    Leave,
}

/// A raw pointer event in host (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    #[serde(default)]
    pub button: MouseButton,
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, client_x: f64, client_y: f64) -> Self {
        Self {
            kind,
            button: MouseButton::Left,
            client_x,
            client_y,
        }
    }
}
