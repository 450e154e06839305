//! Input handling and tool state machine.
//!
//! This module translates pointer and keyboard events (already mapped to
//! canvas-local coordinates) into drawing actions. It maintains the current
//! tool, color and line width, and the state machine for gestures (idle,
//! dragging, awaiting text).

pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton, PointerEvent, PointerEventKind};
pub use state::{DrawingState, InputState, TextEntry};
pub use tool::Tool;
