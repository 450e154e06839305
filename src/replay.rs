//! Scripted host actions, for driving an engine without a UI.
//!
//! A script is a JSON array of actions, each tagged with `"action"`:
//!
//! ```json
//! [
//!   { "action": "select_tool", "tool": "arrow" },
//!   { "action": "set_color", "color": "blue" },
//!   { "action": "pointer", "kind": "down", "client_x": 10, "client_y": 10 },
//!   { "action": "pointer", "kind": "up", "client_x": 50, "client_y": 40 },
//!   { "action": "undo" }
//! ]
//! ```

use crate::draw::{Color, ColorParseError};
use crate::engine::AnnotationEngine;
use crate::input::{Key, PointerEvent, Tool};
use serde::{Deserialize, Serialize};

/// Everything a host can ask of an engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum HostAction {
    SelectTool { tool: Tool },
    /// Named color or hex string
    SetColor { color: String },
    SetLineWidth { width: u32 },
    Pointer(PointerEvent),
    Key { key: Key },
    SetText { text: String },
    ConfirmText,
    CancelText,
    Undo,
    Clear,
    Resize { width: f64, height: f64 },
    SetCanvasOrigin { x: f64, y: f64 },
}

impl HostAction {
    /// Performs this action on `engine`.
    pub fn apply(&self, engine: &mut AnnotationEngine) -> Result<(), ColorParseError> {
        match self {
            HostAction::SelectTool { tool } => engine.select_tool(*tool),
            HostAction::SetColor { color } => engine.set_color(color.parse::<Color>()?),
            HostAction::SetLineWidth { width } => engine.set_line_width(*width),
            HostAction::Pointer(event) => engine.handle_pointer(*event),
            HostAction::Key { key } => engine.handle_key(*key),
            HostAction::SetText { text } => engine.set_text(text),
            HostAction::ConfirmText => {
                engine.confirm_text();
            }
            HostAction::CancelText => engine.cancel_text(),
            HostAction::Undo => {
                engine.undo();
            }
            HostAction::Clear => engine.clear(),
            HostAction::Resize { width, height } => engine.resize_container(*width, *height),
            HostAction::SetCanvasOrigin { x, y } => engine.set_canvas_origin(*x, *y),
        }
        Ok(())
    }
}

/// Parses a JSON action script.
pub fn parse_script(json: &str) -> serde_json::Result<Vec<HostAction>> {
    serde_json::from_str(json)
}
