//! Drawing tool selection.

use crate::draw::AnnotationKind;
use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines what annotation a pointer gesture creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing - follows the pointer path (default)
    #[default]
    Freehand,
    /// Rectangle outline - from corner to corner
    Rectangle,
    /// Circle outline - from center outward
    Circle,
    /// Arrow with its head at the release point
    Arrow,
    /// Text label - click to anchor, then type and confirm
    Text,
    /// Selectable but inert: gestures with it never change the annotations
    Eraser,
}

impl Tool {
    /// The annotation kind this tool produces, if any.
    pub fn annotation_kind(self) -> Option<AnnotationKind> {
        match self {
            Tool::Freehand => Some(AnnotationKind::Freehand),
            Tool::Rectangle => Some(AnnotationKind::Rectangle),
            Tool::Circle => Some(AnnotationKind::Circle),
            Tool::Arrow => Some(AnnotationKind::Arrow),
            Tool::Text => Some(AnnotationKind::Text),
            Tool::Eraser => None,
        }
    }
}
