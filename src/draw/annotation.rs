//! Annotation records: the vector markup drawn over the source image.

use super::color::Color;
use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable, monotonically increasing annotation identifier.
pub type AnnotationId = u64;

/// Largest id accepted from serialized records, leaving room for the next id.
pub const MAX_ANNOTATION_ID: AnnotationId = u64::MAX - 1;

/// The kind of markup an annotation represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationKind {
    Freehand,
    Rectangle,
    Circle,
    Arrow,
    Text,
}

impl AnnotationKind {
    /// Exact number of points the kind requires, or `None` for freehand strokes.
    pub fn required_points(self) -> Option<usize> {
        match self {
            AnnotationKind::Freehand => None,
            AnnotationKind::Rectangle | AnnotationKind::Circle | AnnotationKind::Arrow => Some(2),
            AnnotationKind::Text => Some(1),
        }
    }
}

impl fmt::Display for AnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnnotationKind::Freehand => "freehand",
            AnnotationKind::Rectangle => "rectangle",
            AnnotationKind::Circle => "circle",
            AnnotationKind::Arrow => "arrow",
            AnnotationKind::Text => "text",
        };
        f.write_str(name)
    }
}

/// Geometry of an annotation.
///
/// Each variant carries exactly the points its kind needs, so a rectangle can
/// never be built with three corners or a text label with none.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Polyline through every sampled pointer position
    Freehand { points: Vec<Point> },
    /// Outline between two opposite corners (either drag direction)
    Rectangle { start: Point, end: Point },
    /// Outline centered at `center` passing through `edge`
    Circle { center: Point, edge: Point },
    /// Shaft from `start` to `end` with the head at `end`
    Arrow { start: Point, end: Point },
    /// Filled string whose baseline starts at `anchor`
    Text { anchor: Point, text: String },
}

impl Shape {
    pub fn kind(&self) -> AnnotationKind {
        match self {
            Shape::Freehand { .. } => AnnotationKind::Freehand,
            Shape::Rectangle { .. } => AnnotationKind::Rectangle,
            Shape::Circle { .. } => AnnotationKind::Circle,
            Shape::Arrow { .. } => AnnotationKind::Arrow,
            Shape::Text { .. } => AnnotationKind::Text,
        }
    }

    /// Returns the shape's points in wire order.
    pub fn points(&self) -> Vec<Point> {
        match self {
            Shape::Freehand { points } => points.clone(),
            Shape::Rectangle { start, end } | Shape::Arrow { start, end } => vec![*start, *end],
            Shape::Circle { center, edge } => vec![*center, *edge],
            Shape::Text { anchor, .. } => vec![*anchor],
        }
    }
}

/// A committed (or in-progress) markup record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AnnotationRecord", into = "AnnotationRecord")]
pub struct Annotation {
    pub id: AnnotationId,
    pub color: Color,
    /// Stroke width in pixels; also scales arrowheads and text size
    pub line_width: u32,
    pub shape: Shape,
}

impl Annotation {
    pub fn new(id: AnnotationId, shape: Shape, color: Color, line_width: u32) -> Self {
        Self {
            id,
            color,
            line_width,
            shape,
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        self.shape.kind()
    }

    /// The literal string of a text annotation.
    pub fn text(&self) -> Option<&str> {
        match &self.shape {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Radius of a circle annotation.
    pub fn radius(&self) -> Option<f64> {
        match &self.shape {
            Shape::Circle { center, edge } => Some(center.distance_to(*edge)),
            _ => None,
        }
    }

    /// Geometric extent of the annotation, excluding stroke width.
    ///
    /// Text has no measurable extent without a font layout and returns `None`,
    /// as does an empty freehand stroke.
    pub fn bounds(&self) -> Option<Bounds> {
        match &self.shape {
            Shape::Freehand { points } => Bounds::from_points(points),
            Shape::Rectangle { start, end } | Shape::Arrow { start, end } => {
                Bounds::from_points(&[*start, *end])
            }
            Shape::Circle { center, edge } => {
                let r = center.distance_to(*edge);
                Some(Bounds {
                    min_x: center.x - r,
                    min_y: center.y - r,
                    max_x: center.x + r,
                    max_y: center.y + r,
                })
            }
            Shape::Text { .. } => None,
        }
    }
}

/// Reasons a serialized annotation record is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnnotationError {
    #[error("{kind} annotation needs {expected} point(s), got {found}")]
    WrongPointCount {
        kind: AnnotationKind,
        expected: usize,
        found: usize,
    },

    #[error("annotation has no points")]
    NoPoints,

    #[error("text annotation is missing its text")]
    MissingText,

    #[error("line width must be positive")]
    ZeroLineWidth,

    #[error("annotation id {0} is out of range")]
    IdOutOfRange(AnnotationId),

    #[error(transparent)]
    Color(#[from] super::color::ColorParseError),
}

/// Flat wire form of an annotation, as exchanged with the host.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationRecord {
    pub id: AnnotationId,
    pub kind: AnnotationKind,
    pub points: Vec<Point>,
    pub color: String,
    pub line_width: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TryFrom<AnnotationRecord> for Annotation {
    type Error = AnnotationError;

    fn try_from(record: AnnotationRecord) -> Result<Self, Self::Error> {
        if record.id > MAX_ANNOTATION_ID {
            return Err(AnnotationError::IdOutOfRange(record.id));
        }
        if record.points.is_empty() {
            return Err(AnnotationError::NoPoints);
        }
        if record.line_width == 0 {
            return Err(AnnotationError::ZeroLineWidth);
        }
        if let Some(expected) = record.kind.required_points()
            && record.points.len() != expected
        {
            return Err(AnnotationError::WrongPointCount {
                kind: record.kind,
                expected,
                found: record.points.len(),
            });
        }

        let color = record.color.parse::<Color>()?;
        let points = record.points;

        let shape = match record.kind {
            AnnotationKind::Freehand => Shape::Freehand { points },
            AnnotationKind::Rectangle => Shape::Rectangle {
                start: points[0],
                end: points[1],
            },
            AnnotationKind::Circle => Shape::Circle {
                center: points[0],
                edge: points[1],
            },
            AnnotationKind::Arrow => Shape::Arrow {
                start: points[0],
                end: points[1],
            },
            AnnotationKind::Text => Shape::Text {
                anchor: points[0],
                text: record.text.ok_or(AnnotationError::MissingText)?,
            },
        };

        Ok(Annotation::new(record.id, shape, color, record.line_width))
    }
}

impl From<Annotation> for AnnotationRecord {
    fn from(annotation: Annotation) -> Self {
        let kind = annotation.kind();
        let points = annotation.shape.points();
        let text = match annotation.shape {
            Shape::Text { text, .. } => Some(text),
            _ => None,
        };
        Self {
            id: annotation.id,
            kind,
            points,
            color: annotation.color.to_hex(),
            line_width: annotation.line_width,
            text,
        }
    }
}
