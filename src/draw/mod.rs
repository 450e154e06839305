//! Annotation model and Cairo-based rendering.
//!
//! This module defines the core drawing types:
//! - [`Color`]: RGBA color with hex parsing and predefined constants
//! - [`Annotation`] / [`Shape`]: vector markup records
//! - [`AnnotationList`]: the ordered, append/undo/clear-only model
//! - [`SourceImage`]: the decoded raster drawn underneath
//! - Rendering functions for Cairo-based output

pub mod annotation;
pub mod color;
pub mod font;
pub mod list;
pub mod raster;
pub mod render;
pub mod style;

// Re-export commonly used types at module level
pub use annotation::{
    Annotation, AnnotationError, AnnotationId, AnnotationKind, MAX_ANNOTATION_ID, Shape,
};
pub use color::{Color, ColorParseError};
pub use font::FontDescriptor;
pub use list::AnnotationList;
pub use raster::SourceImage;
pub use render::{render_annotation, render_annotations, render_scene};
pub use style::RenderStyle;

pub use color::{BLACK, BLUE, GREEN, RED, WHITE, YELLOW};
